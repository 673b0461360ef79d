//! Fixed timestep simulation tick
//!
//! Advances one playthrough deterministically: player commands, spawn,
//! terrain snapshot, the agent sweep in creation order, then bookkeeping.

use glam::Vec2;

use super::agent::{AgentId, PeerView, Skill, Slemming};
use super::state::{GamePhase, GameState};
use super::terrain::{Terrain, TerrainEdit};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Arm (or disarm) a skill
    pub arm: Option<Skill>,
    /// Pointer position in world coordinates
    pub click: Option<Vec2>,
    /// Release rate change in whole steps
    pub release_rate_steps: i32,
    /// End the level now
    pub nuke: bool,
}

/// How an agent left play this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Exited,
    Died,
}

/// What happened during one or more ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: Vec<AgentId>,
    pub assigned: Vec<AgentId>,
    pub exited: Vec<AgentId>,
    pub died: Vec<AgentId>,
}

impl TickReport {
    pub fn merge(&mut self, other: TickReport) {
        self.spawned.extend(other.spawned);
        self.assigned.extend(other.assigned);
        self.exited.extend(other.exited);
        self.died.extend(other.died);
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.assigned.is_empty()
            && self.exited.is_empty()
            && self.died.is_empty()
    }
}

/// Update every live agent once against a frozen terrain snapshot.
///
/// Agents run in slice order. Edits go straight to `edits`, so the caller
/// decides where they land; peers see a view taken before the sweep.
/// Returns the agents that became terminal, in the same order.
pub fn tick_all(
    slemmings: &mut [Slemming],
    snapshot: &Terrain,
    exit: Vec2,
    dt: f32,
    edits: &mut impl FnMut(TerrainEdit),
) -> Vec<(AgentId, Fate)> {
    let peers: Vec<PeerView> = slemmings
        .iter()
        .filter(|s| !s.is_terminal())
        .map(PeerView::from)
        .collect();

    let mut fates = Vec::new();
    for slemming in slemmings.iter_mut().filter(|s| !s.is_terminal()) {
        slemming.update(snapshot, exit, &peers, dt, edits);
        if slemming.is_exited {
            fates.push((slemming.id, Fate::Exited));
        } else if slemming.is_dead {
            fates.push((slemming.id, Fate::Died));
        }
    }
    fates
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    // Finished runs ignore everything
    if state.is_finished() {
        return report;
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            phase => phase,
        };
    }

    // Commands are accepted while paused; they take effect on the next update
    if let Some(skill) = input.arm {
        state.arm(skill);
    }
    if input.release_rate_steps != 0 {
        state.adjust_release_rate(input.release_rate_steps);
    }
    if let Some(pointer) = input.click
        && let Some(id) = state.click(pointer)
    {
        report.assigned.push(id);
    }
    if input.nuke {
        state.nuke();
        return report;
    }

    if state.phase != GamePhase::Playing {
        return report;
    }

    state.time_ticks += 1;
    state.time_left = (state.time_left - dt).max(0.0);

    if let Some(id) = state.spawn_if_due() {
        report.spawned.push(id);
    }

    let snapshot = state.terrain.clone();
    let exit = state.level.exit_pos;
    let terrain = &mut state.terrain;
    let fates = tick_all(&mut state.slemmings, &snapshot, exit, dt, &mut |edit| {
        terrain.apply(edit)
    });

    for (id, fate) in fates {
        match fate {
            Fate::Exited => {
                state.stats.saved += 1;
                report.exited.push(id);
                log::debug!("Slemming {:?} exited ({} saved)", id, state.stats.saved);
            }
            Fate::Died => {
                state.stats.dead += 1;
                report.died.push(id);
                log::debug!("Slemming {:?} died ({} dead)", id, state.stats.dead);
            }
        }
    }

    state.evaluate_outcome();
    report
}

/// Run `ticks` ticks for one rendered frame. One-shot commands in `input`
/// apply on the first tick only.
pub fn run_frame(state: &mut GameState, input: &TickInput, ticks: u32, dt: f32) -> TickReport {
    let mut report = TickReport::default();
    let idle = TickInput::default();
    for i in 0..ticks {
        let input = if i == 0 { input } else { &idle };
        report.merge(tick(state, input, dt));
    }
    report
}
