//! Game state for one level playthrough
//!
//! Owns the live terrain, every slemming ever released (terminal ones stay
//! in place so ids and indices remain valid), the HUD counters, skill
//! quotas and spawn cadence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{AgentId, Skill, Slemming};
use super::terrain::Terrain;
use crate::consts::*;
use crate::level::{LevelDescriptor, SkillQuota};

/// Current phase of a playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Playing,
    /// Frozen; no timers advance
    Paused,
    /// Enough slemmings saved
    Won,
    /// Goal unreachable, time up, or nuked
    Lost,
}

/// HUD counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub released: u32,
    pub saved: u32,
    pub dead: u32,
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: LevelDescriptor,
    /// Live terrain; agents only see per-tick snapshots of it
    pub terrain: Terrain,
    /// All released slemmings in creation order
    pub slemmings: Vec<Slemming>,
    pub stats: RunStats,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds remaining
    pub time_left: f32,
    /// Player-adjustable release rate (0-99)
    pub release_rate: u8,
    pub skills_left: SkillQuota,
    /// Skill applied on the next click
    pub armed: Option<Skill>,
    /// Ticks since the last spawn
    spawn_timer: u32,
    next_id: u32,
}

impl GameState {
    /// Start a playthrough of the given level
    pub fn new(level: LevelDescriptor) -> Self {
        let mut state = Self {
            terrain: Terrain::default(),
            slemmings: Vec::new(),
            stats: RunStats::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            time_left: 0.0,
            release_rate: 0,
            skills_left: SkillQuota::new(),
            armed: None,
            spawn_timer: 0,
            next_id: 1,
            level: level.clone(),
        };
        state.load_level(level);
        state
    }

    /// Re-initialize for a (possibly different) level
    pub fn load_level(&mut self, level: LevelDescriptor) {
        log::info!(
            "Loading level {} \"{}\" ({} layout, {} slemmings, {} to save)",
            level.id,
            level.name,
            level.layout.as_str(),
            level.total_slemmings,
            level.to_save
        );
        self.terrain.reset_for(level.layout);
        self.slemmings.clear();
        self.stats = RunStats::default();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.time_left = level.time_limit as f32;
        self.release_rate = level.spawn_rate;
        self.skills_left = level.skills.clone();
        self.armed = None;
        self.spawn_timer = 0;
        self.next_id = 1;
        self.level = level;
    }

    /// Allocate a new agent ID
    pub fn next_entity_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Ticks between spawns at the current release rate
    pub fn spawn_delay_ticks(&self) -> f32 {
        let rate = self.release_rate as f32;
        ((105.0 - rate) * 12.0 / 16.0).max(MIN_SPAWN_DELAY)
    }

    /// Release a slemming if quota and cadence allow
    pub fn spawn_if_due(&mut self) -> Option<AgentId> {
        self.spawn_timer += 1;
        if self.stats.released >= self.level.total_slemmings
            || (self.spawn_timer as f32) <= self.spawn_delay_ticks()
        {
            return None;
        }

        let id = self.next_entity_id();
        let pos = self.level.spawn_pos - Vec2::new(0.0, SPAWN_DROP);
        self.slemmings.push(Slemming::new(id, pos));
        self.stats.released += 1;
        self.spawn_timer = 0;
        log::debug!(
            "Released slemming {:?} ({}/{})",
            id,
            self.stats.released,
            self.level.total_slemmings
        );
        Some(id)
    }

    pub fn slemming(&self, id: AgentId) -> Option<&Slemming> {
        self.slemmings.iter().find(|s| s.id == id)
    }

    /// Slemmings still in play
    pub fn live(&self) -> impl Iterator<Item = &Slemming> {
        self.slemmings.iter().filter(|s| !s.is_terminal())
    }

    /// Nearest live slemming inside the targeting box around `pointer`
    pub fn find_target(&self, pointer: Vec2) -> Option<AgentId> {
        self.live()
            .filter(|s| {
                let d = s.pos - pointer;
                d.x.abs() < TARGET_RADIUS && d.y.abs() < TARGET_RADIUS
            })
            .min_by(|a, b| {
                a.pos
                    .distance_squared(pointer)
                    .partial_cmp(&b.pos.distance_squared(pointer))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| s.id)
    }

    pub fn skills_left(&self, skill: Skill) -> u32 {
        self.skills_left.get(&skill).copied().unwrap_or(0)
    }

    /// Apply a skill to one slemming, spending quota only on success
    pub fn apply_skill(&mut self, id: AgentId, skill: Skill) -> bool {
        if self.skills_left(skill) == 0 {
            return false;
        }
        let Some(target) = self.slemmings.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if !target.apply_skill(skill) {
            return false;
        }
        if let Some(left) = self.skills_left.get_mut(&skill) {
            *left -= 1;
        }
        log::debug!("{} assigned to {:?}", skill.as_str(), id);
        true
    }

    /// Toggle the armed skill; skills with no uses left cannot be armed
    pub fn arm(&mut self, skill: Skill) {
        if self.armed == Some(skill) {
            self.armed = None;
        } else if self.skills_left(skill) > 0 {
            self.armed = Some(skill);
        }
    }

    /// Apply the armed skill to whatever is under the pointer
    pub fn click(&mut self, pointer: Vec2) -> Option<AgentId> {
        let skill = self.armed?;
        let id = self.find_target(pointer)?;
        self.apply_skill(id, skill).then_some(id)
    }

    /// Nudge the release rate by whole steps, clamped to 0-99
    pub fn adjust_release_rate(&mut self, steps: i32) {
        let rate = self.release_rate as i32 + steps * RELEASE_RATE_STEP as i32;
        self.release_rate = rate.clamp(0, MAX_RELEASE_RATE as i32) as u8;
    }

    /// End the level immediately
    pub fn nuke(&mut self) {
        if self.is_finished() {
            return;
        }
        log::info!("Level {} nuked", self.level.id);
        self.phase = GamePhase::Lost;
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Won | GamePhase::Lost)
    }

    /// Settle win/loss from the counters and clock
    pub fn evaluate_outcome(&mut self) {
        if self.is_finished() {
            return;
        }
        let level = &self.level;
        if self.stats.saved >= level.to_save {
            self.phase = GamePhase::Won;
        } else if self.stats.dead > level.total_slemmings - level.to_save
            || self.time_left <= 0.0
        {
            self.phase = GamePhase::Lost;
        } else {
            return;
        }
        log::info!(
            "Level {} {:?}: saved {}/{}, dead {}, released {}",
            level.id,
            self.phase,
            self.stats.saved,
            level.to_save,
            self.stats.dead,
            self.stats.released
        );
    }
}
