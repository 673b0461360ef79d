//! Slemming agents and their state machine
//!
//! An agent reads a frozen terrain snapshot and a snapshot of its peers each
//! tick. It never writes terrain directly: carves and fills go out through
//! the edit callback and land in the live store.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::{Terrain, TerrainEdit};
use crate::consts::*;

/// Stable agent identity, unique within one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Transient behaviour; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlemmingState {
    Falling,
    Floating,
    Walking,
    Climbing,
    Blocking,
    Building,
    Bashing,
    Mining,
    Digging,
    Shrugging,
}

impl SlemmingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlemmingState::Falling => "Falling",
            SlemmingState::Floating => "Floating",
            SlemmingState::Walking => "Walking",
            SlemmingState::Climbing => "Climbing",
            SlemmingState::Blocking => "Blocking",
            SlemmingState::Building => "Building",
            SlemmingState::Bashing => "Bashing",
            SlemmingState::Mining => "Mining",
            SlemmingState::Digging => "Digging",
            SlemmingState::Shrugging => "Shrugging",
        }
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        matches!(self, SlemmingState::Falling | SlemmingState::Floating)
    }
}

/// Permanent traits; they survive every state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    Climber,
    Floater,
}

/// A role the player can assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    Climber,
    Floater,
    Bomber,
    Blocker,
    Builder,
    Basher,
    Miner,
    Digger,
    Walker,
}

impl Skill {
    pub const ALL: [Skill; 9] = [
        Skill::Climber,
        Skill::Floater,
        Skill::Bomber,
        Skill::Blocker,
        Skill::Builder,
        Skill::Basher,
        Skill::Miner,
        Skill::Digger,
        Skill::Walker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Climber => "Climber",
            Skill::Floater => "Floater",
            Skill::Bomber => "Bomber",
            Skill::Blocker => "Blocker",
            Skill::Builder => "Builder",
            Skill::Basher => "Basher",
            Skill::Miner => "Miner",
            Skill::Digger => "Digger",
            Skill::Walker => "Walker",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str().eq_ignore_ascii_case(s))
    }

    /// One-line description for the skill panel
    pub fn description(&self) -> &'static str {
        match self {
            Skill::Climber => "Climbs vertical walls.",
            Skill::Floater => "Falls slowly to avoid splatting.",
            Skill::Bomber => "Explodes after 5s.",
            Skill::Blocker => "Stops other slemmings.",
            Skill::Builder => "Builds a staircase upwards.",
            Skill::Basher => "Digs horizontally.",
            Skill::Miner => "Digs diagonally down.",
            Skill::Digger => "Digs straight down.",
            Skill::Walker => "Cancels any action and walks.",
        }
    }
}

/// What one agent can see of another during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerView {
    pub id: AgentId,
    pub pos: Vec2,
    pub state: SlemmingState,
}

impl From<&Slemming> for PeerView {
    fn from(s: &Slemming) -> Self {
        Self {
            id: s.id,
            pos: s.pos,
            state: s.state,
        }
    }
}

/// A single slemming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slemming {
    pub id: AgentId,
    /// Feet position; the pixel at `pos.y + 1` is ground when standing
    pub pos: Vec2,
    /// Horizontal facing, +1.0 or -1.0
    pub direction: f32,
    pub state: SlemmingState,
    pub traits: BTreeSet<Trait>,
    /// Distance fallen since last ground contact
    pub fall_distance: f32,
    /// Bomber fuse in seconds
    pub countdown: Option<f32>,
    /// Ticks spent in the current timed state
    pub action_progress: u32,
    pub is_dead: bool,
    pub is_exited: bool,
}

impl Slemming {
    pub fn new(id: AgentId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            direction: 1.0,
            state: SlemmingState::Falling,
            traits: BTreeSet::new(),
            fall_distance: 0.0,
            countdown: None,
            action_progress: 0,
            is_dead: false,
            is_exited: false,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_dead || self.is_exited
    }

    #[inline]
    pub fn has_trait(&self, t: Trait) -> bool {
        self.traits.contains(&t)
    }

    /// Every state change goes through here so progress never leaks
    fn set_state(&mut self, state: SlemmingState) {
        self.state = state;
        self.action_progress = 0;
    }

    fn airborne_state(&self) -> SlemmingState {
        if self.has_trait(Trait::Floater) {
            SlemmingState::Floating
        } else {
            SlemmingState::Falling
        }
    }

    fn turn_around(&mut self) {
        self.direction = -self.direction;
    }

    /// Ground samples under the centre and both edges of the feet
    fn feet_touch(&self, terrain: &Terrain, y: f32) -> bool {
        let x = self.pos.x;
        terrain.sample(x, y)
            || terrain.sample(x - FOOT_SPREAD, y)
            || terrain.sample(x + FOOT_SPREAD, y)
    }

    fn at_exit(&self, exit: Vec2) -> bool {
        let d = self.pos - exit;
        d.x.abs() < EXIT_HALF_WIDTH && d.y.abs() < EXIT_HALF_HEIGHT
    }

    /// Advance one tick
    pub fn update(
        &mut self,
        terrain: &Terrain,
        exit: Vec2,
        peers: &[PeerView],
        dt: f32,
        edits: &mut impl FnMut(TerrainEdit),
    ) {
        if self.is_terminal() {
            return;
        }

        if self.state != SlemmingState::Falling && self.at_exit(exit) {
            self.is_exited = true;
            return;
        }

        if let Some(fuse) = self.countdown.as_mut() {
            *fuse -= dt;
            if *fuse <= 0.0 {
                self.explode(edits);
                return;
            }
        }

        match self.state {
            SlemmingState::Falling | SlemmingState::Floating => self.fall(terrain),
            SlemmingState::Walking => self.walk(terrain, peers),
            SlemmingState::Climbing => self.climb(terrain),
            SlemmingState::Blocking => {}
            SlemmingState::Building => self.build(edits),
            SlemmingState::Shrugging => self.shrug(),
            SlemmingState::Digging => self.dig(terrain, edits),
            SlemmingState::Bashing => self.bash(terrain, edits),
            SlemmingState::Mining => self.mine(terrain, edits),
        }
    }

    fn fall(&mut self, terrain: &Terrain) {
        // Parachute opens as soon as the trait is held
        if self.state == SlemmingState::Falling && self.has_trait(Trait::Floater) {
            self.set_state(SlemmingState::Floating);
        }

        let speed = if self.state == SlemmingState::Floating {
            FLOAT_SPEED
        } else {
            FALL_SPEED
        };
        let next_y = self.pos.y + speed;

        if self.feet_touch(terrain, next_y) {
            if self.fall_distance > MAX_FALL_DISTANCE && !self.has_trait(Trait::Floater) {
                self.is_dead = true;
                return;
            }
            self.set_state(SlemmingState::Walking);
            self.fall_distance = 0.0;
            while terrain.sample(self.pos.x, self.pos.y) && self.pos.y > 0.0 {
                self.pos.y -= 1.0;
            }
        } else {
            self.pos.y = next_y;
            self.fall_distance += speed;
            if self.pos.y > terrain.height() as f32 {
                self.is_dead = true;
            }
        }
    }

    fn blocked_by(&self, peers: &[PeerView]) -> bool {
        peers.iter().any(|p| {
            p.id != self.id
                && p.state == SlemmingState::Blocking
                && (p.pos.x - self.pos.x).abs() < BLOCKER_HALF_WIDTH
                && (p.pos.y - self.pos.y).abs() < BLOCKER_HALF_HEIGHT
        })
    }

    fn walk(&mut self, terrain: &Terrain, peers: &[PeerView]) {
        if !self.feet_touch(terrain, self.pos.y + 2.0) {
            let next = self.airborne_state();
            self.set_state(next);
            return;
        }

        if self.blocked_by(peers) {
            self.turn_around();
            self.pos.x += self.direction * BLOCKER_NUDGE;
            return;
        }

        let next_x = self.pos.x + self.direction * WALK_SPEED;
        let mut step = 0;
        while step <= MAX_STEP_HEIGHT && terrain.sample(next_x, self.pos.y - step as f32) {
            step += 1;
        }

        if step <= MAX_STEP_HEIGHT {
            self.pos.x = next_x;
            self.pos.y -= step as f32;
            // Stay glued to gentle slopes going down
            if !terrain.sample(self.pos.x, self.pos.y + 1.0) {
                self.pos.y += 1.0;
            }
        } else if self.has_trait(Trait::Climber) {
            self.set_state(SlemmingState::Climbing);
        } else {
            self.turn_around();
        }
    }

    fn climb(&mut self, terrain: &Terrain) {
        let next_y = self.pos.y - CLIMB_SPEED;
        let ahead = self.pos.x + self.direction * CLIMB_REACH;

        if !terrain.sample(ahead, next_y) && !terrain.sample(ahead, self.pos.y) {
            self.pos.y = next_y;
            self.pos.x += self.direction * CLIMB_STEP_OVER;
            self.set_state(SlemmingState::Walking);
        } else if self.pos.y < 0.0 {
            self.is_dead = true;
        } else {
            self.pos.y = next_y;
        }
    }

    fn build(&mut self, edits: &mut impl FnMut(TerrainEdit)) {
        self.action_progress += 1;
        if !self.action_progress.is_multiple_of(BUILD_INTERVAL) {
            return;
        }

        edits(TerrainEdit::fill(
            self.pos.x + self.direction * BUILD_REACH,
            self.pos.y,
            BRICK_HALF_WIDTH,
        ));
        self.pos.x += self.direction * BUILD_STEP_X;
        self.pos.y -= BUILD_STEP_Y;

        if self.action_progress >= BUILD_INTERVAL * BUILD_BRICKS {
            self.set_state(SlemmingState::Shrugging);
        }
    }

    fn shrug(&mut self) {
        self.action_progress += 1;
        if self.action_progress > SHRUG_TICKS {
            self.set_state(SlemmingState::Walking);
        }
    }

    /// Feet resting on the catch-all floor, which no tool can cut
    fn on_bedrock(&self, terrain: &Terrain) -> bool {
        self.pos.y + 1.0 >= terrain.floor_row() as f32
    }

    fn dig(&mut self, terrain: &Terrain, edits: &mut impl FnMut(TerrainEdit)) {
        self.action_progress += 1;

        if self.on_bedrock(terrain) {
            self.set_state(SlemmingState::Walking);
            return;
        }

        // Dug through once nothing solid is left under the cut
        let (x, y) = (self.pos.x, self.pos.y);
        let ground_left = (1..=DIG_REACH).any(|d| terrain.sample(x, y + d as f32));
        if !ground_left {
            let next = self.airborne_state();
            self.set_state(next);
            return;
        }

        if self.action_progress.is_multiple_of(DIG_INTERVAL) {
            edits(TerrainEdit::carve(x, y + DIG_OFFSET, DIG_RADIUS));
            let bottom = (terrain.floor_row() - 1) as f32;
            self.pos.y = (self.pos.y + DIG_DESCENT).min(bottom);
        }
    }

    fn bash(&mut self, terrain: &Terrain, edits: &mut impl FnMut(TerrainEdit)) {
        self.action_progress += 1;

        if self.action_progress.is_multiple_of(BASH_INTERVAL) {
            let (x, y, dir) = (self.pos.x, self.pos.y, self.direction);
            let wall_ahead = (1..=BASH_SCAN)
                .map(|d| x + dir * d as f32)
                .any(|ahead| terrain.sample(ahead, y));
            if !wall_ahead {
                self.set_state(SlemmingState::Walking);
                return;
            }
            edits(TerrainEdit::carve(
                self.pos.x + self.direction * BASH_REACH,
                self.pos.y - BASH_LIFT,
                BASH_RADIUS,
            ));
            self.pos.x += self.direction * BASH_ADVANCE;
        }

        if self.action_progress > ACTION_TIMEOUT {
            self.set_state(SlemmingState::Walking);
        }
    }

    fn mine(&mut self, terrain: &Terrain, edits: &mut impl FnMut(TerrainEdit)) {
        self.action_progress += 1;

        if self.on_bedrock(terrain) {
            self.set_state(SlemmingState::Walking);
            return;
        }

        if self.action_progress.is_multiple_of(MINE_INTERVAL) {
            edits(TerrainEdit::carve(
                self.pos.x + self.direction * MINE_REACH,
                self.pos.y + MINE_DEPTH,
                MINE_RADIUS,
            ));
            self.pos.x += self.direction * MINE_ADVANCE_X;
            self.pos.y += MINE_ADVANCE_Y;
        }

        if self.action_progress > ACTION_TIMEOUT {
            self.set_state(SlemmingState::Walking);
        }
    }

    fn explode(&mut self, edits: &mut impl FnMut(TerrainEdit)) {
        edits(TerrainEdit::carve(self.pos.x, self.pos.y, BLAST_RADIUS));
        self.is_dead = true;
    }

    /// Try to assign a role. Returns false, leaving the agent untouched, when
    /// the role does not apply in the current state.
    pub fn apply_skill(&mut self, skill: Skill) -> bool {
        if self.is_terminal() {
            return false;
        }

        match skill {
            Skill::Climber => {
                self.traits.insert(Trait::Climber);
                true
            }
            Skill::Floater => {
                self.traits.insert(Trait::Floater);
                true
            }
            Skill::Bomber => {
                if self.countdown.is_some() {
                    return false;
                }
                self.countdown = Some(BOMB_FUSE);
                true
            }
            Skill::Blocker => self.enter_from(&[SlemmingState::Walking], SlemmingState::Blocking),
            Skill::Builder => self.enter_from(
                &[SlemmingState::Walking, SlemmingState::Shrugging],
                SlemmingState::Building,
            ),
            Skill::Basher => self.enter_from(&[SlemmingState::Walking], SlemmingState::Bashing),
            Skill::Miner => self.enter_from(&[SlemmingState::Walking], SlemmingState::Mining),
            Skill::Digger => self.enter_from(&[SlemmingState::Walking], SlemmingState::Digging),
            Skill::Walker => {
                if self.state == SlemmingState::Falling {
                    return false;
                }
                // Cancels the fuse along with the current action
                self.countdown = None;
                self.set_state(SlemmingState::Walking);
                true
            }
        }
    }

    fn enter_from(&mut self, allowed: &[SlemmingState], next: SlemmingState) -> bool {
        if !allowed.contains(&self.state) {
            return false;
        }
        self.set_state(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::EditMode;

    const FAR_EXIT: Vec2 = Vec2::new(600.0, 20.0);

    fn floor_terrain(top: i32) -> Terrain {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        terrain.fill_rect(0, top, GAME_WIDTH as i32, 20);
        terrain
    }

    fn walker_at(x: f32, y: f32) -> Slemming {
        let mut s = Slemming::new(AgentId(1), Vec2::new(x, y));
        s.state = SlemmingState::Walking;
        s
    }

    /// Tick with edits applied to the live terrain after each update
    fn run(s: &mut Slemming, terrain: &mut Terrain, ticks: usize) -> Vec<TerrainEdit> {
        let mut log = Vec::new();
        for _ in 0..ticks {
            let snapshot = terrain.clone();
            s.update(&snapshot, FAR_EXIT, &[], SIM_DT, &mut |e| {
                terrain.apply(e);
                log.push(e);
            });
        }
        log
    }

    #[test]
    fn test_new_agent_is_falling() {
        let s = Slemming::new(AgentId(7), Vec2::new(10.0, 10.0));
        assert_eq!(s.state, SlemmingState::Falling);
        assert_eq!(s.direction, 1.0);
        assert!(s.countdown.is_none());
        assert!(!s.is_terminal());
    }

    #[test]
    fn test_fall_at_threshold_survives() {
        let mut terrain = floor_terrain(300);
        // 30 steps of 2px = exactly the threshold
        let mut s = Slemming::new(AgentId(1), Vec2::new(100.0, 238.0));
        run(&mut s, &mut terrain, 31);
        assert!(!s.is_dead);
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.fall_distance, 0.0);
        assert_eq!(s.pos.y, 298.0);
    }

    #[test]
    fn test_fall_past_threshold_dies() {
        let mut terrain = floor_terrain(300);
        let mut s = Slemming::new(AgentId(1), Vec2::new(100.0, 236.0));
        run(&mut s, &mut terrain, 32);
        assert!(s.is_dead);
        assert!(!s.is_exited);
        assert_eq!(s.state, SlemmingState::Falling);
    }

    #[test]
    fn test_floater_survives_any_fall() {
        let mut terrain = floor_terrain(300);
        let mut s = Slemming::new(AgentId(1), Vec2::new(100.0, 0.0));
        assert!(s.apply_skill(Skill::Floater));
        let mut ticks = 0;
        while s.state != SlemmingState::Walking && ticks < 1000 {
            run(&mut s, &mut terrain, 1);
            ticks += 1;
        }
        assert!(!s.is_dead);
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.pos.y, 299.0);
    }

    #[test]
    fn test_walks_off_ledge_into_fall() {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        terrain.fill_rect(0, 150, 105, 15);
        let mut s = walker_at(100.0, 149.0);
        run(&mut s, &mut terrain, 20);
        assert_eq!(s.state, SlemmingState::Falling);
    }

    #[test]
    fn test_steps_up_small_ledge() {
        let mut terrain = floor_terrain(150);
        terrain.fill_rect(110, 146, 40, 4);
        let mut s = walker_at(100.0, 149.0);
        run(&mut s, &mut terrain, 30);
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.direction, 1.0);
        assert!(s.pos.x > 110.0);
        assert_eq!(s.pos.y, 145.0);
    }

    #[test]
    fn test_exit_ignored_while_falling() {
        let terrain = floor_terrain(300);
        let mut s = Slemming::new(AgentId(1), Vec2::new(100.0, 100.0));
        s.update(&terrain, Vec2::new(100.0, 100.0), &[], SIM_DT, &mut |_| {});
        assert!(!s.is_exited);

        let mut w = walker_at(100.0, 299.0);
        w.update(&terrain, Vec2::new(105.0, 295.0), &[], SIM_DT, &mut |_| {});
        assert!(w.is_exited);
        assert!(!w.is_dead);
    }

    #[test]
    fn test_terminal_agent_is_frozen() {
        let terrain = floor_terrain(300);
        let mut s = walker_at(100.0, 299.0);
        s.is_dead = true;
        let before = s.clone();
        s.update(&terrain, FAR_EXIT, &[], SIM_DT, &mut |_| panic!("no edits"));
        for skill in Skill::ALL {
            assert!(!s.apply_skill(skill));
        }
        assert_eq!(s.pos, before.pos);
        assert_eq!(s.state, before.state);
        assert!(s.traits.is_empty());
        assert!(s.countdown.is_none());
    }

    #[test]
    fn test_skill_preconditions() {
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Builder));
        assert_eq!(s.state, SlemmingState::Building);
        s.action_progress = 7;

        // Rejected attempts change nothing
        for skill in [Skill::Blocker, Skill::Basher, Skill::Miner, Skill::Digger] {
            assert!(!s.apply_skill(skill));
        }
        assert_eq!(s.state, SlemmingState::Building);
        assert_eq!(s.action_progress, 7);

        assert!(s.apply_skill(Skill::Walker));
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.action_progress, 0);
    }

    #[test]
    fn test_builder_accepted_while_shrugging() {
        let mut s = walker_at(100.0, 149.0);
        s.state = SlemmingState::Shrugging;
        s.action_progress = 50;
        assert!(!s.apply_skill(Skill::Digger));
        assert!(s.apply_skill(Skill::Builder));
        assert_eq!(s.state, SlemmingState::Building);
        assert_eq!(s.action_progress, 0);
    }

    #[test]
    fn test_walker_rejected_while_falling() {
        let mut s = Slemming::new(AgentId(1), Vec2::new(0.0, 0.0));
        assert!(s.apply_skill(Skill::Bomber));
        assert!(!s.apply_skill(Skill::Walker));
        assert_eq!(s.state, SlemmingState::Falling);
        assert_eq!(s.countdown, Some(BOMB_FUSE));
    }

    #[test]
    fn test_walker_accepted_while_floating() {
        let mut s = Slemming::new(AgentId(1), Vec2::new(0.0, 0.0));
        s.state = SlemmingState::Floating;
        s.action_progress = 4;
        assert!(s.apply_skill(Skill::Walker));
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.action_progress, 0);
    }

    #[test]
    fn test_walker_defuses_bomber() {
        let mut terrain = floor_terrain(150);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Bomber));
        assert!(s.apply_skill(Skill::Blocker));
        run(&mut s, &mut terrain, 10);
        assert!(s.countdown.is_some());

        assert!(s.apply_skill(Skill::Walker));
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.countdown, None);

        // Well past the original fuse: no explosion
        let edits = run(&mut s, &mut terrain, 400);
        assert!(edits.is_empty());
        assert!(!s.is_dead);
        // A fresh fuse can be lit again
        assert!(s.apply_skill(Skill::Bomber));
    }

    #[test]
    fn test_bomber_only_once() {
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Bomber));
        assert_eq!(s.countdown, Some(BOMB_FUSE));
        s.countdown = Some(1.5);
        assert!(!s.apply_skill(Skill::Bomber));
        assert_eq!(s.countdown, Some(1.5));
    }

    #[test]
    fn test_traits_are_idempotent() {
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Climber));
        assert!(s.apply_skill(Skill::Climber));
        assert!(s.apply_skill(Skill::Floater));
        assert!(s.apply_skill(Skill::Floater));
        assert_eq!(s.traits.len(), 2);
        assert_eq!(s.state, SlemmingState::Walking);
    }

    #[test]
    fn test_builder_staircase() {
        let mut terrain = floor_terrain(150);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Builder));

        let ticks = (BUILD_INTERVAL * BUILD_BRICKS) as usize;
        let edits = run(&mut s, &mut terrain, ticks);
        assert_eq!(edits.len(), BUILD_BRICKS as usize);
        assert!(edits.iter().all(|e| e.mode == EditMode::Fill));
        assert_eq!(s.state, SlemmingState::Shrugging);
        assert_eq!(s.action_progress, 0);
        assert_eq!(s.pos, Vec2::new(152.0, 123.0));

        run(&mut s, &mut terrain, SHRUG_TICKS as usize + 1);
        assert_eq!(s.state, SlemmingState::Walking);
        // Standing on the last brick
        run(&mut s, &mut terrain, 1);
        assert_eq!(s.state, SlemmingState::Walking);
    }

    #[test]
    fn test_digger_cuts_through_platform() {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        terrain.fill_rect(0, 150, GAME_WIDTH as i32, 15);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Digger));

        let mut edits = Vec::new();
        for _ in 0..40 {
            edits.extend(run(&mut s, &mut terrain, 1));
            if s.state != SlemmingState::Digging {
                break;
            }
        }
        assert_eq!(s.state, SlemmingState::Falling);
        assert_eq!(edits.len(), 2);
        assert!(!terrain.sample(100.0, 160.0));
        assert!(terrain.sample(130.0, 160.0));
    }

    #[test]
    fn test_basher_tunnels_through_wall() {
        let mut terrain = floor_terrain(150);
        terrain.fill_rect(110, 100, 30, 50);
        let mut s = walker_at(108.0, 149.0);
        assert!(s.apply_skill(Skill::Basher));

        let mut ticks = 0;
        while s.state == SlemmingState::Bashing && ticks < 1000 {
            run(&mut s, &mut terrain, 1);
            ticks += 1;
        }
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.pos.x, 124.0);
        assert!(!terrain.sample(120.0, 145.0));
        assert!(!terrain.sample(130.0, 140.0));
        assert!(terrain.sample(125.0, 101.0));
    }

    #[test]
    fn test_basher_in_open_air_gives_up() {
        let mut terrain = floor_terrain(150);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Basher));
        let edits = run(&mut s, &mut terrain, BASH_INTERVAL as usize);
        assert!(edits.is_empty());
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.pos.x, 100.0);
    }

    #[test]
    fn test_miner_times_out() {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Miner));

        let edits = run(&mut s, &mut terrain, ACTION_TIMEOUT as usize);
        assert_eq!(s.state, SlemmingState::Mining);
        assert_eq!(edits.len(), (ACTION_TIMEOUT / MINE_INTERVAL) as usize);
        let first = edits[0];
        assert_eq!(
            (first.x, first.y, first.radius),
            (106.0, 153.0, MINE_RADIUS)
        );

        run(&mut s, &mut terrain, 1);
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.action_progress, 0);
    }

    #[test]
    fn test_digger_stops_on_bedrock() {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        let bottom = (terrain.floor_row() - 1) as f32;
        let mut s = walker_at(100.0, bottom);
        assert!(s.apply_skill(Skill::Digger));

        let edits = run(&mut s, &mut terrain, 1);
        assert!(edits.is_empty());
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.pos.y, bottom);
    }

    #[test]
    fn test_digger_bottoms_out_inside_world() {
        // Platform resting directly on the catch-all floor
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        let floor = terrain.floor_row();
        terrain.fill_rect(0, 380, GAME_WIDTH as i32, floor - 380);
        let mut s = walker_at(100.0, 379.0);
        assert!(s.apply_skill(Skill::Digger));

        for _ in 0..1000 {
            run(&mut s, &mut terrain, 1);
            if s.state == SlemmingState::Walking {
                break;
            }
        }
        assert_eq!(s.state, SlemmingState::Walking);
        assert!(!s.is_dead);
        assert!(s.pos.y < floor as f32);
        assert!(s.pos.y > 380.0);
    }

    #[test]
    fn test_miner_stops_on_bedrock() {
        let mut terrain = Terrain::new(GAME_WIDTH, GAME_HEIGHT);
        let floor = terrain.floor_row();
        terrain.fill_rect(0, 380, GAME_WIDTH as i32, floor - 380);
        let mut s = walker_at(100.0, 379.0);
        assert!(s.apply_skill(Skill::Miner));

        // One row per swing until the feet reach the floor
        let swings = (floor - 1 - 379) as usize;
        let edits = run(&mut s, &mut terrain, swings * MINE_INTERVAL as usize);
        assert_eq!(edits.len(), swings);
        assert_eq!(s.state, SlemmingState::Mining);
        assert_eq!(s.pos.y, (floor - 1) as f32);

        let edits = run(&mut s, &mut terrain, 1);
        assert!(edits.is_empty());
        assert_eq!(s.state, SlemmingState::Walking);
        assert_eq!(s.pos.y, (floor - 1) as f32);
    }

    #[test]
    fn test_blocker_stands_still() {
        let mut terrain = floor_terrain(150);
        let mut s = walker_at(100.0, 149.0);
        assert!(s.apply_skill(Skill::Blocker));
        let edits = run(&mut s, &mut terrain, 100);
        assert!(edits.is_empty());
        assert_eq!(s.pos, Vec2::new(100.0, 149.0));
        assert_eq!(s.state, SlemmingState::Blocking);
    }

    #[test]
    fn test_blocker_ignores_own_view() {
        let terrain = floor_terrain(150);
        let mut s = walker_at(100.0, 149.0);
        let own = PeerView {
            id: s.id,
            pos: s.pos,
            state: SlemmingState::Blocking,
        };
        s.update(&terrain, FAR_EXIT, &[own], SIM_DT, &mut |_| {});
        assert_eq!(s.direction, 1.0);
        assert!(s.pos.x > 100.0);
    }

    #[test]
    fn test_skill_names() {
        assert_eq!(Skill::from_str("digger"), Some(Skill::Digger));
        assert_eq!(Skill::from_str("WALKER"), Some(Skill::Walker));
        assert_eq!(Skill::from_str("nuke"), None);
        assert_eq!(Skill::Digger.description(), "Digs straight down.");
        let json = serde_json::to_string(&Skill::Basher).unwrap();
        assert_eq!(json, "\"BASHER\"");
    }
}
