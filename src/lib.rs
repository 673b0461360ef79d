//! Slemmings - a falling-terrain puzzle game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, agents, tick driver)
//! - `level`: Level descriptors and validation
//! - `settings`: Player preferences
//! - `advice`: Hint text collaborator

pub mod advice;
pub mod level;
pub mod settings;
pub mod sim;

pub use advice::{AdviceSource, CannedAdvice};
pub use level::{LevelDescriptor, LevelError};
pub use settings::{Settings, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (seconds per tick, ~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum ticks per rendered frame (fast-forward cap)
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// World dimensions
    pub const GAME_WIDTH: usize = 640;
    pub const GAME_HEIGHT: usize = 400;
    /// Bottom rows that are always solid (catch-all floor)
    pub const FLOOR_MARGIN: i32 = 2;
    /// Opacity above this counts as solid
    pub const SOLID_THRESHOLD: u8 = 128;
    /// Height of a filled building strip
    pub const FILL_HEIGHT: f32 = 3.0;

    /// Movement
    pub const WALK_SPEED: f32 = 0.55;
    pub const FALL_SPEED: f32 = 2.0;
    pub const FLOAT_SPEED: f32 = 1.0;
    pub const CLIMB_SPEED: f32 = 1.0;
    /// Horizontal spread of the foot samples
    pub const FOOT_SPREAD: f32 = 2.0;
    /// Highest ledge a walker steps onto without stopping
    pub const MAX_STEP_HEIGHT: i32 = 6;
    /// Falls longer than this are fatal (without the floater trait)
    pub const MAX_FALL_DISTANCE: f32 = 60.0;

    /// Climbing reach and the hop made when topping a wall
    pub const CLIMB_REACH: f32 = 3.0;
    pub const CLIMB_STEP_OVER: f32 = 4.0;

    /// Exit capture box (half extents)
    pub const EXIT_HALF_WIDTH: f32 = 10.0;
    pub const EXIT_HALF_HEIGHT: f32 = 15.0;

    /// Blocker influence box (half extents) and push-back distance
    pub const BLOCKER_HALF_WIDTH: f32 = 8.0;
    pub const BLOCKER_HALF_HEIGHT: f32 = 5.0;
    pub const BLOCKER_NUDGE: f32 = 3.0;

    /// Builder: one brick every interval, capped staircase
    pub const BUILD_INTERVAL: u32 = 20;
    pub const BUILD_BRICKS: u32 = 13;
    pub const BUILD_REACH: f32 = 8.0;
    pub const BRICK_HALF_WIDTH: f32 = 5.0;
    pub const BUILD_STEP_X: f32 = 4.0;
    pub const BUILD_STEP_Y: f32 = 2.0;

    /// Shrugging duration in ticks
    pub const SHRUG_TICKS: u32 = 120;

    /// Digger
    pub const DIG_INTERVAL: u32 = 15;
    /// Depth scanned for ground left under the cut
    pub const DIG_REACH: i32 = 12;
    pub const DIG_OFFSET: f32 = 4.0;
    pub const DIG_RADIUS: f32 = 10.0;
    pub const DIG_DESCENT: f32 = 3.0;

    /// Basher
    pub const BASH_INTERVAL: u32 = 10;
    /// Reach scanned for wall left ahead
    pub const BASH_SCAN: i32 = 17;
    pub const BASH_REACH: f32 = 6.0;
    pub const BASH_LIFT: f32 = 2.0;
    pub const BASH_RADIUS: f32 = 12.0;
    pub const BASH_ADVANCE: f32 = 2.0;

    /// Miner
    pub const MINE_INTERVAL: u32 = 12;
    pub const MINE_REACH: f32 = 6.0;
    pub const MINE_DEPTH: f32 = 4.0;
    pub const MINE_RADIUS: f32 = 12.0;
    pub const MINE_ADVANCE_X: f32 = 2.0;
    pub const MINE_ADVANCE_Y: f32 = 1.0;

    /// Bashers and miners give up after this many ticks
    pub const ACTION_TIMEOUT: u32 = 600;

    /// Bomber fuse (seconds) and blast radius
    pub const BOMB_FUSE: f32 = 5.0;
    pub const BLAST_RADIUS: f32 = 25.0;

    /// Spawning
    pub const SPAWN_DROP: f32 = 10.0;
    pub const MIN_SPAWN_DELAY: f32 = 10.0;
    pub const MAX_RELEASE_RATE: u8 = 99;
    pub const RELEASE_RATE_STEP: u8 = 5;

    /// Pointer targeting box (half extents)
    pub const TARGET_RADIUS: f32 = 15.0;
}
