//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (creation order)
//! - Terrain read from a per-tick snapshot, written through edit callbacks
//! - No rendering or platform dependencies

pub mod agent;
pub mod layout;
pub mod state;
pub mod terrain;
pub mod tick;

pub use agent::{AgentId, PeerView, Skill, Slemming, SlemmingState, Trait};
pub use layout::{Layout, Platform};
pub use state::{GamePhase, GameState, RunStats};
pub use terrain::{EditMode, Terrain, TerrainEdit};
pub use tick::{Fate, TickInput, TickReport, run_frame, tick, tick_all};
