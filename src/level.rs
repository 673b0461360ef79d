//! Level descriptors
//!
//! Static per-level configuration: spawn and exit points, population,
//! cadence, time limit, skill quotas and terrain layout. Descriptors are
//! validated once at load time; the simulation trusts them afterwards.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH, MAX_RELEASE_RATE};
use crate::sim::{Layout, Skill};

/// Remaining uses per skill
pub type SkillQuota = BTreeMap<Skill, u32>;

/// Reasons a level descriptor is rejected
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} releases no slemmings")]
    NoSlemmings(u32),
    #[error("level {id} needs {to_save} saved but only releases {total}")]
    ToSaveOutOfRange { id: u32, to_save: u32, total: u32 },
    #[error("level {0} has no time limit")]
    NoTimeLimit(u32),
    #[error("level {id} spawn rate {rate} exceeds {}", MAX_RELEASE_RATE)]
    SpawnRateOutOfRange { id: u32, rate: u8 },
    #[error("level {id} {which} point ({x}, {y}) is outside the world")]
    PointOutOfBounds {
        id: u32,
        which: &'static str,
        x: f32,
        y: f32,
    },
    #[error("level {id} terrain colour {color:?} is not #rrggbb")]
    InvalidColor { id: u32, color: String },
    #[error("malformed level descriptor: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One level's fixed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub id: u32,
    pub name: String,
    /// Initial release rate (0-99)
    pub spawn_rate: u8,
    pub total_slemmings: u32,
    pub to_save: u32,
    /// Seconds
    pub time_limit: u32,
    pub terrain_color: String,
    pub skills: SkillQuota,
    pub spawn_pos: Vec2,
    pub exit_pos: Vec2,
    pub layout: Layout,
}

impl LevelDescriptor {
    /// Parse and validate a descriptor from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDescriptor = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.total_slemmings == 0 {
            return Err(LevelError::NoSlemmings(self.id));
        }
        if self.to_save == 0 || self.to_save > self.total_slemmings {
            return Err(LevelError::ToSaveOutOfRange {
                id: self.id,
                to_save: self.to_save,
                total: self.total_slemmings,
            });
        }
        if self.time_limit == 0 {
            return Err(LevelError::NoTimeLimit(self.id));
        }
        if self.spawn_rate > MAX_RELEASE_RATE {
            return Err(LevelError::SpawnRateOutOfRange {
                id: self.id,
                rate: self.spawn_rate,
            });
        }
        for (which, p) in [("spawn", self.spawn_pos), ("exit", self.exit_pos)] {
            if !in_world(p) {
                return Err(LevelError::PointOutOfBounds {
                    id: self.id,
                    which,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        if self.terrain_rgb().is_none() {
            return Err(LevelError::InvalidColor {
                id: self.id,
                color: self.terrain_color.clone(),
            });
        }
        Ok(())
    }

    /// Terrain colour as RGB bytes
    pub fn terrain_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.terrain_color)
    }
}

fn in_world(p: Vec2) -> bool {
    p.is_finite()
        && (0.0..GAME_WIDTH as f32).contains(&p.x)
        && (0.0..GAME_HEIGHT as f32).contains(&p.y)
}

/// Parse `#rrggbb`
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[allow(clippy::too_many_arguments)]
fn quota(
    climber: u32,
    floater: u32,
    bomber: u32,
    blocker: u32,
    builder: u32,
    basher: u32,
    miner: u32,
    digger: u32,
) -> SkillQuota {
    [
        (Skill::Climber, climber),
        (Skill::Floater, floater),
        (Skill::Bomber, bomber),
        (Skill::Blocker, blocker),
        (Skill::Builder, builder),
        (Skill::Basher, basher),
        (Skill::Miner, miner),
        (Skill::Digger, digger),
        (Skill::Walker, 5),
    ]
    .into_iter()
    .collect()
}

/// The shipped level set
pub fn builtin_levels() -> Vec<LevelDescriptor> {
    vec![
        LevelDescriptor {
            id: 1,
            name: "The First Ooze".to_string(),
            spawn_rate: 40,
            total_slemmings: 20,
            to_save: 10,
            time_limit: 300,
            terrain_color: "#4d2a15".to_string(),
            skills: quota(5, 5, 5, 5, 10, 5, 5, 5),
            spawn_pos: Vec2::new(100.0, 140.0),
            exit_pos: Vec2::new(500.0, 340.0),
            layout: Layout::Blockade,
        },
        LevelDescriptor {
            id: 2,
            name: "Slime Steps".to_string(),
            spawn_rate: 50,
            total_slemmings: 25,
            to_save: 15,
            time_limit: 240,
            terrain_color: "#2a4d15".to_string(),
            skills: quota(10, 5, 5, 5, 15, 5, 5, 5),
            spawn_pos: Vec2::new(80.0, 140.0),
            exit_pos: Vec2::new(500.0, 350.0),
            layout: Layout::Stairs,
        },
        LevelDescriptor {
            id: 3,
            name: "The Deep Gorge".to_string(),
            spawn_rate: 35,
            total_slemmings: 30,
            to_save: 20,
            time_limit: 360,
            terrain_color: "#152a4d".to_string(),
            skills: quota(5, 10, 5, 10, 30, 5, 5, 5),
            spawn_pos: Vec2::new(50.0, 140.0),
            exit_pos: Vec2::new(550.0, 140.0),
            layout: Layout::StepUp,
        },
        LevelDescriptor {
            id: 4,
            name: "Pillar Ooze".to_string(),
            spawn_rate: 45,
            total_slemmings: 20,
            to_save: 12,
            time_limit: 300,
            terrain_color: "#4d154d".to_string(),
            skills: quota(5, 5, 5, 5, 10, 15, 15, 15),
            spawn_pos: Vec2::new(50.0, 140.0),
            exit_pos: Vec2::new(550.0, 340.0),
            layout: Layout::Pillars,
        },
    ]
}

/// Look up a shipped level by id
pub fn builtin_level(id: u32) -> Option<LevelDescriptor> {
    builtin_levels().into_iter().find(|l| l.id == id)
}
