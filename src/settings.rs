//! Game settings and preferences
//!
//! Persisted as JSON next to the game, separately from level data. A missing
//! or unreadable file never stops the game; defaults are used instead.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_TICKS_PER_FRAME;

/// Game speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    #[default]
    Normal,
    Fast,
    Turbo,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
            SpeedPreset::Turbo => "Turbo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "1x" => Some(SpeedPreset::Normal),
            "fast" | "2x" => Some(SpeedPreset::Fast),
            "turbo" | "4x" => Some(SpeedPreset::Turbo),
            _ => None,
        }
    }

    /// Simulation ticks per rendered frame
    pub fn ticks_per_frame(&self) -> u32 {
        match self {
            SpeedPreset::Normal => 1,
            SpeedPreset::Fast => 2,
            SpeedPreset::Turbo => 4,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game speed
    pub speed: SpeedPreset,

    // === HUD ===
    /// Report the slemming under the pointer on each click
    pub show_reticle: bool,
    /// Show a skill's description when it is armed
    pub skill_tooltips: bool,
    /// Show advice text between levels
    pub show_advice: bool,

    /// Seed for canned advice selection
    pub advice_seed: u64,
    /// Level to start on
    pub start_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: SpeedPreset::Normal,

            // HUD
            show_reticle: true,
            skill_tooltips: true,
            show_advice: true,

            advice_seed: 0x5eed,
            start_level: 1,
        }
    }
}

impl Settings {
    /// Effective ticks per frame (capped)
    pub fn ticks_per_frame(&self) -> u32 {
        self.speed.ticks_per_frame().min(MAX_TICKS_PER_FRAME)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read settings {}: {}", path.display(), err);
                }
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring invalid settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
