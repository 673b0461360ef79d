//! Static level layouts
//!
//! Each layout is a list of solid rectangles drawn into a fresh terrain
//! when a level is loaded. Coordinates are world pixels, y grows downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned solid rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Platform {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Terrain layout identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    /// Ledges dropping toward a walled pit
    Pit,
    /// A single platform over a safe floor with a bouncer wall
    Blockade,
    /// Six descending steps
    Stairs,
    /// Two ledges separated by a walled gorge
    Divide,
    /// A long floor ending below a raised exit platform
    StepUp,
    /// A roof over four pillars
    Pillars,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Pit => "Pit",
            Layout::Blockade => "Blockade",
            Layout::Stairs => "Stairs",
            Layout::Divide => "Divide",
            Layout::StepUp => "Step Up",
            Layout::Pillars => "Pillars",
        }
    }

    /// Solid rectangles making up this layout
    pub fn platforms(&self) -> Vec<Platform> {
        match self {
            Layout::Pit => vec![
                Platform::new(50, 150, 200, 15),
                Platform::new(300, 220, 150, 15),
                Platform::new(450, 260, 150, 15),
                Platform::new(50, 350, 540, 20),
                Platform::new(240, 150, 10, 80),
                Platform::new(530, 260, 10, 100),
            ],
            Layout::Blockade => vec![
                Platform::new(100, 300, 300, 15),
                Platform::new(0, 350, 640, 20),
                Platform::new(0, 300, 20, 50),
            ],
            Layout::Stairs => {
                let mut steps: Vec<Platform> = (0..6)
                    .map(|i| Platform::new(50 + i * 80, 150 + i * 40, 100, 15))
                    .collect();
                steps.push(Platform::new(50, 360, 540, 20));
                steps
            }
            Layout::Divide => {
                let gap = 200;
                let far = 220 + gap;
                vec![
                    Platform::new(20, 150, 200, 20),
                    Platform::new(far, 150, 200, 20),
                    Platform::new(20, 350, 600, 30),
                    Platform::new(210, 150, 10, 200),
                    Platform::new(far - 10, 150, 10, 200),
                ]
            }
            Layout::StepUp => vec![
                Platform::new(20, 350, 480, 20),
                Platform::new(500, 250, 120, 20),
            ],
            Layout::Pillars => {
                let mut parts = vec![Platform::new(20, 150, 600, 15)];
                parts.extend((0..4).map(|i| Platform::new(100 + i * 120, 165, 30, 185)));
                parts.push(Platform::new(20, 350, 600, 30));
                parts
            }
        }
    }
}
