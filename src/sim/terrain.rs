//! Terrain store
//!
//! A 2-D opacity grid decoupled from any rendering surface. A pixel counts
//! as solid when its opacity exceeds `SOLID_THRESHOLD`. Outside the grid the
//! world is open air to the left, right and above, and always solid in the
//! bottom `FLOOR_MARGIN` rows and below.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout::{Layout, Platform};
use crate::consts::*;

/// Terrain mutation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Clear a disk of the given radius
    Carve,
    /// Set a thin horizontal strip `2 * radius` wide
    Fill,
}

/// A terrain mutation request issued by an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainEdit {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub mode: EditMode,
}

impl TerrainEdit {
    pub fn carve(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            mode: EditMode::Carve,
        }
    }

    pub fn fill(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            mode: EditMode::Fill,
        }
    }
}

/// Mutable occupancy field over a fixed rectangle
#[derive(Clone, PartialEq, Eq)]
pub struct Terrain {
    width: usize,
    height: usize,
    opacity: Vec<u8>,
}

impl fmt::Debug for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terrain")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("solid_pixels", &self.solid_count())
            .finish()
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new(GAME_WIDTH, GAME_HEIGHT)
    }
}

impl Terrain {
    /// Empty terrain of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            opacity: vec![0; width * height],
        }
    }

    /// Fresh terrain with a layout drawn in
    pub fn with_layout(layout: Layout) -> Self {
        let mut terrain = Self::default();
        terrain.reset_for(layout);
        terrain
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// First row of the catch-all floor
    #[inline]
    pub fn floor_row(&self) -> i32 {
        self.height as i32 - FLOOR_MARGIN
    }

    /// Solid/empty query at a world point
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> bool {
        let ix = x.floor() as i32;
        let iy = y.floor() as i32;
        if ix < 0 || ix >= self.width as i32 || iy < 0 {
            return false;
        }
        if iy >= self.floor_row() {
            return true;
        }
        self.opacity[iy as usize * self.width + ix as usize] > SOLID_THRESHOLD
    }

    /// Apply a carve or fill centred on `(x, y)`
    pub fn mutate(&mut self, x: f32, y: f32, radius: f32, mode: EditMode) {
        match mode {
            EditMode::Carve => self.carve(x, y, radius),
            EditMode::Fill => self.fill_strip(x, y, radius),
        }
    }

    pub fn apply(&mut self, edit: TerrainEdit) {
        self.mutate(edit.x, edit.y, edit.radius, edit.mode);
    }

    /// Clear every pixel whose square overlaps the open disk
    fn carve(&mut self, x: f32, y: f32, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let left = (x - radius).floor() as i32;
        let right = (x + radius).floor() as i32 + 1;
        let top = (y - radius).floor() as i32;
        let bottom = (y + radius).floor() as i32 + 1;
        let Some((x0, x1)) = self.clip_cols(left, right) else {
            return;
        };
        let Some((y0, y1)) = self.clip_rows(top, bottom) else {
            return;
        };

        for iy in y0..y1 {
            // Closest point of the pixel square to the centre
            let cy = y.clamp(iy as f32, iy as f32 + 1.0) - y;
            for ix in x0..x1 {
                let cx = x.clamp(ix as f32, ix as f32 + 1.0) - x;
                if cx * cx + cy * cy < r2 {
                    self.opacity[iy * self.width + ix] = 0;
                }
            }
        }
    }

    /// Fill the strip `[x - r, x + r) x [y - 1, y - 1 + FILL_HEIGHT)`
    fn fill_strip(&mut self, x: f32, y: f32, radius: f32) {
        let top = y - 1.0;
        let left = (x - radius).floor() as i32;
        let right = (x + radius).ceil() as i32;
        let bottom = (top + FILL_HEIGHT).ceil() as i32;
        let Some((x0, x1)) = self.clip_cols(left, right) else {
            return;
        };
        let Some((y0, y1)) = self.clip_rows(top.floor() as i32, bottom) else {
            return;
        };
        for iy in y0..y1 {
            self.opacity[iy * self.width + x0..iy * self.width + x1].fill(u8::MAX);
        }
    }

    /// Fill an integer rectangle solid (layout drawing)
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let Some((x0, x1)) = self.clip_cols(x, x + w) else {
            return;
        };
        let Some((y0, y1)) = self.clip_rows(y, y + h) else {
            return;
        };
        for iy in y0..y1 {
            self.opacity[iy * self.width + x0..iy * self.width + x1].fill(u8::MAX);
        }
    }

    pub fn draw_platform(&mut self, platform: &Platform) {
        self.fill_rect(platform.x, platform.y, platform.w, platform.h);
    }

    /// Clear all occupancy
    pub fn clear(&mut self) {
        self.opacity.fill(0);
    }

    /// Clear and redraw a level's static layout
    pub fn reset_for(&mut self, layout: Layout) {
        self.clear();
        for platform in layout.platforms() {
            self.draw_platform(&platform);
        }
        log::debug!(
            "Terrain reset for {} layout ({} solid pixels)",
            layout.as_str(),
            self.solid_count()
        );
    }

    /// Number of stored solid pixels (excludes the implicit floor)
    pub fn solid_count(&self) -> usize {
        self.opacity.iter().filter(|&&a| a > SOLID_THRESHOLD).count()
    }

    fn clip_cols(&self, start: i32, end: i32) -> Option<(usize, usize)> {
        let start = start.max(0);
        let end = end.min(self.width as i32);
        (start < end).then_some((start as usize, end as usize))
    }

    fn clip_rows(&self, start: i32, end: i32) -> Option<(usize, usize)> {
        let start = start.max(0);
        let end = end.min(self.height as i32);
        (start < end).then_some((start as usize, end as usize))
    }
}
