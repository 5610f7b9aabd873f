//! Coordinate transform between screen, virtual, and real space.
//!
//! - **Screen**: pointer coordinates relative to the canvas origin.
//! - **Virtual**: real space shifted by the pan offset; the space the scene is
//!   drawn in before the context applies its zoom scale.
//! - **Real**: zoom/pan-independent space in which shape geometry is stored.
//!
//! Pan is stored in virtual pixels, so `real = screen / zoom - pan` and
//! `virtual = real + pan`.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::GRID_GAP;

/// A point in screen, virtual, or real space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Round to the nearest integer, with halves rounding toward positive infinity.
///
/// Pan and snap arithmetic depend on this tie-breaking so that `-0.5` snaps to
/// `0` rather than `-1`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// View state for the board: zoom, pan, and grid spacing.
///
/// `pan_x` / `pan_y` are in virtual pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
/// `grid_gap` is the grid spacing at zoom 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub grid_gap: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, grid_gap: GRID_GAP }
    }
}

impl Camera {
    /// Convert a pointer position to real coordinates, dividing out zoom.
    #[must_use]
    pub fn screen_to_real(&self, screen: Point) -> Point {
        Point { x: screen.x / self.zoom - self.pan_x, y: screen.y / self.zoom - self.pan_y }
    }

    /// Convert real coordinates back to a pointer position.
    #[must_use]
    pub fn real_to_screen(&self, real: Point) -> Point {
        Point { x: (real.x + self.pan_x) * self.zoom, y: (real.y + self.pan_y) * self.zoom }
    }

    /// Convert a virtual (pre-zoom, panned) position to real coordinates.
    #[must_use]
    pub fn virtual_to_real(&self, virt: Point) -> Point {
        Point { x: virt.x - self.pan_x, y: virt.y - self.pan_y }
    }

    /// Convert real coordinates to virtual coordinates.
    #[must_use]
    pub fn real_to_virtual(&self, real: Point) -> Point {
        Point { x: real.x + self.pan_x, y: real.y + self.pan_y }
    }

    /// Snap a real-space point to the nearest grid intersection.
    #[must_use]
    pub fn snap(&self, real: Point) -> Point {
        Point { x: self.snap_value(real.x), y: self.snap_value(real.y) }
    }

    fn snap_value(&self, value: f64) -> f64 {
        round_half_up(value / self.grid_gap) * self.grid_gap
    }

    /// Express a real-space length in grid units.
    #[must_use]
    pub fn to_grid_units(&self, value: f64) -> f64 {
        value / self.grid_gap
    }

    /// Width of the visible area in virtual pixels.
    #[must_use]
    pub fn virtual_width(&self, stage_width: f64) -> f64 {
        stage_width / self.zoom
    }

    /// Height of the visible area in virtual pixels.
    #[must_use]
    pub fn virtual_height(&self, stage_height: f64) -> f64 {
        stage_height / self.zoom
    }

    /// Virtual x positions of the vertical grid lines that fall before `extent`.
    #[must_use]
    pub fn vertical_grid_lines(&self, extent: f64) -> Vec<f64> {
        grid_lines(self.pan_x, self.grid_gap, extent)
    }

    /// Virtual y positions of the horizontal grid lines that fall before `extent`.
    #[must_use]
    pub fn horizontal_grid_lines(&self, extent: f64) -> Vec<f64> {
        grid_lines(self.pan_y, self.grid_gap, extent)
    }

    /// Change zoom by `delta`, keeping the point under `pointer` fixed.
    ///
    /// Zoom is clamped to `min_zoom`. When the clamp lands exactly on the floor
    /// the pan is left untouched for this step. Returns `true` if the pan moved.
    pub fn zoom_around(&mut self, pointer: Point, delta: f64, min_zoom: f64) -> bool {
        self.zoom = (self.zoom + delta).max(min_zoom);
        if self.zoom > min_zoom {
            self.pan_x -= round_half_up(pointer.x * delta);
            self.pan_y -= round_half_up(pointer.y * delta);
            return true;
        }
        false
    }

    /// Accumulate a pan drag of raw device movement, scaled by inverse zoom.
    pub fn pan_by_movement(&mut self, dx: f64, dy: f64) {
        self.pan_x += round_half_up(dx / self.zoom);
        self.pan_y += round_half_up(dy / self.zoom);
    }
}

/// Grid line offsets starting at `pan % gap` and stepping by `gap` while below `extent`.
///
/// Returns nothing for a non-positive or non-finite gap.
#[must_use]
pub fn grid_lines(pan: f64, gap: f64, extent: f64) -> Vec<f64> {
    let mut lines = Vec::new();
    if !(gap.is_finite() && gap > 0.0) {
        return lines;
    }
    let mut offset = pan % gap;
    while offset < extent {
        lines.push(offset);
        offset += gap;
    }
    lines
}
