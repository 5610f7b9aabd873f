//! Marquee hit-testing.
//!
//! All tests are strict: a point on the box boundary is outside. Dots must lie
//! inside, lines need only one endpoint inside, and circles must fit entirely
//! inside including their radius.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::doc::{Circle, Dot, DocStore, Line};

/// Axis-aligned box normalized so that `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Build a box from two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self { min_x: a.x.min(b.x), max_x: a.x.max(b.x), min_y: a.y.min(b.y), max_y: a.y.max(b.y) }
    }

    /// Whether `p` is strictly inside on both axes.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }

    /// Whether a circle of radius `r` centered at `center` fits strictly inside.
    #[must_use]
    pub fn contains_circle(&self, center: Point, r: f64) -> bool {
        center.x - r > self.min_x && center.x + r < self.max_x && center.y - r > self.min_y && center.y + r < self.max_y
    }
}

#[must_use]
pub fn dot_in(bounds: &Bounds, dot: &Dot, camera: &Camera) -> bool {
    bounds.contains(camera.real_to_virtual(dot.position()))
}

/// A line is hit if either endpoint is inside. Lines with a missing endpoint never hit.
#[must_use]
pub fn line_in(bounds: &Bounds, line: &Line, doc: &DocStore, camera: &Camera) -> bool {
    let Some((from, to)) = doc.endpoints(line) else {
        return false;
    };
    dot_in(bounds, from, camera) || dot_in(bounds, to, camera)
}

#[must_use]
pub fn circle_in(bounds: &Bounds, circle: &Circle, camera: &Camera) -> bool {
    bounds.contains_circle(camera.real_to_virtual(circle.center()), circle.radius_px(camera.grid_gap))
}
