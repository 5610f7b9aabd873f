//! Document model: dots, lines, circles, and the store that owns them.
//!
//! Dots and circles carry an id from a single counter shared by both kinds.
//! Lines have no id of their own; a line is identified by its ordered
//! endpoint pair. Removing a dot also removes every line that references it,
//! so a line never points at a dot that is gone.
//!
//! Dot radius is in screen pixels and does not scale with the grid. Circle
//! radius is in grid units and is multiplied by the grid gap when drawn or
//! hit-tested.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Identity of a dot or circle. Monotonically increasing per store.
pub type ShapeId = u64;

/// A point placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub id: ShapeId,
    /// Real-space x.
    pub x: f64,
    /// Real-space y.
    pub y: f64,
    /// Radius in pixels, independent of zoom and grid gap.
    pub radius: f64,
    /// CSS color string.
    pub color: String,
}

impl Dot {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A segment between two dots, identified by its ordered endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub from: ShapeId,
    pub to: ShapeId,
}

/// A circle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: ShapeId,
    /// Real-space center x.
    pub x: f64,
    /// Real-space center y.
    pub y: f64,
    /// Radius in grid units.
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Radius in real-space pixels for the given grid gap.
    #[must_use]
    pub fn radius_px(&self, grid_gap: f64) -> f64 {
        self.radius * grid_gap
    }
}

/// In-memory store of board shapes.
///
/// Dots and circles are keyed by id; since ids only grow, iteration order is
/// creation order.
#[derive(Debug, Default)]
pub struct DocStore {
    dots: BTreeMap<ShapeId, Dot>,
    lines: Vec<Line>,
    circles: BTreeMap<ShapeId, Circle>,
    seq: ShapeId,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ShapeId {
        let id = self.seq;
        self.seq += 1;
        id
    }

    /// Add a dot and return its id.
    pub fn add_dot(&mut self, x: f64, y: f64, radius: f64, color: &str) -> ShapeId {
        let id = self.next_id();
        self.dots.insert(id, Dot { id, x, y, radius, color: color.to_owned() });
        id
    }

    /// Add a circle whose radius is in grid units and return its id.
    pub fn add_circle(&mut self, x: f64, y: f64, radius: f64) -> ShapeId {
        let id = self.next_id();
        self.circles.insert(id, Circle { id, x, y, radius });
        id
    }

    /// Connect consecutive dots into a path: `d1-d2`, `d2-d3`, ...
    ///
    /// Fewer than two dots is a no-op. A pair is skipped if either dot is not
    /// in the store. Returns the lines that were added.
    pub fn connect(&mut self, dots: &[ShapeId]) -> Vec<Line> {
        let added: Vec<Line> = dots
            .windows(2)
            .map(|pair| Line { from: pair[0], to: pair[1] })
            .filter(|line| self.dots.contains_key(&line.from) && self.dots.contains_key(&line.to))
            .collect();
        self.lines.extend_from_slice(&added);
        added
    }

    /// Remove dots by id, cascading to every line that references one of them.
    ///
    /// Returns the lines removed by the cascade.
    pub fn remove_dots(&mut self, ids: &[ShapeId]) -> Vec<Line> {
        self.dots.retain(|id, _| !ids.contains(id));
        let (cascaded, kept): (Vec<Line>, Vec<Line>) = self
            .lines
            .iter()
            .copied()
            .partition(|line| ids.contains(&line.from) || ids.contains(&line.to));
        self.lines = kept;
        cascaded
    }

    /// Remove every line equal to one of `lines`.
    pub fn remove_lines(&mut self, lines: &[Line]) {
        self.lines.retain(|line| !lines.contains(line));
    }

    /// Remove circles by id.
    pub fn remove_circles(&mut self, ids: &[ShapeId]) {
        self.circles.retain(|id, _| !ids.contains(id));
    }

    #[must_use]
    pub fn dot(&self, id: ShapeId) -> Option<&Dot> {
        self.dots.get(&id)
    }

    #[must_use]
    pub fn circle(&self, id: ShapeId) -> Option<&Circle> {
        self.circles.get(&id)
    }

    /// Both endpoint dots of `line`, if both are present.
    #[must_use]
    pub fn endpoints(&self, line: &Line) -> Option<(&Dot, &Dot)> {
        Some((self.dots.get(&line.from)?, self.dots.get(&line.to)?))
    }

    /// Real-space length of `line`.
    #[must_use]
    pub fn line_length(&self, line: &Line) -> Option<f64> {
        let (from, to) = self.endpoints(line)?;
        Some((to.x - from.x).hypot(to.y - from.y))
    }

    /// Dots in creation order.
    pub fn dots(&self) -> impl Iterator<Item = &Dot> {
        self.dots.values()
    }

    /// Lines in creation order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Circles in creation order.
    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.circles.values()
    }

    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    /// Returns `true` if the store holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.lines.is_empty() && self.circles.is_empty()
    }
}
