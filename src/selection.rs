//! Selection engine: marquee lifecycle and the selected-shape sets.
//!
//! The marquee lives only while the pointer is down in select mode. Its
//! corners are stored in real space and converted to virtual space when the
//! selection is computed on release. Selections hold shape identities, not
//! copies; [`SelectionSnapshot`] resolves them into owned shapes for
//! listeners.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::camera::{Camera, Point};
use crate::doc::{Circle, Dot, DocStore, Line, ShapeId};
use crate::hit::{self, Bounds};

/// Where the engine is in the select gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    /// No marquee has been drawn yet.
    #[default]
    Idle,
    /// A marquee is being dragged.
    Dragging,
    /// The last marquee was consumed into the selection sets.
    Committed,
}

/// The rubber-band rectangle, corners in real space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub end: Point,
}

impl Marquee {
    /// Normalized bounds of the marquee in virtual space.
    #[must_use]
    pub fn virtual_bounds(&self, camera: &Camera) -> Bounds {
        Bounds::from_corners(camera.real_to_virtual(self.start), camera.real_to_virtual(self.end))
    }
}

/// Selected shapes by identity, in selection order.
///
/// Additive selection appends without de-duplicating, so an id may appear
/// more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub dots: Vec<ShapeId>,
    pub lines: Vec<Line>,
    pub circles: Vec<ShapeId>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.lines.is_empty() && self.circles.is_empty()
    }

    fn extend(&mut self, other: Selection) {
        self.dots.extend(other.dots);
        self.lines.extend(other.lines);
        self.circles.extend(other.circles);
    }
}

/// Owned copies of the selected shapes, handed to selection listeners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    pub dots: Vec<Dot>,
    pub lines: Vec<Line>,
    pub circles: Vec<Circle>,
}

impl SelectionSnapshot {
    /// Resolve `selection` against `doc`, dropping ids that no longer exist.
    #[must_use]
    pub fn resolve(selection: &Selection, doc: &DocStore) -> Self {
        Self {
            dots: selection.dots.iter().filter_map(|&id| doc.dot(id).cloned()).collect(),
            lines: selection.lines.clone(),
            circles: selection.circles.iter().filter_map(|&id| doc.circle(id).cloned()).collect(),
        }
    }
}

/// Every shape in `doc` hit by `bounds`, in store order.
#[must_use]
pub fn shapes_within(bounds: &Bounds, doc: &DocStore, camera: &Camera) -> Selection {
    Selection {
        dots: doc.dots().filter(|d| hit::dot_in(bounds, d, camera)).map(|d| d.id).collect(),
        lines: doc.lines().iter().filter(|l| hit::line_in(bounds, l, doc, camera)).copied().collect(),
        circles: doc.circles().filter(|c| hit::circle_in(bounds, c, camera)).map(|c| c.id).collect(),
    }
}

/// Marquee state plus the current selection.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    phase: SelectionPhase,
    marquee: Option<Marquee>,
    selection: Selection,
}

impl SelectionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        self.marquee
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Open a marquee at `real`. Any marquee already open is replaced.
    pub fn begin(&mut self, real: Point) {
        self.marquee = Some(Marquee { start: real, end: real });
        self.phase = SelectionPhase::Dragging;
    }

    /// Move the free corner of the open marquee. No-op when none is open.
    pub fn drag_to(&mut self, real: Point) {
        if let Some(marquee) = self.marquee.as_mut() {
            marquee.end = real;
        }
    }

    /// Discard the open marquee without touching the selection.
    pub fn cancel(&mut self) {
        if self.marquee.take().is_some() {
            self.phase = SelectionPhase::Committed;
            self.settle();
        }
    }

    /// Fall back to idle once a committed selection has been emptied.
    /// A marquee being dragged is left alone.
    fn settle(&mut self) {
        if self.phase == SelectionPhase::Committed && self.selection.is_empty() {
            self.phase = SelectionPhase::Idle;
        }
    }

    /// Close the open marquee and recompute the selection from it.
    ///
    /// With `additive`, new matches are appended to the current selection;
    /// otherwise they replace it. Returns `None` if no marquee was open.
    pub fn commit(&mut self, doc: &DocStore, camera: &Camera, additive: bool) -> Option<&Selection> {
        let marquee = self.marquee.take()?;
        let found = shapes_within(&marquee.virtual_bounds(camera), doc, camera);
        if additive {
            self.selection.extend(found);
        } else {
            self.selection = found;
        }
        self.phase = SelectionPhase::Committed;
        Some(&self.selection)
    }

    /// Empty all selection sets. Returns `false` if they were already empty.
    pub fn clear(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection = Selection::default();
        self.settle();
        true
    }

    /// Drop removed dots, and every line touching them, from the selection.
    pub fn forget_dots(&mut self, ids: &[ShapeId]) {
        self.selection.dots.retain(|id| !ids.contains(id));
        self.selection
            .lines
            .retain(|line| !ids.contains(&line.from) && !ids.contains(&line.to));
        self.settle();
    }

    pub fn forget_lines(&mut self, lines: &[Line]) {
        self.selection.lines.retain(|line| !lines.contains(line));
        self.settle();
    }

    pub fn forget_circles(&mut self, ids: &[ShapeId]) {
        self.selection.circles.retain(|id| !ids.contains(id));
        self.settle();
    }
}
