//! Capabilities the host injects into the board, and the actions it receives back.
//!
//! The board has no ambient access to a window or document. Viewport size,
//! cursor styling and status text go through the traits here, and event
//! handlers return [`Action`]s that the host hands to [`Hooks::dispatch`]
//! once it is done borrowing the board. Listeners can therefore call back
//! into the board without aliasing it.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::collections::HashMap;

use crate::doc::{Circle, Dot, Line};
use crate::selection::SelectionSnapshot;

/// Pointer cursor shown over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Receives cursor changes.
pub trait CursorSink {
    fn set_cursor(&mut self, cursor: Cursor);
}

impl CursorSink for () {
    fn set_cursor(&mut self, _cursor: Cursor) {}
}

/// Status line entries the board keeps up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    Zoom,
    Pan,
    Mode,
}

impl StatusKey {
    pub const ALL: [Self; 3] = [Self::Zoom, Self::Pan, Self::Mode];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Pan => "pan",
            Self::Mode => "mode",
        }
    }
}

/// Receives status text.
pub trait StatusSink {
    /// Show `text` for `key`. Returns `false` if nothing could display it
    /// yet, in which case the same text is offered again next frame.
    fn set_status(&mut self, key: StatusKey, text: &str) -> bool;
}

impl StatusSink for () {
    fn set_status(&mut self, _key: StatusKey, _text: &str) -> bool {
        true
    }
}

/// Supplies the drawable area size in CSS pixels.
pub trait ViewportSize {
    fn viewport_size(&self) -> (f64, f64);
}

/// A viewport of fixed size, for hosts that resize the board explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedViewport {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize for FixedViewport {
    fn viewport_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Last text delivered per status key.
#[derive(Debug, Default)]
pub struct StatusCache {
    last: HashMap<StatusKey, String>,
}

impl StatusCache {
    /// Push `text` to `sink` unless it equals the last text delivered for `key`.
    ///
    /// Texts the sink rejects are not remembered.
    pub fn push(&mut self, sink: &mut dyn StatusSink, key: StatusKey, text: String) {
        if self.last.get(&key) == Some(&text) {
            return;
        }
        if sink.set_status(key, &text) {
            self.last.insert(key, text);
        }
    }
}

/// Outward effects produced by board event handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCursor(Cursor),
    /// A marquee commit or explicit change replaced the selection.
    SelectionChanged(SelectionSnapshot),
}

pub type Listener<T> = Box<dyn FnMut(&[T])>;

/// One optional callback per shape kind.
#[derive(Default)]
pub struct SelectionListeners {
    pub on_select_dots: Option<Listener<Dot>>,
    pub on_select_lines: Option<Listener<Line>>,
    pub on_select_circles: Option<Listener<Circle>>,
}

/// Host-side receivers for [`Action`]s.
pub struct Hooks {
    pub cursor: Box<dyn CursorSink>,
    pub selection: SelectionListeners,
}

impl Default for Hooks {
    fn default() -> Self {
        Self { cursor: Box::new(()), selection: SelectionListeners::default() }
    }
}

impl Hooks {
    /// Deliver actions in order. Each selection change calls every listener once.
    pub fn dispatch(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::SetCursor(cursor) => self.cursor.set_cursor(cursor),
                Action::SelectionChanged(snapshot) => {
                    if let Some(cb) = self.selection.on_select_dots.as_mut() {
                        cb(&snapshot.dots);
                    }
                    if let Some(cb) = self.selection.on_select_lines.as_mut() {
                        cb(&snapshot.lines);
                    }
                    if let Some(cb) = self.selection.on_select_circles.as_mut() {
                        cb(&snapshot.circles);
                    }
                }
            }
        }
    }
}
