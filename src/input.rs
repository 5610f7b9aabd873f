//! Input model: mouse modes, modifier keys, buttons, wheel deltas, pointer state.
//!
//! These are the plain values the host forwards into the board. `MouseMode`
//! decides what a pointer-down does; `MouseState` tracks the last known
//! pointer position in screen space and whether a button is held.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// What the primary pointer does on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseMode {
    /// Clicking places a grid-snapped dot.
    #[default]
    Draw,
    /// Dragging draws a marquee that selects shapes.
    Select,
    /// Dragging pans the view.
    Move,
}

impl MouseMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Select => "select",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for MouseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard modifier keys held during a pointer event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether the event flags report `key` as held.
    ///
    /// `key` is a DOM key name. Names other than the four modifier keys are
    /// never reported by pointer events and always return `false`.
    #[must_use]
    pub fn holds(self, key: &str) -> bool {
        match key {
            "Shift" => self.shift,
            "Control" => self.ctrl,
            "Alt" => self.alt,
            "Meta" => self.meta,
            _ => false,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta. Only the vertical axis zooms.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Vertical scroll amount (positive = down).
    pub dy: f64,
}

/// Direction of a wheel zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling up zooms in; anything else, including a zero vertical
    /// delta, zooms out. Every wheel event is one step.
    #[must_use]
    pub fn from_wheel(delta: WheelDelta) -> Self {
        if delta.dy < 0.0 { Self::In } else { Self::Out }
    }

    /// Signed zoom change for a step of `step`.
    #[must_use]
    pub fn signed(self, step: f64) -> f64 {
        match self {
            Self::In => step,
            Self::Out => -step,
        }
    }
}

/// Last known pointer state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    /// Pointer position in screen space.
    pub screen: Point,
    pub is_down: bool,
}
