//! Shared numeric and style constants for the board.

// ── Grid ────────────────────────────────────────────────────────

/// Default spacing between grid lines at zoom 1, in pixels.
pub const GRID_GAP: f64 = 50.0;

/// Smallest grid gap a host may configure.
pub const MIN_GRID_GAP: f64 = 15.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Zoom floor; wheel and direct zoom changes never go below this.
pub const MIN_ZOOM: f64 = 0.5;

/// Zoom change applied per wheel event.
pub const ZOOM_STEP: f64 = 0.1;

// ── Shapes ──────────────────────────────────────────────────────

/// Radius of dots placed by pointer clicks, in screen pixels.
pub const DOT_RADIUS: f64 = 5.0;

/// Extra radius of the ring drawn around selected dots and circles.
pub const SELECTION_RING_PX: f64 = 2.0;

/// Offset of shape labels from their anchor point, in pixels.
pub const LABEL_OFFSET_PX: f64 = 10.0;

/// Baseline font size for grid and shape labels.
pub const LABEL_FONT_PX: f64 = 14.0;

// ── Keys ────────────────────────────────────────────────────────

/// Key that switches to pan mode while held.
pub const PAN_KEY: &str = " ";

/// Key that makes a marquee selection additive while held.
pub const ADDITIVE_KEY: &str = "Shift";

// ── Colors ──────────────────────────────────────────────────────

pub const BACKGROUND_COLOR: &str = "rgb(16,16,16)";
pub const GRID_COLOR: &str = "rgba(255,255,255,0.09)";
pub const AXIS_COLOR: &str = "red";
pub const DOT_COLOR: &str = "white";
pub const PREVIEW_DOT_COLOR: &str = "rgba(255,255,255,0.2)";
pub const SELECTION_COLOR: &str = "red";
pub const LABEL_COLOR: &str = "salmon";
pub const MARQUEE_FILL: &str = "rgba(255,255,255,0.1)";
