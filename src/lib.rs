//! Grid-snapped dot drawing board.
//!
//! The board places dots on a zoomable, pannable grid, connects them into
//! lines, holds circles sized in grid units, and lets the user marquee-select
//! shapes. All state lives in [`engine::BoardCore`], which is driven by plain
//! input values and reports outward effects as [`host::Action`]s. The
//! [`web`] module binds a board to a browser `<canvas>`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::BoardCore`] state machine and the context-owning [`engine::Board`] |
//! | [`doc`] | Shape store: dots, lines, circles |
//! | [`camera`] | Screen, virtual and real coordinate conversions, grid snapping, zoom and pan |
//! | [`selection`] | Marquee lifecycle and selection sets |
//! | [`hit`] | Strict-interior containment tests used by the marquee |
//! | [`input`] | Mouse modes, buttons, modifiers and wheel deltas |
//! | [`keyboard`] | Held-key tracking with edge-triggered bindings |
//! | [`host`] | Capabilities injected by the host and the actions sent back to it |
//! | [`render`] | [`render::Canvas2d`] abstraction and the frame renderer |
//! | [`surface`] | Drawable surfaces that yield a 2D context |
//! | [`config`] | [`config::BoardConfig`] tunables |
//! | [`web`] | Browser `<canvas>` binding and frame loop |
//! | [`consts`] | Default constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod host;
pub mod input;
pub mod keyboard;
pub mod render;
pub mod selection;
pub mod surface;
pub mod web;
