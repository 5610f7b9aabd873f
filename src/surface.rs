//! Drawable surfaces: anything that can hand the board a 2D context.

use crate::render::Canvas2d;

/// Failures acquiring or wiring up a drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The surface exists but cannot produce a 2D context.
    #[error("surface has no 2d context")]
    NoContext,
    /// The platform rejected a call while setting up the surface.
    #[error("platform call failed: {0}")]
    Platform(String),
}

/// A handle that can produce a 2D drawing context.
pub trait Surface {
    type Context: Canvas2d;

    /// Acquire the 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NoContext`] if the surface cannot draw in 2D.
    fn context_2d(&self) -> Result<Self::Context, SurfaceError>;
}
