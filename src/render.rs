//! Rendering: draws the board scene through a [`Canvas2d`] context.
//!
//! The renderer receives a read-only [`Scene`] and produces draw calls; it
//! never mutates board state. The context is scaled by zoom once, so every
//! coordinate passed to it is in virtual space.
//!
//! Layer order, bottom first: background, grid, preview dot, selected lines,
//! lines, dots, marquee, selected dots, circles, selected circles.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point};
use crate::config::BoardConfig;
use crate::consts::{LABEL_FONT_PX, LABEL_OFFSET_PX, MARQUEE_FILL, SELECTION_RING_PX};
use crate::doc::DocStore;
use crate::input::MouseMode;
use crate::selection::{Marquee, Selection};

/// Failure reported by a drawing context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
}

/// The subset of a 2D drawing API the board needs.
pub trait Canvas2d {
    fn save(&mut self);
    fn restore(&mut self);
    /// # Errors
    /// Returns `Err` if the context rejects the transform.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), RenderError>;
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Add a full circle to the current path.
    ///
    /// # Errors
    /// Returns `Err` if the radius is rejected.
    fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError>;
    fn fill(&mut self);
    fn stroke(&mut self);
    /// # Errors
    /// Returns `Err` if the context cannot draw the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;
}

/// Everything the renderer reads for one frame.
pub struct Scene<'a> {
    pub doc: &'a DocStore,
    pub camera: &'a Camera,
    pub selection: &'a Selection,
    pub marquee: Option<Marquee>,
    pub preview: Option<Point>,
    pub mode: MouseMode,
    pub config: &'a BoardConfig,
    pub stage_width: f64,
    pub stage_height: f64,
}

/// Format a number the way the status line and labels show it: no trailing
/// `.0`, and no negative zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value == 0.0 { "0".to_owned() } else { format!("{value}") }
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any context call fails.
pub fn draw(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    ctx.set_fill_style(&scene.config.background_color);
    ctx.fill_rect(0.0, 0.0, scene.stage_width, scene.stage_height);

    with_saved(ctx, |ctx| draw_layers(ctx, scene))
}

/// Run `f` between `save` and `restore`, restoring even when `f` fails.
fn with_saved<F>(ctx: &mut dyn Canvas2d, f: F) -> Result<(), RenderError>
where
    F: FnOnce(&mut dyn Canvas2d) -> Result<(), RenderError>,
{
    ctx.save();
    let result = f(ctx);
    ctx.restore();
    result
}

fn draw_layers(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    ctx.scale(scene.camera.zoom, scene.camera.zoom)?;
    draw_grid(ctx, scene)?;
    draw_preview_dot(ctx, scene)?;
    draw_selected_lines(ctx, scene)?;
    draw_lines(ctx, scene);
    draw_dots(ctx, scene)?;
    draw_marquee(ctx, scene);
    draw_selected_dots(ctx, scene)?;
    draw_circles(ctx, scene)?;
    draw_selected_circles(ctx, scene)
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    let camera = scene.camera;
    let width = camera.virtual_width(scene.stage_width);
    let height = camera.virtual_height(scene.stage_height);
    ctx.set_line_width(1.0);

    for x in camera.vertical_grid_lines(width) {
        let real = camera.virtual_to_real(Point::new(x, 0.0)).x;
        grid_line(ctx, scene, real, Point::new(x, 0.0), Point::new(x, height));
        grid_label(ctx, camera, real, x, LABEL_FONT_PX)?;
    }

    for y in camera.horizontal_grid_lines(height) {
        let real = camera.virtual_to_real(Point::new(0.0, y)).y;
        grid_line(ctx, scene, real, Point::new(0.0, y), Point::new(width, y));
        grid_label(ctx, camera, real, LABEL_FONT_PX, y)?;
    }
    Ok(())
}

fn grid_line(ctx: &mut dyn Canvas2d, scene: &Scene<'_>, real: f64, from: Point, to: Point) {
    let is_axis = real.abs() < 1e-9;
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.set_stroke_style(if is_axis { &scene.config.axis_color } else { &scene.config.grid_color });
    ctx.stroke();
}

fn grid_label(ctx: &mut dyn Canvas2d, camera: &Camera, real: f64, x: f64, y: f64) -> Result<(), RenderError> {
    with_saved(ctx, |ctx| {
        ctx.set_font(&format!("{}px serif", (10.0 / camera.zoom).max(LABEL_FONT_PX)));
        ctx.set_text_align("center");
        ctx.set_fill_style("white");
        ctx.fill_text(&format_number(camera.to_grid_units(real)), x, y)
    })
}

// =============================================================
// Dots
// =============================================================

fn draw_preview_dot(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    let Some(preview) = scene.preview else {
        return Ok(());
    };
    if scene.mode != MouseMode::Draw {
        return Ok(());
    }
    let v = scene.camera.real_to_virtual(preview);
    ctx.begin_path();
    ctx.circle(v.x, v.y, scene.config.dot_radius)?;
    ctx.set_fill_style(&scene.config.preview_dot_color);
    ctx.fill();
    Ok(())
}

fn draw_dots(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    for dot in scene.doc.dots() {
        let v = scene.camera.real_to_virtual(dot.position());
        ctx.begin_path();
        ctx.circle(v.x, v.y, dot.radius)?;
        ctx.set_fill_style(&dot.color);
        ctx.fill();
    }
    Ok(())
}

fn draw_selected_dots(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    let camera = scene.camera;
    with_saved(ctx, |ctx| {
        ctx.set_stroke_style(&scene.config.selection_color);
        ctx.set_line_width(2.0);
        ctx.set_font(&format!("{LABEL_FONT_PX}px serif"));
        ctx.set_text_align("start");
        ctx.set_fill_style(&scene.config.label_color);
        for dot in scene.selection.dots.iter().filter_map(|&id| scene.doc.dot(id)) {
            let v = camera.real_to_virtual(dot.position());
            ctx.begin_path();
            ctx.circle(v.x, v.y, dot.radius + SELECTION_RING_PX)?;
            ctx.stroke();
            let label = format!(
                "({},{})",
                format_number(camera.to_grid_units(dot.x)),
                format_number(camera.to_grid_units(dot.y))
            );
            ctx.fill_text(&label, v.x + LABEL_OFFSET_PX, v.y - LABEL_OFFSET_PX)?;
        }
        Ok(())
    })
}

// =============================================================
// Lines
// =============================================================

fn draw_lines(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) {
    ctx.set_stroke_style(&scene.config.dot_color);
    ctx.set_line_width(1.0);
    for line in scene.doc.lines() {
        let Some((from, to)) = scene.doc.endpoints(line) else {
            continue;
        };
        let a = scene.camera.real_to_virtual(from.position());
        let b = scene.camera.real_to_virtual(to.position());
        ctx.begin_path();
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.stroke();
    }
}

fn draw_selected_lines(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    let camera = scene.camera;
    with_saved(ctx, |ctx| {
        ctx.set_stroke_style(&scene.config.selection_color);
        ctx.set_line_width(2.0);
        ctx.set_font(&format!("{LABEL_FONT_PX}px serif"));
        ctx.set_text_align("center");
        ctx.set_fill_style(&scene.config.label_color);
        for line in &scene.selection.lines {
            let (Some((from, to)), Some(length)) = (scene.doc.endpoints(line), scene.doc.line_length(line)) else {
                continue;
            };
            let a = camera.real_to_virtual(from.position());
            let b = camera.real_to_virtual(to.position());
            ctx.begin_path();
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.stroke();
            let label = format!("{:.2}", camera.to_grid_units(length));
            ctx.fill_text(&label, (a.x + b.x) / 2.0 + LABEL_OFFSET_PX, (a.y + b.y) / 2.0 - LABEL_OFFSET_PX)?;
        }
        Ok(())
    })
}

// =============================================================
// Marquee
// =============================================================

fn draw_marquee(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) {
    let Some(marquee) = scene.marquee else {
        return;
    };
    let origin = scene.camera.real_to_virtual(marquee.start);
    ctx.save();
    ctx.begin_path();
    ctx.set_stroke_style("white");
    ctx.set_fill_style(MARQUEE_FILL);
    ctx.set_line_width(1.0);
    ctx.rect(origin.x, origin.y, marquee.end.x - marquee.start.x, marquee.end.y - marquee.start.y);
    ctx.stroke();
    ctx.fill();
    ctx.restore();
}

// =============================================================
// Circles
// =============================================================

fn draw_circles(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    ctx.set_stroke_style(&scene.config.dot_color);
    ctx.set_line_width(1.0);
    for circle in scene.doc.circles() {
        let v = scene.camera.real_to_virtual(circle.center());
        ctx.begin_path();
        ctx.circle(v.x, v.y, circle.radius_px(scene.camera.grid_gap))?;
        ctx.stroke();
    }
    Ok(())
}

fn draw_selected_circles(ctx: &mut dyn Canvas2d, scene: &Scene<'_>) -> Result<(), RenderError> {
    ctx.set_stroke_style(&scene.config.selection_color);
    for circle in scene.selection.circles.iter().filter_map(|&id| scene.doc.circle(id)) {
        let v = scene.camera.real_to_virtual(circle.center());
        ctx.begin_path();
        ctx.circle(v.x, v.y, circle.radius_px(scene.camera.grid_gap) + SELECTION_RING_PX)?;
        ctx.stroke();
    }
    Ok(())
}
