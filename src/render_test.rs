#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::Line;

// =============================================================
// Recording context
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Save,
    Restore,
    Scale(f64),
    Fill(String),
    Stroke(String),
    LineWidth(f64),
    Font(String),
    Align(String),
    FillRect(f64, f64, f64, f64),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rect(f64, f64, f64, f64),
    Circle(f64, f64, f64),
    Text(String, f64, f64),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
    fail_text: bool,
}

impl Recorder {
    fn circles(&self) -> Vec<(f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle(x, y, r) => Some((*x, *y, *r)),
                _ => None,
            })
            .collect()
    }

    fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, _, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Canvas2d for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn scale(&mut self, x: f64, _y: f64) -> Result<(), RenderError> {
        self.ops.push(Op::Scale(x));
        Ok(())
    }
    fn set_fill_style(&mut self, color: &str) {
        self.ops.push(Op::Fill(color.to_owned()));
    }
    fn set_stroke_style(&mut self, color: &str) {
        self.ops.push(Op::Stroke(color.to_owned()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_owned()));
    }
    fn set_text_align(&mut self, align: &str) {
        self.ops.push(Op::Align(align.to_owned()));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
    fn begin_path(&mut self) {}
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::Rect(x, y, w, h));
    }
    fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError> {
        self.ops.push(Op::Circle(x, y, radius));
        Ok(())
    }
    fn fill(&mut self) {}
    fn stroke(&mut self) {}
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        if self.fail_text {
            return Err(RenderError::Canvas("text".to_owned()));
        }
        self.ops.push(Op::Text(text.to_owned(), x, y));
        Ok(())
    }
}

// =============================================================
// Scene helpers
// =============================================================

struct Fixture {
    doc: DocStore,
    camera: Camera,
    selection: Selection,
    config: BoardConfig,
    marquee: Option<Marquee>,
    preview: Option<Point>,
    mode: MouseMode,
}

impl Fixture {
    fn new() -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            selection: Selection::default(),
            config: BoardConfig::default(),
            marquee: None,
            preview: None,
            mode: MouseMode::Draw,
        }
    }

    fn render(&self, width: f64, height: f64) -> Recorder {
        let mut rec = Recorder::default();
        draw(&mut rec, &self.scene(width, height)).unwrap();
        rec
    }

    fn scene(&self, width: f64, height: f64) -> Scene<'_> {
        Scene {
            doc: &self.doc,
            camera: &self.camera,
            selection: &self.selection,
            marquee: self.marquee,
            preview: self.preview,
            mode: self.mode,
            config: &self.config,
            stage_width: width,
            stage_height: height,
        }
    }
}

// =============================================================
// format_number
// =============================================================

#[test]
fn format_number_drops_trailing_zero_and_sign() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(-2.0), "-2");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(-0.0), "0");
}

// =============================================================
// Frame structure
// =============================================================

#[test]
fn draw_clears_then_scales_by_zoom() {
    let mut fx = Fixture::new();
    fx.camera.zoom = 2.0;
    let rec = fx.render(100.0, 100.0);
    assert_eq!(rec.ops[0], Op::Fill("rgb(16,16,16)".to_owned()));
    assert_eq!(rec.ops[1], Op::FillRect(0.0, 0.0, 100.0, 100.0));
    assert_eq!(rec.ops[2], Op::Save);
    assert_eq!(rec.ops[3], Op::Scale(2.0));
    assert_eq!(rec.ops.last(), Some(&Op::Restore));
}

#[test]
fn save_and_restore_are_balanced() {
    let mut fx = Fixture::new();
    let a = fx.doc.add_dot(50.0, 50.0, 5.0, "white");
    let b = fx.doc.add_dot(100.0, 50.0, 5.0, "white");
    let line = fx.doc.connect(&[a, b])[0];
    fx.selection = Selection { dots: vec![a], lines: vec![line], circles: vec![] };
    let rec = fx.render(200.0, 200.0);
    assert_eq!(rec.count(|op| *op == Op::Save), rec.count(|op| *op == Op::Restore));
}

#[test]
fn failed_text_still_restores_context() {
    let fx = Fixture::new();
    let mut rec = Recorder { fail_text: true, ..Recorder::default() };
    assert!(draw(&mut rec, &fx.scene(100.0, 100.0)).is_err());
    assert_eq!(rec.count(|op| *op == Op::Save), rec.count(|op| *op == Op::Restore));
}

// =============================================================
// Grid
// =============================================================

#[test]
fn grid_lines_are_bounded_by_virtual_extent() {
    let mut fx = Fixture::new();
    fx.camera.zoom = 2.0;
    let rec = fx.render(200.0, 100.0);
    // Virtual extent 100 x 50: vertical lines at 0 and 50, horizontal at 0.
    let verticals: Vec<f64> = rec
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::MoveTo(x, y) if *y == 0.0 => Some(*x),
            _ => None,
        })
        .collect();
    assert_eq!(verticals, vec![0.0, 50.0, 0.0]);
    assert!(rec.ops.contains(&Op::LineTo(50.0, 50.0)));
    assert!(rec.ops.contains(&Op::LineTo(100.0, 0.0)));
}

#[test]
fn origin_grid_lines_use_axis_color() {
    let mut fx = Fixture::new();
    fx.camera.pan_x = 50.0;
    let rec = fx.render(120.0, 10.0);
    // Vertical lines at virtual 0, 50, 100 are real -50, 0, 50.
    let strokes: Vec<String> = rec
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Stroke(c) => Some(c.clone()),
            _ => None,
        })
        .take(3)
        .collect();
    assert_eq!(strokes, vec!["rgba(255,255,255,0.09)", "red", "rgba(255,255,255,0.09)"]);
}

#[test]
fn grid_labels_show_grid_units() {
    let mut fx = Fixture::new();
    fx.camera.pan_x = 50.0;
    let rec = fx.render(120.0, 10.0);
    assert_eq!(rec.texts(), vec!["-1", "0", "1", "0"]);
}

#[test]
fn grid_label_font_never_below_baseline() {
    let mut fx = Fixture::new();
    fx.camera.zoom = 0.5;
    let rec = fx.render(10.0, 10.0);
    assert!(rec.ops.contains(&Op::Font("20px serif".to_owned())));
    fx.camera.zoom = 1.0;
    let rec = fx.render(10.0, 10.0);
    assert!(rec.ops.contains(&Op::Font("14px serif".to_owned())));
}

// =============================================================
// Shapes
// =============================================================

#[test]
fn dots_are_drawn_at_virtual_position_with_pixel_radius() {
    let mut fx = Fixture::new();
    fx.camera.pan_x = 10.0;
    fx.camera.grid_gap = 20.0;
    fx.doc.add_dot(40.0, 60.0, 7.0, "white");
    let rec = fx.render(0.0, 0.0);
    assert_eq!(rec.circles(), vec![(50.0, 60.0, 7.0)]);
}

#[test]
fn circles_scale_radius_by_grid_gap() {
    let mut fx = Fixture::new();
    fx.doc.add_circle(30.0, 30.0, 1.5);
    let rec = fx.render(0.0, 0.0);
    assert_eq!(rec.circles(), vec![(30.0, 30.0, 75.0)]);
}

#[test]
fn preview_dot_only_in_draw_mode() {
    let mut fx = Fixture::new();
    fx.preview = Some(Point::new(50.0, 50.0));
    let rec = fx.render(0.0, 0.0);
    assert_eq!(rec.circles(), vec![(50.0, 50.0, 5.0)]);
    fx.mode = MouseMode::Select;
    let rec = fx.render(0.0, 0.0);
    assert!(rec.circles().is_empty());
}

#[test]
fn selected_dot_gets_ring_and_grid_label() {
    let mut fx = Fixture::new();
    let a = fx.doc.add_dot(100.0, -50.0, 5.0, "white");
    fx.selection.dots = vec![a];
    let rec = fx.render(0.0, 0.0);
    assert_eq!(rec.circles(), vec![(100.0, -50.0, 5.0), (100.0, -50.0, 7.0)]);
    assert!(rec.ops.contains(&Op::Text("(2,-1)".to_owned(), 110.0, -60.0)));
}

#[test]
fn selected_line_is_labelled_with_length_in_grid_units() {
    let mut fx = Fixture::new();
    let a = fx.doc.add_dot(0.0, 0.0, 5.0, "white");
    let b = fx.doc.add_dot(30.0, 40.0, 5.0, "white");
    fx.selection.lines = vec![Line { from: a, to: b }];
    fx.doc.connect(&[a, b]);
    let rec = fx.render(0.0, 0.0);
    assert!(rec.ops.contains(&Op::Text("1.00".to_owned(), 25.0, 10.0)));
}

#[test]
fn selected_circle_ring_is_two_pixels_wider() {
    let mut fx = Fixture::new();
    let c = fx.doc.add_circle(0.0, 0.0, 1.0);
    fx.selection.circles = vec![c];
    let rec = fx.render(0.0, 0.0);
    assert_eq!(rec.circles(), vec![(0.0, 0.0, 50.0), (0.0, 0.0, 52.0)]);
}

#[test]
fn marquee_is_drawn_from_start_corner() {
    let mut fx = Fixture::new();
    fx.camera.pan_x = 5.0;
    fx.marquee = Some(Marquee { start: Point::new(10.0, 10.0), end: Point::new(0.0, 30.0) });
    let rec = fx.render(0.0, 0.0);
    assert!(rec.ops.contains(&Op::Rect(15.0, 10.0, -10.0, 20.0)));
}
