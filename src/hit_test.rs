use super::*;

fn bounds(x1: f64, y1: f64, x2: f64, y2: f64) -> Bounds {
    Bounds::from_corners(Point::new(x1, y1), Point::new(x2, y2))
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn from_corners_normalizes_any_drag_direction() {
    let expected = bounds(0.0, 0.0, 60.0, 40.0);
    assert_eq!(bounds(60.0, 40.0, 0.0, 0.0), expected);
    assert_eq!(bounds(0.0, 40.0, 60.0, 0.0), expected);
    assert_eq!(expected, Bounds { min_x: 0.0, max_x: 60.0, min_y: 0.0, max_y: 40.0 });
}

#[test]
fn contains_is_strict() {
    let b = bounds(0.0, 0.0, 40.0, 40.0);
    assert!(b.contains(Point::new(10.0, 10.0)));
    assert!(!b.contains(Point::new(0.0, 10.0)));
    assert!(!b.contains(Point::new(10.0, 40.0)));
    assert!(!b.contains(Point::new(50.0, 50.0)));
}

#[test]
fn zero_area_box_contains_nothing() {
    let b = bounds(10.0, 10.0, 10.0, 10.0);
    assert!(!b.contains(Point::new(10.0, 10.0)));
}

#[test]
fn contains_circle_needs_full_extent() {
    let b = bounds(0.0, 0.0, 60.0, 60.0);
    assert!(b.contains_circle(Point::new(30.0, 30.0), 29.0));
    assert!(!b.contains_circle(Point::new(30.0, 30.0), 30.0));
}

// =============================================================
// Shape tests
// =============================================================

#[test]
fn dot_in_uses_virtual_position() {
    let mut doc = DocStore::new();
    let id = doc.add_dot(10.0, 10.0, 5.0, "white");
    let dot = doc.dot(id).unwrap();
    let b = bounds(0.0, 0.0, 40.0, 40.0);
    assert!(dot_in(&b, dot, &Camera::default()));
    let panned = Camera { pan_x: 100.0, ..Camera::default() };
    assert!(!dot_in(&b, dot, &panned));
}

#[test]
fn dot_radius_does_not_affect_hit() {
    let mut doc = DocStore::new();
    let id = doc.add_dot(38.0, 20.0, 50.0, "white");
    assert!(dot_in(&bounds(0.0, 0.0, 40.0, 40.0), doc.dot(id).unwrap(), &Camera::default()));
}

#[test]
fn line_in_with_one_endpoint_inside() {
    let mut doc = DocStore::new();
    let a = doc.add_dot(10.0, 10.0, 5.0, "white");
    let b = doc.add_dot(100.0, 100.0, 5.0, "white");
    let line = doc.connect(&[a, b])[0];
    assert!(line_in(&bounds(0.0, 0.0, 40.0, 40.0), &line, &doc, &Camera::default()));
    assert!(line_in(&bounds(90.0, 90.0, 110.0, 110.0), &line, &doc, &Camera::default()));
}

#[test]
fn line_crossing_box_without_endpoints_misses() {
    let mut doc = DocStore::new();
    let a = doc.add_dot(-100.0, 20.0, 5.0, "white");
    let b = doc.add_dot(100.0, 20.0, 5.0, "white");
    let line = doc.connect(&[a, b])[0];
    assert!(!line_in(&bounds(0.0, 0.0, 40.0, 40.0), &line, &doc, &Camera::default()));
}

#[test]
fn line_with_missing_endpoint_misses() {
    let doc = DocStore::new();
    let line = Line { from: 0, to: 1 };
    assert!(!line_in(&bounds(-1e9, -1e9, 1e9, 1e9), &line, &doc, &Camera::default()));
}

#[test]
fn circle_in_scales_radius_by_grid_gap() {
    let mut doc = DocStore::new();
    let id = doc.add_circle(30.0, 30.0, 1.0);
    let circle = doc.circle(id).unwrap();
    let camera = Camera { grid_gap: 50.0, ..Camera::default() };
    assert!(!circle_in(&bounds(0.0, 0.0, 60.0, 60.0), circle, &camera));
    assert!(!circle_in(&bounds(-20.0, -20.0, 80.0, 80.0), circle, &camera));
    assert!(circle_in(&bounds(-21.0, -21.0, 81.0, 81.0), circle, &camera));
    let fine = Camera { grid_gap: 20.0, ..Camera::default() };
    assert!(circle_in(&bounds(0.0, 0.0, 60.0, 60.0), circle, &fine));
}
