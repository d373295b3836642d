use super::*;

#[test]
fn rect_bounds_are_exact() {
    let p = PathBuilder::new().rect(10.0, 20.0, 30.0, 40.0).build();
    assert_eq!(p.bounds(), Rect::new(10.0, 20.0, 40.0, 60.0));
    assert_eq!(p.contours().len(), 1);
    assert!(p.contours()[0].closed);
}

#[test]
fn cubic_bounds_use_extrema_not_control_points() {
    let p = PathBuilder::new()
        .move_to(0.0, 0.0)
        .cubic_to(0.0, 100.0, 100.0, 100.0, 100.0, 0.0)
        .build();
    let b = p.bounds();
    // Peak of this symmetric cubic is at 75, well inside the control hull (100).
    assert!((b.y1 - 75.0).abs() < 1e-6, "got {b:?}");
    assert_eq!(b.x0, 0.0);
    assert_eq!(b.x1, 100.0);
}

#[test]
fn quad_bounds_reach_the_curve_peak() {
    let p = PathBuilder::new()
        .move_to(0.0, 0.0)
        .quad_to(50.0, 100.0, 100.0, 0.0)
        .build();
    let b = p.bounds();
    assert!((b.y1 - 50.0).abs() < 1e-6, "got {b:?}");
    assert_eq!(b.x1, 100.0);
}

#[test]
fn circle_bounds_match_radius() {
    let p = PathBuilder::new().circle(100.0, 100.0, 50.0).build();
    let b = p.bounds();
    assert!((b.x0 - 50.0).abs() < 0.02 && (b.x1 - 150.0).abs() < 0.02);
    assert!((b.y0 - 50.0).abs() < 0.02 && (b.y1 - 150.0).abs() < 0.02);
}

#[test]
fn line_without_move_starts_at_origin() {
    let p = PathBuilder::new().line_to(10.0, 0.0).line_to(10.0, 10.0).build();
    assert_eq!(p.contours()[0].points[0], Point::ORIGIN);
    assert!(!p.contours()[0].closed);
}

#[test]
fn arc_to_reaches_endpoint() {
    let p = PathBuilder::new()
        .move_to(0.0, 50.0)
        .arc_to(50.0, 50.0, 0.0, false, true, 100.0, 50.0)
        .build();
    let last = *p.contours()[0].points.last().unwrap();
    assert!((last.x - 100.0).abs() < 1e-6 && (last.y - 50.0).abs() < 1e-6);
    // Half circle bulges 50 units away from the chord.
    assert!((p.bounds().height() - 50.0).abs() < 0.05);
}

#[test]
fn degenerate_arc_is_a_line() {
    let p = PathBuilder::new()
        .move_to(0.0, 0.0)
        .arc_to(0.0, 10.0, 0.0, false, false, 10.0, 0.0)
        .build();
    assert_eq!(p.contours()[0].points, vec![Point::ORIGIN, Point::new(10.0, 0.0)]);
}

#[test]
fn clones_share_identity_and_cache() {
    let p = PathBuilder::new().rect(0.0, 0.0, 1.0, 1.0).build();
    let q = p.clone();
    assert!(p.ptr_eq(&q));
    assert_eq!(p.id(), q.id());
    assert!(std::ptr::eq(p.contours(), q.contours()));

    let other = PathBuilder::new().rect(0.0, 0.0, 1.0, 1.0).build();
    assert_ne!(p, other);
}

#[test]
fn drawing_after_close_restarts_at_subpath_start() {
    let p = PathBuilder::new()
        .move_to(5.0, 5.0)
        .line_to(6.0, 5.0)
        .close()
        .line_to(5.0, 9.0)
        .build();
    let contours = p.contours();
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[1].points[0], Point::new(5.0, 5.0));
}

#[test]
fn empty_path_has_zero_bounds() {
    let p = PathBuilder::new().build();
    assert!(p.is_empty());
    assert_eq!(p.bounds(), Rect::ZERO);
    assert!(p.contours().is_empty());
}
