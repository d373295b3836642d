use super::*;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn translations_compose_additively() {
    let p = Point::new(3.0, -4.0);
    let composed = Transform::translate(1.0, 2.0).multiply(Transform::translate(10.0, 20.0));
    assert!(close(composed.apply(p), Transform::translate(11.0, 22.0).apply(p)));
}

#[test]
fn last_multiplied_factor_applies_first() {
    let t = Transform::translate(10.0, 0.0) * Transform::scale(2.0);
    // Scale first, then translate.
    assert!(close(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0)));
}

#[test]
fn invert_round_trips() {
    let t = Transform::translate(5.0, -3.0)
        * Transform::rotate(0.7)
        * Transform::scale_non_uniform(2.0, 0.5);
    let inv = t.invert().unwrap();
    let p = Point::new(12.5, 7.25);
    assert!(close(inv.apply(t.apply(p)), p));
    assert!(close((t * inv).apply(p), p));
}

#[test]
fn singular_transform_fails_to_invert() {
    let err = Transform::scale_non_uniform(1.0, 0.0).invert().unwrap_err();
    assert!(matches!(err, StratumError::SingularTransform { .. }));
    assert!(!Transform::scale(0.0).is_invertible());
}

#[test]
fn affine_interop_matches_kurbo() {
    let t = Transform::rotate(0.3) * Transform::translate(4.0, 1.0);
    let p = Point::new(2.0, 9.0);
    assert!(close(t.as_affine() * p, t.apply(p)));
    assert_eq!(Transform::from_affine(t.as_affine()), t);
    let (sx, sy) = Transform::scale_non_uniform(3.0, 2.0).scale_factors();
    assert_eq!((sx, sy), (3.0, 2.0));
}
