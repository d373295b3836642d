use super::*;

const RED: Px = [1.0, 0.0, 0.0, 1.0];

#[test]
fn reads_outside_bounds_are_transparent() {
    let mut s = Surface::new(PixelBounds::new(10, 10, 12, 12));
    *s.get_mut(11, 10).unwrap() = RED;
    assert_eq!(s.get(11, 10), RED);
    assert_eq!(s.get(0, 0), TRANSPARENT_PX);
    assert!(s.get_mut(12, 12).is_none());
    assert_eq!((s.width(), s.height()), (2, 2));
}

#[test]
fn rebound_keeps_overlapping_pixels() {
    let mut s = Surface::new(PixelBounds::new(0, 0, 4, 4));
    s.fill(RED);
    let r = s.rebound(PixelBounds::new(2, 2, 6, 6));
    assert_eq!(r.get(3, 3), RED);
    assert_eq!(r.get(4, 4), TRANSPARENT_PX);
    assert_eq!(r.data.len(), 16);
}

#[test]
fn coverage_multiply_spans_overlap() {
    let a = Coverage::filled(PixelBounds::new(0, 0, 4, 4), 0.5);
    let b = Coverage::filled(PixelBounds::new(2, 0, 6, 4), 0.5);
    let c = a.multiply(&b);
    assert_eq!(c.bounds, PixelBounds::new(2, 0, 4, 4));
    assert_eq!(c.at(3, 1), 0.25);
    assert_eq!(c.at(0, 0), 0.0);
    assert!(Coverage::filled(PixelBounds::EMPTY, 0.0).multiply(&a).data.is_empty());
}

#[test]
fn coverage_from_surface_alpha() {
    let mut s = Surface::new(PixelBounds::new(0, 0, 1, 1));
    s.fill([0.2, 0.2, 0.2, 0.4]);
    let c = Coverage::from_surface(&s, |p| p[3]);
    assert_eq!(c.at(0, 0), 0.4);
}

#[test]
fn coverage_from_values_checks_length_and_clamps() {
    let b = PixelBounds::new(0, 0, 2, 1);
    let c = Coverage::from_values(b, vec![1.5, -0.5]).unwrap();
    assert_eq!(c.at(0, 0), 1.0);
    assert_eq!(c.at(1, 0), 0.0);
    assert_eq!(c.bounds(), b);
    assert!(Coverage::from_values(b, vec![0.5]).is_err());
}
