use super::*;
use crate::foundation::core::PixelBounds;

const WHITE: Px = [1.0, 1.0, 1.0, 1.0];

fn dot() -> Surface {
    let mut s = Surface::new(PixelBounds::new(0, 0, 7, 7));
    *s.get_mut(3, 3).unwrap() = WHITE;
    s
}

#[test]
fn kernel_rows_follow_an_ellipse() {
    assert_eq!(kernel_spans(1, 1), vec![0, 1, 0]);
    assert_eq!(kernel_spans(2, 2), vec![0, 1, 2, 1, 0]);
    assert_eq!(kernel_spans(3, 0), vec![3]);
}

#[test]
fn dilate_grows_a_dot_into_a_disc() {
    let out = morphology(&dot(), MorphologyOperator::Dilate, 1.0, 1.0, false);
    assert_eq!(out.get(3, 3), WHITE);
    assert_eq!(out.get(2, 3), WHITE);
    assert_eq!(out.get(3, 4), WHITE);
    assert_eq!(out.get(2, 2), TRANSPARENT_PX);
    assert_eq!(out.get(1, 3), TRANSPARENT_PX);

    let wide = morphology(&dot(), MorphologyOperator::Dilate, 2.0, 2.0, false);
    assert_eq!(wide.get(1, 3), WHITE);
    assert_eq!(wide.get(2, 2), WHITE);
    assert_eq!(wide.get(1, 1), TRANSPARENT_PX);
}

#[test]
fn erode_removes_a_dot() {
    let out = morphology(&dot(), MorphologyOperator::Erode, 1.0, 0.0, false);
    assert!(out.data.iter().all(|p| *p == TRANSPARENT_PX));
}

#[test]
fn erode_shrinks_from_transparent_edges() {
    let mut s = Surface::new(PixelBounds::new(0, 0, 5, 5));
    s.fill(WHITE);
    let out = morphology(&s, MorphologyOperator::Erode, 1.0, 1.0, true);
    assert_eq!(out.get(2, 2), WHITE);
    assert_eq!(out.get(0, 2), TRANSPARENT_PX);
    assert_eq!(out.get(2, 4), TRANSPARENT_PX);
    assert_eq!(out.get(0, 0), TRANSPARENT_PX);
}

#[test]
fn parallel_matches_serial() {
    let mut s = Surface::new(PixelBounds::new(0, 0, 9, 6));
    for (i, p) in s.data.iter_mut().enumerate() {
        let v = (i % 7) as f32 / 7.0;
        *p = [v, v * 0.5, 0.0, v];
    }
    let a = morphology(&s, MorphologyOperator::Dilate, 2.0, 1.0, false);
    let b = morphology(&s, MorphologyOperator::Dilate, 2.0, 1.0, true);
    assert_eq!(a, b);
}

#[test]
fn zero_or_invalid_radius_is_identity() {
    let s = dot();
    assert_eq!(morphology(&s, MorphologyOperator::Dilate, 0.0, 0.0, false), s);
    assert_eq!(morphology(&s, MorphologyOperator::Erode, 0.2, f64::NAN, false), s);
}
