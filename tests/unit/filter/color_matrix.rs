use super::*;
use crate::foundation::core::PixelBounds;
use crate::foundation::math::Px;

fn one(p: Px) -> Surface {
    let mut s = Surface::new(PixelBounds::new(0, 0, 1, 1));
    s.fill(p);
    s
}

fn approx(a: Px, b: Px) {
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-3, "{a:?} != {b:?}");
    }
}

#[test]
fn identity_matrix_is_passthrough() {
    let s = one([0.2, 0.1, 0.05, 0.5]);
    assert_eq!(apply(&s, &IDENTITY), s);
    assert_eq!(apply(&s, &saturate(1.0)).data.len(), 1);
    approx(apply(&s, &saturate(1.0)).data[0], s.data[0]);
    approx(apply(&s, &hue_rotate(0.0)).data[0], s.data[0]);
}

#[test]
fn saturate_zero_is_grayscale() {
    let out = apply(&one([1.0, 0.0, 0.0, 1.0]), &saturate(0.0));
    let p = out.data[0];
    approx(p, [0.213, 0.213, 0.213, 1.0]);
}

#[test]
fn matrix_operates_on_unpremultiplied_values() {
    // Straight red at half alpha; doubling red stays clamped at full intensity.
    let mut m = IDENTITY;
    m[0] = 2.0;
    let out = apply(&one([0.5, 0.0, 0.0, 0.5]), &m);
    approx(out.data[0], [0.5, 0.0, 0.0, 0.5]);
}

#[test]
fn luminance_to_alpha_clears_rgb() {
    let m = matrix_for(&ColorMatrixKind::LuminanceToAlpha);
    let out = apply(&one([1.0, 1.0, 1.0, 1.0]), &m);
    let [r, g, b] = LUMA_WEIGHTS;
    approx(out.data[0], [0.0, 0.0, 0.0, r + g + b]);
}

#[test]
fn hue_rotate_full_turn_is_identity() {
    let s = one([0.6, 0.3, 0.1, 1.0]);
    approx(apply(&s, &hue_rotate(360.0)).data[0], s.data[0]);
}
