use super::*;

const RED: Px = [1.0, 0.0, 0.0, 1.0];
const WHITE: Px = [1.0, 1.0, 1.0, 1.0];
const CLEAR: Px = [0.0; 4];

fn approx(a: Px, b: Px) {
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-5, "{a:?} != {b:?}");
    }
}

#[test]
fn src_over_matches_porter_duff() {
    let half_red = [0.5, 0.0, 0.0, 0.5];
    approx(blend_px(BlendMode::SrcOver, half_red, WHITE, 1.0), [1.0, 0.5, 0.5, 1.0]);
    approx(blend_px(BlendMode::SrcOver, RED, WHITE, 0.5), [1.0, 0.5, 0.5, 1.0]);
    approx(blend_px(BlendMode::SrcOver, RED, CLEAR, 0.25), [0.25, 0.0, 0.0, 0.25]);
}

#[test]
fn zero_coverage_leaves_destination() {
    for mode in [BlendMode::Clear, BlendMode::Src, BlendMode::Multiply, BlendMode::Hue] {
        assert_eq!(blend_px(mode, RED, WHITE, 0.0), WHITE);
    }
}

#[test]
fn porter_duff_operators() {
    approx(blend_px(BlendMode::Clear, RED, WHITE, 1.0), CLEAR);
    approx(blend_px(BlendMode::Src, CLEAR, WHITE, 1.0), CLEAR);
    approx(blend_px(BlendMode::Dst, RED, WHITE, 1.0), WHITE);
    approx(blend_px(BlendMode::SrcIn, RED, CLEAR, 1.0), CLEAR);
    approx(blend_px(BlendMode::SrcIn, RED, WHITE, 1.0), RED);
    approx(blend_px(BlendMode::DstOut, RED, WHITE, 1.0), CLEAR);
    approx(blend_px(BlendMode::Xor, RED, WHITE, 1.0), CLEAR);
    approx(blend_px(BlendMode::DstOver, RED, CLEAR, 1.0), RED);
    approx(blend_px(BlendMode::Plus, RED, WHITE, 1.0), WHITE);
}

#[test]
fn separable_mix_modes_on_opaque_pixels() {
    let gray = [0.5, 0.5, 0.5, 1.0];
    approx(blend_px(BlendMode::Multiply, RED, WHITE, 1.0), RED);
    approx(blend_px(BlendMode::Multiply, gray, gray, 1.0), [0.25, 0.25, 0.25, 1.0]);
    approx(blend_px(BlendMode::Screen, gray, gray, 1.0), [0.75, 0.75, 0.75, 1.0]);
    approx(blend_px(BlendMode::Difference, WHITE, RED, 1.0), [0.0, 1.0, 1.0, 1.0]);
    approx(blend_px(BlendMode::Darken, RED, WHITE, 1.0), RED);
    approx(blend_px(BlendMode::Lighten, RED, WHITE, 1.0), WHITE);
}

#[test]
fn mix_modes_over_transparent_backdrop_return_source() {
    for mode in [BlendMode::Multiply, BlendMode::Overlay, BlendMode::Color, BlendMode::Hue] {
        approx(blend_px(mode, RED, CLEAR, 1.0), RED);
    }
}

#[test]
fn luminosity_keeps_backdrop_hue() {
    let out = blend_px(BlendMode::Luminosity, WHITE, RED, 1.0);
    // White luminosity onto red clips to white.
    approx(out, WHITE);
    let black = [0.0, 0.0, 0.0, 1.0];
    approx(blend_px(BlendMode::Color, RED, black, 1.0), black);
}

#[test]
fn unbounded_modes() {
    assert!(BlendMode::SrcIn.is_unbounded());
    assert!(!BlendMode::SrcOver.is_unbounded());
    assert!(!BlendMode::Multiply.is_unbounded());
    assert!(BlendMode::Xor.is_porter_duff());
    assert!(!BlendMode::Screen.is_porter_duff());
}
