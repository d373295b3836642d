use super::*;

#[test]
fn transfer_round_trips_every_byte() {
    for v in 0..=255u8 {
        assert_eq!(linear_to_srgb8(srgb8_to_linear(v)), v);
    }
}

#[test]
fn transfer_knee_is_continuous() {
    let below = srgb_to_linear(0.04045);
    let above = srgb_to_linear(0.040_46);
    assert!((above - below).abs() < 1e-5);
    assert!((linear_to_srgb(0.5) - 0.735_357).abs() < 1e-4);
}

#[test]
fn luma_weights_sum_to_one() {
    assert!((luma(1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
    assert_eq!(luma(0.0, 0.0, 0.0), 0.0);
}
