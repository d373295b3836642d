use super::*;

fn params(seed: i32, kind: TurbulenceKind) -> TurbulenceParams {
    TurbulenceParams {
        base_freq_x: 0.05,
        base_freq_y: 0.05,
        num_octaves: 3,
        seed,
        kind,
    }
}

#[test]
fn park_miller_step_matches_reference() {
    assert_eq!(random(1), 16_807);
    assert_eq!(random(16_807), 282_475_249);
}

#[test]
fn same_seed_is_bit_identical_serial_and_parallel() {
    let b = PixelBounds::new(0, 0, 16, 8);
    let p = params(7, TurbulenceKind::FractalNoise);
    let a = render(b, Transform::IDENTITY, &p, false);
    let c = render(b, Transform::IDENTITY, &p, true);
    assert_eq!(a, c);
    assert_eq!(a, render(b, Transform::IDENTITY, &p, false));
}

#[test]
fn different_seeds_differ() {
    let b = PixelBounds::new(0, 0, 16, 8);
    let a = render(b, Transform::IDENTITY, &params(1, TurbulenceKind::Turbulence), false);
    let c = render(b, Transform::IDENTITY, &params(2, TurbulenceKind::Turbulence), false);
    assert_ne!(a, c);
}

#[test]
fn output_is_valid_premultiplied() {
    let b = PixelBounds::new(-4, -4, 12, 12);
    let out = render(b, Transform::IDENTITY, &params(3, TurbulenceKind::FractalNoise), false);
    for p in &out.data {
        assert!((0.0..=1.0).contains(&p[3]));
        assert!(p[0] <= p[3] && p[1] <= p[3] && p[2] <= p[3]);
    }
}

#[test]
fn lattice_is_a_permutation() {
    let t = NoiseTable::new(42);
    let mut seen = t.lattice[..BSIZE].to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..BSIZE).collect::<Vec<_>>());
}
