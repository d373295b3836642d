use super::*;

fn checker() -> Image {
    Image::from_colors(
        2,
        2,
        vec![Color::BLACK, Color::WHITE, Color::WHITE, Color::BLACK],
    )
    .unwrap()
}

#[test]
fn image_rejects_wrong_length() {
    assert!(Image::from_colors(2, 2, vec![Color::BLACK]).is_err());
    assert!(Image::from_srgba8(1, 1, &[0, 0, 0]).is_err());
    assert!(Image::from_srgba8(0, 1, &[]).is_err());
}

#[test]
fn srgba8_image_is_linear_premultiplied() {
    let img = Image::from_srgba8(1, 1, &[255, 255, 255, 128]).unwrap();
    let px = img.pixel(0, 0).unwrap().to_linear_premul();
    assert!((px[0] - 128.0 / 255.0).abs() < 1e-6);
    assert!((px[3] - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn sampling_at_texel_centers_is_exact() {
    let img = checker();
    assert_eq!(img.sample(0.5, 0.5, SpreadMethod::Pad), Color::BLACK.to_px());
    assert_eq!(img.sample(1.5, 0.5, SpreadMethod::Pad), Color::WHITE.to_px());
    // Halfway between black and white texels.
    let mid = img.sample(1.0, 0.5, SpreadMethod::Pad);
    assert!((mid[0] - 0.5).abs() < 1e-6);
}

#[test]
fn pattern_repeats_per_tile() {
    let pat = Pattern::new(checker(), Vec2::new(20.0, 20.0));
    assert_eq!(pat.color_at(Point::new(5.0, 5.0)), Color::BLACK);
    assert_eq!(pat.color_at(Point::new(15.0, 5.0)), Color::WHITE);
    assert_eq!(pat.color_at(Point::new(25.0, 5.0)), Color::BLACK);
    assert_eq!(pat.color_at(Point::new(-5.0, 5.0)), Color::WHITE);
}

#[test]
fn reflect_mirrors_indices() {
    assert_eq!(reflect(-1, 3), 0);
    assert_eq!(reflect(3, 3), 2);
    assert_eq!(reflect(5, 3), 0);
}
