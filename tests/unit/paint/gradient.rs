use super::*;

fn bw() -> GradientStops {
    GradientStops::new([
        GradientStop::new(0.0, Color::BLACK),
        GradientStop::new(1.0, Color::WHITE),
    ])
}

#[test]
fn stops_are_clamped_and_monotonic() {
    let stops = GradientStops::new([
        GradientStop::new(0.5, Color::BLACK),
        GradientStop::new(0.2, Color::WHITE),
        GradientStop::new(1.7, Color::WHITE),
    ]);
    let offsets: Vec<f32> = stops.as_slice().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.5, 0.5, 1.0]);
}

#[test]
fn out_of_order_stop_snaps_to_previous_offset() {
    let red = Color::from_srgb8(255, 0, 0);
    let blue = Color::from_srgb8(0, 0, 255);
    let stops = GradientStops::new([GradientStop::new(0.8, red), GradientStop::new(0.2, blue)]);
    let offsets: Vec<f32> = stops.as_slice().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.8, 0.8]);
    // Declaration order wins: the late stop becomes a hard edge, not an earlier color.
    assert_eq!(stops.sample(0.1), red);
    assert_eq!(stops.sample(0.8), red);
    assert_eq!(stops.sample(0.9), blue);
}

#[test]
fn sample_interpolates_in_linear_space() {
    let mid = bw().sample(0.5);
    assert!((mid.to_linear()[0] - 0.5).abs() < 1e-6);
    assert_eq!(bw().sample(-1.0), Color::BLACK);
    assert_eq!(bw().sample(2.0), Color::WHITE);
    assert_eq!(GradientStops::new([]).sample(0.3), Color::TRANSPARENT);
}

#[test]
fn transparent_to_opaque_stays_on_hue() {
    let red = Color::from_srgb8(255, 0, 0);
    let stops = GradientStops::new([
        GradientStop::new(0.0, Color::TRANSPARENT),
        GradientStop::new(1.0, red),
    ]);
    let mid = stops.sample(0.5).to_linear();
    assert!((mid[0] - 1.0).abs() < 1e-6);
    assert!((mid[3] - 0.5).abs() < 1e-6);
}

#[test]
fn spread_methods() {
    assert_eq!(SpreadMethod::Pad.apply(1.4), 1.0);
    assert!((SpreadMethod::Repeat.apply(1.25) - 0.25).abs() < 1e-12);
    assert!((SpreadMethod::Reflect.apply(1.25) - 0.75).abs() < 1e-12);
    assert!((SpreadMethod::Reflect.apply(-0.25) - 0.25).abs() < 1e-12);
}

#[test]
fn linear_param_projects_onto_axis() {
    let g = LinearGradient::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), bw());
    assert_eq!(g.param_at(Point::new(25.0, 40.0)), Some(0.25));
    let c = g.color_at(Point::new(100.0, 3.0), Rect::ZERO);
    assert_eq!(c, Color::WHITE);
}

#[test]
fn bounding_box_units_map_into_unit_square() {
    let g = LinearGradient::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), bw())
        .with_units(GradientUnits::ObjectBoundingBox);
    let bbox = Rect::new(100.0, 0.0, 200.0, 10.0);
    let c = g.color_at(Point::new(150.0, 5.0), bbox);
    assert!((c.to_linear()[0] - 0.5).abs() < 1e-6);
    // Degenerate box paints nothing.
    assert_eq!(g.color_at(Point::new(1.0, 1.0), Rect::new(0.0, 0.0, 0.0, 5.0)), Color::TRANSPARENT);
}

#[test]
fn radial_param_is_distance_over_radius() {
    let g = RadialGradient::new(Point::new(50.0, 50.0), 20.0, bw());
    let t = g.param_at(Point::new(60.0, 50.0)).unwrap();
    assert!((t - 0.5).abs() < 1e-9);
    let t = g.param_at(Point::new(50.0, 50.0)).unwrap();
    assert!(t.abs() < 1e-9);
}

#[test]
fn radial_with_focal_point_hits_outer_circle_at_one() {
    let g = RadialGradient::new(Point::new(0.0, 0.0), 10.0, bw())
        .with_focal(Point::new(5.0, 0.0), 0.0);
    let t = g.param_at(Point::new(-10.0, 0.0)).unwrap();
    assert!((t - 1.0).abs() < 1e-9);
    let t = g.param_at(Point::new(5.0, 0.0)).unwrap();
    assert!(t.abs() < 1e-9);
}
