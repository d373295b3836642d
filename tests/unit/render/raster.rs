use super::*;
use crate::geometry::Path;

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Path::builder().rect(x0, y0, x1 - x0, y1 - y0).build().bez().clone()
}

#[test]
fn axis_aligned_rect_has_full_inside_and_zero_outside() {
    let mut r = CpuRasterizer::new();
    let region = PixelBounds::new(0, 0, 20, 20);
    let cov = r
        .fill_coverage(&rect_path(2.0, 2.0, 10.0, 10.0), FillRule::NonZero, region)
        .unwrap();
    assert_eq!(cov.bounds, region);
    assert_eq!(cov.at(5, 5), 1.0);
    assert_eq!(cov.at(2, 2), 1.0);
    assert_eq!(cov.at(9, 9), 1.0);
    assert_eq!(cov.at(10, 10), 0.0);
    assert_eq!(cov.at(15, 3), 0.0);
}

#[test]
fn region_origin_is_respected() {
    let mut r = CpuRasterizer::new();
    let region = PixelBounds::new(100, 50, 110, 60);
    let cov = r
        .fill_coverage(&rect_path(100.0, 50.0, 105.0, 55.0), FillRule::NonZero, region)
        .unwrap();
    assert_eq!(cov.at(101, 51), 1.0);
    assert_eq!(cov.at(107, 57), 0.0);
}

#[test]
fn even_odd_leaves_a_hole() {
    let outer = Path::builder()
        .rect(0.0, 0.0, 20.0, 20.0)
        .rect(5.0, 5.0, 10.0, 10.0)
        .build();
    let mut r = CpuRasterizer::new();
    let region = PixelBounds::new(0, 0, 20, 20);
    let eo = r
        .fill_coverage(outer.bez(), FillRule::EvenOdd, region)
        .unwrap();
    let nz = r
        .fill_coverage(outer.bez(), FillRule::NonZero, region)
        .unwrap();
    assert_eq!(eo.at(10, 10), 0.0);
    assert_eq!(nz.at(10, 10), 1.0);
    assert_eq!(eo.at(2, 2), 1.0);
}

#[test]
fn empty_region_yields_empty_coverage() {
    let mut r = CpuRasterizer::new();
    let cov = r
        .fill_coverage(&rect_path(0.0, 0.0, 5.0, 5.0), FillRule::NonZero, PixelBounds::EMPTY)
        .unwrap();
    assert!(cov.data.is_empty());
}
