use super::*;
use crate::color::Color;

fn red() -> Paint {
    Paint::Solid(Color::from_srgb8(255, 0, 0))
}

#[test]
fn passes_follow_paint_order() {
    let s = Style::fill(red()).with_stroke(red(), StrokeStyle::new(2.0).unwrap());
    assert_eq!(s.passes().as_slice(), &[StylePass::Fill, StylePass::Stroke]);

    let s = s.with_paint_order(PaintOrder::StrokeThenFill);
    assert_eq!(s.passes().as_slice(), &[StylePass::Stroke, StylePass::Fill]);

    let s = s.with_paint_order(PaintOrder::Stroke);
    assert_eq!(s.passes().as_slice(), &[StylePass::Stroke]);
}

#[test]
fn passes_without_paint_are_skipped() {
    let s = Style::fill(red()).with_paint_order(PaintOrder::StrokeThenFill);
    assert_eq!(s.passes().as_slice(), &[StylePass::Fill]);
    assert!(Style::default().is_noop());
    assert!(!Style::fill(red()).is_noop());
}

#[test]
fn stroke_without_geometry_uses_hairline() {
    let s = Style {
        stroke: Some(red()),
        ..Style::default()
    };
    assert_eq!(s.effective_stroke_style().width(), 1.0);
    assert_eq!(s.fill_rule, FillRule::NonZero);
}
