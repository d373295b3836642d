use smallvec::SmallVec;

use crate::paint::Paint;
use crate::paint::stroke::StrokeStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Which passes a style draws, and in which order.
///
/// `Fill` and `Stroke` draw only that pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintOrder {
    Fill,
    Stroke,
    #[default]
    FillThenStroke,
    StrokeThenFill,
}

/// A single draw pass produced by a [`Style`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylePass {
    Fill,
    Stroke,
}

/// Appearance bound to a path draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_style: Option<StrokeStyle>,
    pub fill_rule: FillRule,
    pub paint_order: PaintOrder,
}

impl Style {
    pub fn fill(paint: impl Into<Paint>) -> Self {
        Self {
            fill: Some(paint.into()),
            ..Self::default()
        }
    }

    pub fn stroke(paint: impl Into<Paint>, style: StrokeStyle) -> Self {
        Self {
            stroke: Some(paint.into()),
            stroke_style: Some(style),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, paint: impl Into<Paint>) -> Self {
        self.fill = Some(paint.into());
        self
    }

    pub fn with_stroke(mut self, paint: impl Into<Paint>, style: StrokeStyle) -> Self {
        self.stroke = Some(paint.into());
        self.stroke_style = Some(style);
        self
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    pub fn with_paint_order(mut self, order: PaintOrder) -> Self {
        self.paint_order = order;
        self
    }

    /// Stroke geometry, defaulting to a 1-unit solid stroke.
    pub fn effective_stroke_style(&self) -> StrokeStyle {
        match &self.stroke_style {
            Some(s) => s.clone(),
            None => StrokeStyle::hairline(),
        }
    }

    /// Passes to draw, in order. Passes without a paint are skipped.
    pub fn passes(&self) -> SmallVec<[StylePass; 2]> {
        let order: &[StylePass] = match self.paint_order {
            PaintOrder::Fill => &[StylePass::Fill],
            PaintOrder::Stroke => &[StylePass::Stroke],
            PaintOrder::FillThenStroke => &[StylePass::Fill, StylePass::Stroke],
            PaintOrder::StrokeThenFill => &[StylePass::Stroke, StylePass::Fill],
        };
        order
            .iter()
            .copied()
            .filter(|pass| match pass {
                StylePass::Fill => self.fill.is_some(),
                StylePass::Stroke => self.stroke.is_some(),
            })
            .collect()
    }

    /// `true` when drawing with this style produces nothing.
    pub fn is_noop(&self) -> bool {
        self.passes().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/style.rs"]
mod tests;
