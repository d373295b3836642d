//! What gets painted: solid colors, gradients, image patterns, plus stroke geometry and styles.

pub mod gradient;
pub mod pattern;
pub mod stroke;
pub mod style;

pub use gradient::{
    GradientStop, GradientStops, GradientUnits, LinearGradient, RadialGradient, SpreadMethod,
};
pub use pattern::{Image, Pattern};
pub use stroke::{LineCap, LineJoin, StrokeStyle, StrokeStyleBuilder};
pub use style::{FillRule, PaintOrder, Style, StylePass};

use crate::color::Color;
use crate::foundation::core::{Point, Rect};

/// Paint source for a fill or stroke pass. Evaluated in the draw's user space.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    Pattern(Pattern),
}

impl Paint {
    /// Color at a user-space point. `bbox` is the drawn path's bounds, used by
    /// bounding-box gradient units.
    pub fn color_at(&self, user: Point, bbox: Rect) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::LinearGradient(g) => g.color_at(user, bbox),
            Paint::RadialGradient(g) => g.color_at(user, bbox),
            Paint::Pattern(p) => p.color_at(user),
        }
    }

    /// Uniform color, if the paint does not vary over space.
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Paint::Solid(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Paint::Solid(value)
    }
}

impl From<LinearGradient> for Paint {
    fn from(value: LinearGradient) -> Self {
        Paint::LinearGradient(value)
    }
}

impl From<RadialGradient> for Paint {
    fn from(value: RadialGradient) -> Self {
        Paint::RadialGradient(value)
    }
}

impl From<Pattern> for Paint {
    fn from(value: Pattern) -> Self {
        Paint::Pattern(value)
    }
}
