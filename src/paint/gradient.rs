use std::sync::Arc;

use crate::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::{clamp01, lerp_px};

/// Behavior outside the `[0, 1]` gradient (or tile) range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMethod {
    #[default]
    Pad,
    Reflect,
    Repeat,
}

impl SpreadMethod {
    /// Map an unbounded parameter into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            SpreadMethod::Pad => t.clamp(0.0, 1.0),
            SpreadMethod::Repeat => t - t.floor(),
            SpreadMethod::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// Coordinate system gradient geometry is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientUnits {
    /// User space of the draw (current transform applies).
    #[default]
    UserSpace,
    /// Unit square mapped onto the drawn path's bounding box.
    ObjectBoundingBox,
}

impl GradientUnits {
    /// Map a user-space point into gradient space. `None` for a degenerate bounding box.
    pub(crate) fn to_gradient_space(self, p: Point, bbox: Rect) -> Option<Point> {
        match self {
            GradientUnits::UserSpace => Some(p),
            GradientUnits::ObjectBoundingBox => {
                let (w, h) = (bbox.width(), bbox.height());
                if w <= 0.0 || h <= 0.0 {
                    return None;
                }
                Some(Point::new((p.x - bbox.x0) / w, (p.y - bbox.y0) / h))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Normalized stop list: offsets clamped to `[0, 1]` and forced non-decreasing.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStops(Arc<[GradientStop]>);

impl GradientStops {
    pub fn new(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let mut max = 0.0f32;
        let stops: Vec<GradientStop> = stops
            .into_iter()
            .map(|s| {
                let offset = clamp01(s.offset).max(max);
                max = offset;
                GradientStop {
                    offset,
                    color: s.color,
                }
            })
            .collect();
        Self(stops.into())
    }

    pub fn as_slice(&self) -> &[GradientStop] {
        &self.0
    }

    /// Color at `t ∈ [0, 1]`, interpolated in premultiplied linear space.
    pub fn sample(&self, t: f32) -> Color {
        let stops = &self.0;
        let Some(first) = stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t < b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.color;
                }
                let u = (t - a.offset) / span;
                return Color::from_px(lerp_px(a.color.to_px(), b.color.to_px(), u));
            }
        }
        stops[stops.len() - 1].color
    }
}

impl<const N: usize> From<[GradientStop; N]> for GradientStops {
    fn from(value: [GradientStop; N]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<GradientStop>> for GradientStops {
    fn from(value: Vec<GradientStop>) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub p1: Point,
    pub p2: Point,
    pub stops: GradientStops,
    pub spread: SpreadMethod,
    pub units: GradientUnits,
}

impl LinearGradient {
    pub fn new(p1: Point, p2: Point, stops: impl Into<GradientStops>) -> Self {
        Self {
            p1,
            p2,
            stops: stops.into(),
            spread: SpreadMethod::Pad,
            units: GradientUnits::UserSpace,
        }
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_units(mut self, units: GradientUnits) -> Self {
        self.units = units;
        self
    }

    /// Unspread gradient parameter at `p` (gradient space).
    pub fn param_at(&self, p: Point) -> Option<f64> {
        let d = self.p2 - self.p1;
        let len2 = d.hypot2();
        if len2 <= f64::EPSILON {
            // Zero-length vector paints the last stop.
            return Some(1.0);
        }
        Some((p - self.p1).dot(d) / len2)
    }

    pub(crate) fn color_at(&self, user: Point, bbox: Rect) -> Color {
        let Some(p) = self.units.to_gradient_space(user, bbox) else {
            return Color::TRANSPARENT;
        };
        match self.param_at(p) {
            Some(t) => self.stops.sample(self.spread.apply(t) as f32),
            None => Color::TRANSPARENT,
        }
    }
}

/// Two-point conical gradient between a focal circle and an outer circle.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub focal: Point,
    pub focal_radius: f64,
    pub stops: GradientStops,
    pub spread: SpreadMethod,
    pub units: GradientUnits,
}

impl RadialGradient {
    /// Simple radial gradient whose focal point is the center.
    pub fn new(center: Point, radius: f64, stops: impl Into<GradientStops>) -> Self {
        Self {
            center,
            radius,
            focal: center,
            focal_radius: 0.0,
            stops: stops.into(),
            spread: SpreadMethod::Pad,
            units: GradientUnits::UserSpace,
        }
    }

    pub fn with_focal(mut self, focal: Point, focal_radius: f64) -> Self {
        self.focal = focal;
        self.focal_radius = focal_radius;
        self
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_units(mut self, units: GradientUnits) -> Self {
        self.units = units;
        self
    }

    /// Largest `t` with `r(t) >= 0` such that `p` lies on circle `t`, where circle 0 is the
    /// focal circle and circle 1 the outer circle. `None` where no circle passes through `p`.
    pub fn param_at(&self, p: Point) -> Option<f64> {
        let cd = self.center - self.focal;
        let dr = self.radius - self.focal_radius;
        let pd = p - self.focal;

        let a = cd.hypot2() - dr * dr;
        let b = pd.dot(cd) + self.focal_radius * dr;
        let c = pd.hypot2() - self.focal_radius * self.focal_radius;

        let valid = |t: f64| self.focal_radius + t * dr >= 0.0;

        if a.abs() < 1e-9 {
            if b.abs() < 1e-12 {
                return None;
            }
            let t = c / (2.0 * b);
            return valid(t).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t1 = (b + sq) / a;
        let t2 = (b - sq) / a;
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
        if valid(hi) {
            Some(hi)
        } else if valid(lo) {
            Some(lo)
        } else {
            None
        }
    }

    pub(crate) fn color_at(&self, user: Point, bbox: Rect) -> Color {
        let Some(p) = self.units.to_gradient_space(user, bbox) else {
            return Color::TRANSPARENT;
        };
        match self.param_at(p) {
            Some(t) => self.stops.sample(self.spread.apply(t) as f32),
            None => Color::TRANSPARENT,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/gradient.rs"]
mod tests;
