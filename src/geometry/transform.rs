use std::ops::Mul;

use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{StratumError, StratumResult};

const SINGULAR_EPSILON: f64 = 1e-12;

/// Immutable 2x3 affine matrix `(a, b, c, d, e, f)`.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`. `m.multiply(n)` right-multiplies, so `n`
/// is applied to a point first and `m` last.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, s, 0.0, 0.0)
    }

    pub const fn scale_non_uniform(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `radians`, counter-clockwise in a y-up frame (clockwise on screen).
    pub fn rotate(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    pub fn skew_x(radians: f64) -> Self {
        Self::new(1.0, 0.0, radians.tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(radians: f64) -> Self {
        Self::new(1.0, radians.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    pub fn coeffs(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// `self × other`: `other` is applied to points first.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(
            self.a * other.a + self.c * other.b,
            self.b * other.a + self.d * other.b,
            self.a * other.c + self.c * other.d,
            self.b * other.c + self.d * other.d,
            self.a * other.e + self.c * other.f + self.e,
            self.b * other.e + self.d * other.f + self.f,
        )
    }

    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > SINGULAR_EPSILON
    }

    pub fn invert(self) -> StratumResult<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON {
            return Err(StratumError::singular(det));
        }
        let inv = 1.0 / det;
        Ok(Self::new(
            self.d * inv,
            -self.b * inv,
            -self.c * inv,
            self.a * inv,
            (self.c * self.f - self.d * self.e) * inv,
            (self.b * self.e - self.a * self.f) * inv,
        ))
    }

    pub fn apply(self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Apply the linear part only (no translation).
    pub fn apply_vector(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Length of the transformed unit x and y axes.
    pub fn scale_factors(self) -> (f64, f64) {
        (self.a.hypot(self.b), self.c.hypot(self.d))
    }

    /// Axis-aligned bounding box of the transformed rectangle.
    pub fn transform_rect_bbox(self, rect: Rect) -> Rect {
        self.as_affine().transform_rect_bbox(rect)
    }

    pub fn as_affine(self) -> Affine {
        Affine::new(self.coeffs())
    }

    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self::new(a, b, c, d, e, f)
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl From<Affine> for Transform {
    fn from(value: Affine) -> Self {
        Self::from_affine(value)
    }
}

impl From<Transform> for Affine {
    fn from(value: Transform) -> Self {
        value.as_affine()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
