use crate::foundation::error::{StratumError, StratumResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero extent.
    pub fn new(width: u32, height: u32) -> StratumResult<Self> {
        if width == 0 || height == 0 {
            return Err(StratumError::validation("Canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Pixel bounds covering the whole canvas.
    pub fn bounds(self) -> PixelBounds {
        PixelBounds::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Half-open integer pixel rectangle `[x0, x1) x [y0, y1)` in device space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PixelBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelBounds {
    pub const EMPTY: Self = Self {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };

    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest pixel rectangle containing `rect`.
    ///
    /// Non-finite or empty rectangles map to [`PixelBounds::EMPTY`].
    pub fn from_rect_outer(rect: Rect) -> Self {
        if !(rect.x0.is_finite()
            && rect.y0.is_finite()
            && rect.x1.is_finite()
            && rect.y1.is_finite())
            || rect.x1 <= rect.x0
            || rect.y1 <= rect.y0
        {
            return Self::EMPTY;
        }
        let lim = f64::from(i32::MAX / 2);
        Self {
            x0: rect.x0.floor().clamp(-lim, lim) as i32,
            y0: rect.y0.floor().clamp(-lim, lim) as i32,
            x1: rect.x1.ceil().clamp(-lim, lim) as i32,
            y1: rect.y1.ceil().clamp(-lim, lim) as i32,
        }
    }

    pub fn width(self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    pub fn area(self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn intersect(self, other: Self) -> Self {
        let out = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if out.is_empty() { Self::EMPTY } else { out }
    }

    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Grow each edge outwards by `(dx, dy)` pixels.
    pub fn inflate(self, dx: i32, dy: i32) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            x0: self.x0.saturating_sub(dx),
            y0: self.y0.saturating_sub(dy),
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
        }
    }

    /// Row-major index of device pixel `(x, y)`; `None` outside the bounds.
    pub fn index_of(self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(((y - self.y0) as usize) * (self.width() as usize) + (x - self.x0) as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
