use crate::foundation::core::PixelBounds;
use crate::foundation::error::{StratumError, StratumResult};
use crate::foundation::math::{Px, TRANSPARENT_PX, clamp01};

/// Linear premultiplied pixels covering a device-space rectangle.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Surface {
    pub(crate) bounds: PixelBounds,
    pub(crate) data: Vec<Px>,
}

impl Surface {
    pub(crate) fn new(bounds: PixelBounds) -> Self {
        Self::from_data(bounds, vec![TRANSPARENT_PX; bounds.area()])
    }

    /// Wrap a buffer of `bounds.area()` pixels; the buffer is resized if it does not fit.
    pub(crate) fn from_data(bounds: PixelBounds, mut data: Vec<Px>) -> Self {
        data.resize(bounds.area(), TRANSPARENT_PX);
        Self { bounds, data }
    }

    pub(crate) fn width(&self) -> usize {
        self.bounds.width() as usize
    }

    pub(crate) fn height(&self) -> usize {
        self.bounds.height() as usize
    }

    /// Pixel at device `(x, y)`; transparent outside the bounds.
    pub(crate) fn get(&self, x: i32, y: i32) -> Px {
        self.bounds
            .index_of(x, y)
            .map(|i| self.data[i])
            .unwrap_or(TRANSPARENT_PX)
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Px> {
        self.bounds.index_of(x, y).map(|i| &mut self.data[i])
    }

    pub(crate) fn fill(&mut self, px: Px) {
        self.data.fill(px);
    }

    /// Copy of `other` restricted to (and padded out to) `self.bounds`.
    pub(crate) fn copy_from(&mut self, other: &Surface) {
        let overlap = self.bounds.intersect(other.bounds);
        for y in overlap.y0..overlap.y1 {
            for x in overlap.x0..overlap.x1 {
                if let Some(px) = self.get_mut(x, y) {
                    *px = other.get(x, y);
                }
            }
        }
    }

    /// Same content, re-homed onto `bounds`; pixels outside the old bounds are transparent.
    pub(crate) fn rebound(&self, bounds: PixelBounds) -> Surface {
        if bounds == self.bounds {
            return self.clone();
        }
        let mut out = Surface::new(bounds);
        out.copy_from(self);
        out
    }

    pub(crate) fn into_data(self) -> Vec<Px> {
        self.data
    }
}

/// Per-pixel coverage in `[0, 1]` over a device-space rectangle. Zero outside the bounds.
///
/// Produced by a [`Rasterizer`](crate::render::Rasterizer) for every fill, clip and mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Coverage {
    pub(crate) bounds: PixelBounds,
    pub(crate) data: Vec<f32>,
}

impl Coverage {
    pub(crate) fn filled(bounds: PixelBounds, value: f32) -> Self {
        Self {
            bounds,
            data: vec![value; bounds.area()],
        }
    }

    /// Row-major coverage values over `bounds`, clamped into `[0, 1]`.
    pub fn from_values(bounds: PixelBounds, mut data: Vec<f32>) -> StratumResult<Self> {
        if data.len() != bounds.area() {
            return Err(StratumError::validation(format!(
                "coverage for {}x{} needs {} values, got {}",
                bounds.width(),
                bounds.height(),
                bounds.area(),
                data.len()
            )));
        }
        for v in &mut data {
            *v = clamp01(*v);
        }
        Ok(Self { bounds, data })
    }

    pub fn bounds(&self) -> PixelBounds {
        self.bounds
    }

    pub fn at(&self, x: i32, y: i32) -> f32 {
        self.bounds.index_of(x, y).map(|i| self.data[i]).unwrap_or(0.0)
    }

    /// Pointwise product; the result only spans the overlap.
    pub(crate) fn multiply(&self, other: &Coverage) -> Coverage {
        let bounds = self.bounds.intersect(other.bounds);
        let mut data = Vec::with_capacity(bounds.area());
        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                data.push(self.at(x, y) * other.at(x, y));
            }
        }
        Coverage { bounds, data }
    }

    /// Coverage from one channel of a surface (alpha, or luma for luminance masks).
    pub(crate) fn from_surface(surface: &Surface, f: impl Fn(Px) -> f32) -> Coverage {
        Coverage {
            bounds: surface.bounds,
            data: surface.data.iter().map(|&p| f(p).clamp(0.0, 1.0)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
