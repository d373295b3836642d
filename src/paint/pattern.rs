use std::sync::Arc;

use crate::color::Color;
use crate::color::transfer::srgb8_to_linear;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{StratumError, StratumResult};
use crate::foundation::math::{Px, TRANSPARENT_PX, lerp_px};
use crate::paint::gradient::SpreadMethod;

/// Decoded raster image, stored linear and premultiplied.
///
/// Produced by the asset pipeline; this crate only samples it.
#[derive(Clone, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Arc<[Px]>,
}

impl Image {
    pub fn from_colors(width: u32, height: u32, pixels: Vec<Color>) -> StratumResult<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels: pixels.into_iter().map(Color::to_px).collect(),
        })
    }

    /// Straight-alpha sRGB RGBA8 bytes, row-major.
    pub fn from_srgba8(width: u32, height: u32, data: &[u8]) -> StratumResult<Self> {
        if !data.len().is_multiple_of(4) {
            return Err(StratumError::validation("image data must be RGBA8"));
        }
        check_len(width, height, data.len() / 4)?;
        let pixels = data
            .chunks_exact(4)
            .map(|px| {
                let a = f32::from(px[3]) / 255.0;
                [
                    srgb8_to_linear(px[0]) * a,
                    srgb8_to_linear(px[1]) * a,
                    srgb8_to_linear(px[2]) * a,
                    a,
                ]
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_rgba_image(img: &image::RgbaImage) -> StratumResult<Self> {
        Self::from_srgba8(img.width(), img.height(), img.as_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_px(
            self.pixels[(y as usize) * (self.width as usize) + x as usize],
        ))
    }

    fn texel(&self, x: i64, y: i64, spread: SpreadMethod) -> Px {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let (x, y) = match spread {
            SpreadMethod::Pad => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
            SpreadMethod::Repeat => (x.rem_euclid(w), y.rem_euclid(h)),
            SpreadMethod::Reflect => (reflect(x, w), reflect(y, h)),
        };
        self.pixels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Bilinear sample at continuous texel coordinates (pixel centers at `i + 0.5`).
    pub(crate) fn sample(&self, u: f64, v: f64, spread: SpreadMethod) -> Px {
        if self.width == 0 || self.height == 0 || !u.is_finite() || !v.is_finite() {
            return TRANSPARENT_PX;
        }
        let fx = u - 0.5;
        let fy = v - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);
        let top = lerp_px(
            self.texel(x0, y0, spread),
            self.texel(x0 + 1, y0, spread),
            tx,
        );
        let bottom = lerp_px(
            self.texel(x0, y0 + 1, spread),
            self.texel(x0 + 1, y0 + 1, spread),
            tx,
        );
        lerp_px(top, bottom, ty)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

fn reflect(i: i64, n: i64) -> i64 {
    let m = i.rem_euclid(2 * n);
    if m >= n { 2 * n - 1 - m } else { m }
}

fn check_len(width: u32, height: u32, len: usize) -> StratumResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| StratumError::validation("image size overflow"))?;
    if width == 0 || height == 0 || expected != len {
        return Err(StratumError::validation(
            "image expects width*height pixels with non-zero extent",
        ));
    }
    Ok(())
}

/// Image tiled over user space, one copy per `tile_size` cell starting at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub image: Image,
    pub tile_size: Vec2,
    pub spread: SpreadMethod,
}

impl Pattern {
    pub fn new(image: Image, tile_size: Vec2) -> Self {
        Self {
            image,
            tile_size,
            spread: SpreadMethod::Repeat,
        }
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub(crate) fn color_at(&self, p: Point) -> Color {
        if self.tile_size.x <= 0.0 || self.tile_size.y <= 0.0 {
            return Color::TRANSPARENT;
        }
        let u = p.x / self.tile_size.x * f64::from(self.image.width);
        let v = p.y / self.tile_size.y * f64::from(self.image.height);
        Color::from_px(self.image.sample(u, v, self.spread))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/pattern.rs"]
mod tests;
