use std::path::Path;

use crate::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StratumError, StratumResult};
use crate::render::surface::Surface;

/// Emitted frame: straight-alpha sRGB RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_image(&self) -> StratumResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| StratumError::evaluation("frame buffer size mismatch"))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> StratumResult<()> {
        let path = path.as_ref();
        self.to_image()?.save(path).map_err(|e| {
            StratumError::Other(
                anyhow::Error::new(e).context(format!("write png '{}'", path.display())),
            )
        })
    }
}

/// Linear premultiplied render target shared with other collaborators (e.g. a 3D pass) that
/// draw into the same presented frame.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    canvas: Canvas,
    pub(crate) surface: Surface,
}

impl Framebuffer {
    /// Transparent framebuffer covering `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            surface: Surface::new(canvas.bounds()),
        }
    }

    pub fn cleared(canvas: Canvas, color: Color) -> Self {
        let mut fb = Self::new(canvas);
        fb.clear(color);
        fb
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn clear(&mut self, color: Color) {
        self.surface.fill(color.to_px());
    }

    /// Pixel at `(x, y)`; `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (x, y) = (i32::try_from(x).ok()?, i32::try_from(y).ok()?);
        self.surface
            .bounds
            .index_of(x, y)
            .map(|i| Color::from_px(self.surface.data[i]))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y))
            && let Some(px) = self.surface.get_mut(x, y)
        {
            *px = color.to_px();
        }
    }

    /// Unpremultiply and encode to sRGB. The only place linear data leaves the engine.
    pub fn to_rgba8(&self) -> FrameRGBA {
        let mut data = Vec::with_capacity(self.surface.data.len() * 4);
        for &p in &self.surface.data {
            data.extend_from_slice(&Color::from_px(p).to_srgba8());
        }
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/framebuffer.rs"]
mod tests;
