use crate::foundation::math::{Px, TRANSPARENT_PX, lerp_px};
use crate::render::surface::Surface;

/// Translate content by `(dx, dy)` device pixels. Fractional offsets resample bilinearly.
pub(crate) fn offset(src: &Surface, dx: f64, dy: f64) -> Surface {
    let mut out = Surface::new(src.bounds);
    if dx == 0.0 && dy == 0.0 {
        out.data.copy_from_slice(&src.data);
        return out;
    }
    let (w, h) = (src.width(), src.height());
    for y in 0..h {
        for x in 0..w {
            out.data[y * w + x] =
                sample_bilinear(src, x as f64 + 0.5 - dx, y as f64 + 0.5 - dy);
        }
    }
    out
}

/// Bilinear sample at continuous surface-local coordinates (pixel centers at `i + 0.5`).
/// Outside the surface reads as transparent.
pub(crate) fn sample_bilinear(src: &Surface, u: f64, v: f64) -> Px {
    if !u.is_finite() || !v.is_finite() {
        return TRANSPARENT_PX;
    }
    let (w, h) = (src.width() as i64, src.height() as i64);
    let fx = u - 0.5;
    let fy = v - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);
    let texel = |x: i64, y: i64| -> Px {
        if x < 0 || y < 0 || x >= w || y >= h {
            TRANSPARENT_PX
        } else {
            src.data[(y * w + x) as usize]
        }
    };
    let top = lerp_px(texel(x0, y0), texel(x0 + 1, y0), tx);
    let bottom = lerp_px(texel(x0, y0 + 1), texel(x0 + 1, y0 + 1), tx);
    lerp_px(top, bottom, ty)
}

#[cfg(test)]
#[path = "../../tests/unit/filter/offset.rs"]
mod tests;
