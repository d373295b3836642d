use crate::filter::eval::map_rows;
use crate::foundation::math::{Px, TRANSPARENT_PX};
use crate::render::surface::Surface;

/// Separable Gaussian blur with device-pixel standard deviations. Pixels outside the surface
/// count as transparent; a zero deviation leaves that axis untouched.
pub(crate) fn gaussian_blur(
    src: &Surface,
    std_dev_x: f64,
    std_dev_y: f64,
    parallel: bool,
) -> Surface {
    let mut out = src.clone();
    if let Some(k) = gaussian_kernel(std_dev_x) {
        out = horizontal_pass(&out, &k, parallel);
    }
    if let Some(k) = gaussian_kernel(std_dev_y) {
        out = vertical_pass(&out, &k, parallel);
    }
    out
}

/// Normalized weights over `[-r, r]`, `r = ceil(3σ)`. `None` when the blur is a no-op.
fn gaussian_kernel(sigma: f64) -> Option<Vec<f32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    let r = (3.0 * sigma).ceil() as i32;
    if r == 0 {
        return None;
    }
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|w| (w / sum) as f32).collect())
}

fn horizontal_pass(src: &Surface, k: &[f32], parallel: bool) -> Surface {
    let radius = (k.len() / 2) as isize;
    let w = src.width();
    map_rows(src.bounds, parallel, |row_idx, row| {
        let line = &src.data[row_idx * w..(row_idx + 1) * w];
        for (x, out) in row.iter_mut().enumerate() {
            *out = convolve(k, |ki| {
                let sx = x as isize + ki as isize - radius;
                (sx >= 0 && (sx as usize) < w).then(|| line[sx as usize])
            });
        }
    })
}

fn vertical_pass(src: &Surface, k: &[f32], parallel: bool) -> Surface {
    let radius = (k.len() / 2) as isize;
    let (w, h) = (src.width(), src.height());
    map_rows(src.bounds, parallel, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = convolve(k, |ki| {
                let sy = y as isize + ki as isize - radius;
                (sy >= 0 && (sy as usize) < h).then(|| src.data[sy as usize * w + x])
            });
        }
    })
}

fn convolve(k: &[f32], sample: impl Fn(usize) -> Option<Px>) -> Px {
    let mut acc = TRANSPARENT_PX;
    for (ki, &kw) in k.iter().enumerate() {
        if let Some(p) = sample(ki) {
            for c in 0..4 {
                acc[c] += kw * p[c];
            }
        }
    }
    acc
}

#[cfg(test)]
#[path = "../../tests/unit/filter/blur.rs"]
mod tests;
