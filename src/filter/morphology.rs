use crate::filter::MorphologyOperator;
use crate::filter::eval::map_rows;
use crate::foundation::math::{Px, TRANSPARENT_PX};
use crate::render::surface::Surface;

/// Per-channel min (erode) or max (dilate) over an elliptical kernel with radii `(rx, ry)`.
///
/// Radii are in device pixels and rounded to the nearest pixel. A zero radius collapses the
/// kernel to a line along the other axis. Outside the surface reads as transparent.
pub(crate) fn morphology(
    src: &Surface,
    operator: MorphologyOperator,
    radius_x: f64,
    radius_y: f64,
    parallel: bool,
) -> Surface {
    let rx = device_radius(radius_x);
    let ry = device_radius(radius_y);
    if rx == 0 && ry == 0 {
        return src.clone();
    }
    let pick: fn(f32, f32) -> f32 = match operator {
        MorphologyOperator::Erode => f32::min,
        MorphologyOperator::Dilate => f32::max,
    };

    // Half-width of the kernel row at each vertical offset `-ry..=ry`.
    let spans = kernel_spans(rx, ry);
    let mut widths: Vec<usize> = spans.clone();
    widths.sort_unstable();
    widths.dedup();
    let rows: Vec<(usize, Surface)> = widths
        .into_iter()
        .map(|half| (half, horizontal(src, pick, half, parallel)))
        .collect();

    let (w, h) = (src.width(), src.height());
    map_rows(src.bounds, parallel, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut acc: Option<Px> = None;
            for (k, half) in spans.iter().enumerate() {
                let sy = y as isize + k as isize - ry as isize;
                let p = if sy < 0 || sy as usize >= h {
                    TRANSPARENT_PX
                } else {
                    rows.iter()
                        .find(|(width, _)| width == half)
                        .map_or(TRANSPARENT_PX, |(_, s)| s.data[sy as usize * w + x])
                };
                acc = Some(match acc {
                    None => p,
                    Some(a) => std::array::from_fn(|c| pick(a[c], p[c])),
                });
            }
            *out = acc.unwrap_or(TRANSPARENT_PX);
        }
    })
}

fn device_radius(r: f64) -> usize {
    if r.is_finite() && r > 0.0 {
        r.round() as usize
    } else {
        0
    }
}

fn kernel_spans(rx: usize, ry: usize) -> Vec<usize> {
    if ry == 0 {
        return vec![rx];
    }
    (0..=2 * ry)
        .map(|k| {
            let t = (k as f64 - ry as f64) / ry as f64;
            (rx as f64 * (1.0 - t * t).max(0.0).sqrt() + 1e-9).floor() as usize
        })
        .collect()
}

/// Min/max over `[x - half, x + half]` on each row.
fn horizontal(src: &Surface, pick: fn(f32, f32) -> f32, half: usize, parallel: bool) -> Surface {
    if half == 0 {
        return src.clone();
    }
    let w = src.width();
    map_rows(src.bounds, parallel, |y, row| {
        let line = &src.data[y * w..(y + 1) * w];
        for (x, out) in row.iter_mut().enumerate() {
            let lo = x as isize - half as isize;
            let mut acc = if lo < 0 || x + half >= w {
                TRANSPARENT_PX
            } else {
                line[x]
            };
            for i in lo.max(0) as usize..(x + half + 1).min(w) {
                acc = std::array::from_fn(|c| pick(acc[c], line[i][c]));
            }
            *out = acc;
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/filter/morphology.rs"]
mod tests;
