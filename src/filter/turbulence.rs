//! Perlin turbulence as defined for `feTurbulence`: lattice and gradients come from a
//! Park-Miller generator, so a seed gives bit-identical output on every platform.

use crate::filter::TurbulenceKind;
use crate::filter::eval::map_rows;
use crate::foundation::core::{PixelBounds, Point};
use crate::foundation::math::premultiply;
use crate::geometry::Transform;
use crate::render::surface::Surface;

const BSIZE: usize = 0x100;
const BM: i64 = 0xff;
const PERLIN_N: f64 = 4096.0;

const RAND_M: i64 = 2_147_483_647;
const RAND_A: i64 = 16_807;
const RAND_Q: i64 = 127_773;
const RAND_R: i64 = 2_836;

#[derive(Clone, Copy, Debug)]
pub(crate) struct TurbulenceParams {
    pub(crate) base_freq_x: f64,
    pub(crate) base_freq_y: f64,
    pub(crate) num_octaves: u32,
    pub(crate) seed: i32,
    pub(crate) kind: TurbulenceKind,
}

fn random(seed: i64) -> i64 {
    let s = RAND_A * (seed % RAND_Q) - RAND_R * (seed / RAND_Q);
    if s <= 0 { s + RAND_M } else { s }
}

struct NoiseTable {
    lattice: [usize; BSIZE + BSIZE + 2],
    gradient: [[[f64; 2]; BSIZE + BSIZE + 2]; 4],
}

impl NoiseTable {
    fn new(seed: i32) -> Self {
        let mut seed = i64::from(seed);
        if seed <= 0 {
            seed = -(seed % (RAND_M - 1)) + 1;
        }
        if seed > RAND_M - 1 {
            seed = RAND_M - 1;
        }

        let mut lattice = [0usize; BSIZE + BSIZE + 2];
        let mut gradient = [[[0.0f64; 2]; BSIZE + BSIZE + 2]; 4];
        for grad in gradient.iter_mut() {
            for (i, g) in grad.iter_mut().take(BSIZE).enumerate() {
                lattice[i] = i;
                for c in g.iter_mut() {
                    seed = random(seed);
                    *c = ((seed % (2 * BSIZE as i64)) - BSIZE as i64) as f64 / BSIZE as f64;
                }
                let len = (g[0] * g[0] + g[1] * g[1]).sqrt();
                if len > 0.0 {
                    g[0] /= len;
                    g[1] /= len;
                }
            }
        }
        for i in (1..BSIZE).rev() {
            seed = random(seed);
            let j = (seed % BSIZE as i64) as usize;
            lattice.swap(i, j);
        }
        for i in 0..BSIZE + 2 {
            lattice[BSIZE + i] = lattice[i];
            for grad in gradient.iter_mut() {
                grad[BSIZE + i] = grad[i];
            }
        }
        Self { lattice, gradient }
    }

    fn noise2(&self, channel: usize, x: f64, y: f64) -> f64 {
        let t = x + PERLIN_N;
        let bx0 = (t as i64) & BM;
        let bx1 = (bx0 + 1) & BM;
        let rx0 = t - (t as i64) as f64;
        let rx1 = rx0 - 1.0;

        let t = y + PERLIN_N;
        let by0 = (t as i64) & BM;
        let by1 = (by0 + 1) & BM;
        let ry0 = t - (t as i64) as f64;
        let ry1 = ry0 - 1.0;

        let i = self.lattice[bx0 as usize];
        let j = self.lattice[bx1 as usize];
        let b00 = self.lattice[i + by0 as usize];
        let b10 = self.lattice[j + by0 as usize];
        let b01 = self.lattice[i + by1 as usize];
        let b11 = self.lattice[j + by1 as usize];

        let sx = s_curve(rx0);
        let sy = s_curve(ry0);
        let g = &self.gradient[channel];

        let u = rx0 * g[b00][0] + ry0 * g[b00][1];
        let v = rx1 * g[b10][0] + ry0 * g[b10][1];
        let a = lerp(sx, u, v);
        let u = rx0 * g[b01][0] + ry1 * g[b01][1];
        let v = rx1 * g[b11][0] + ry1 * g[b11][1];
        let b = lerp(sx, u, v);
        lerp(sy, a, b)
    }

    fn turbulence(&self, channel: usize, p: Point, params: &TurbulenceParams) -> f64 {
        let mut sum = 0.0;
        let mut x = p.x * params.base_freq_x;
        let mut y = p.y * params.base_freq_y;
        let mut ratio = 1.0;
        for _ in 0..params.num_octaves {
            let n = self.noise2(channel, x, y);
            sum += match params.kind {
                TurbulenceKind::FractalNoise => n / ratio,
                TurbulenceKind::Turbulence => n.abs() / ratio,
            };
            x *= 2.0;
            y *= 2.0;
            ratio *= 2.0;
        }
        sum
    }
}

fn s_curve(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Render noise over `bounds`; `inverse` maps device pixels back to filter user space.
pub(crate) fn render(
    bounds: PixelBounds,
    inverse: Transform,
    params: &TurbulenceParams,
    parallel: bool,
) -> Surface {
    let table = NoiseTable::new(params.seed);
    map_rows(bounds, parallel, |row, out| {
        let y = f64::from(bounds.y0) + row as f64 + 0.5;
        for (col, px) in out.iter_mut().enumerate() {
            let x = f64::from(bounds.x0) + col as f64 + 0.5;
            let p = inverse.apply(Point::new(x, y));
            let mut rgba = [0.0f32; 4];
            for (ch, v) in rgba.iter_mut().enumerate() {
                let t = table.turbulence(ch, p, params);
                let t = match params.kind {
                    TurbulenceKind::FractalNoise => (t + 1.0) * 0.5,
                    TurbulenceKind::Turbulence => t,
                };
                *v = t.clamp(0.0, 1.0) as f32;
            }
            *px = premultiply(rgba);
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/filter/turbulence.rs"]
mod tests;
