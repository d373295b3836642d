//! Porter-Duff operators and W3C mix modes over linear premultiplied pixels.

use crate::foundation::math::{Px, clamp_premul, lerp_px};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    SrcOver,
    Clear,
    Src,
    Dst,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    Plus,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Porter-Duff `(Fa, Fb)` factors, `None` for mix modes.
    fn porter_duff(self, sa: f32, da: f32) -> Option<(f32, f32)> {
        Some(match self {
            BlendMode::Clear => (0.0, 0.0),
            BlendMode::Src => (1.0, 0.0),
            BlendMode::Dst => (0.0, 1.0),
            BlendMode::SrcOver => (1.0, 1.0 - sa),
            BlendMode::DstOver => (1.0 - da, 1.0),
            BlendMode::SrcIn => (da, 0.0),
            BlendMode::DstIn => (0.0, sa),
            BlendMode::SrcOut => (1.0 - da, 0.0),
            BlendMode::DstOut => (0.0, 1.0 - sa),
            BlendMode::SrcAtop => (da, 1.0 - sa),
            BlendMode::DstAtop => (1.0 - da, sa),
            BlendMode::Xor => (1.0 - da, 1.0 - sa),
            BlendMode::Plus => (1.0, 1.0),
            _ => return None,
        })
    }

    pub fn is_porter_duff(self) -> bool {
        self.porter_duff(0.0, 0.0).is_some()
    }

    /// `true` if a transparent source can change the destination.
    ///
    /// Such modes act on every pixel of the composited region, not only under the source.
    pub fn is_unbounded(self) -> bool {
        matches!(
            self,
            BlendMode::Clear
                | BlendMode::Src
                | BlendMode::SrcIn
                | BlendMode::DstIn
                | BlendMode::SrcOut
                | BlendMode::DstAtop
        )
    }
}

/// Composite `src` onto `dst` with `mode`, attenuated by coverage `cov ∈ [0, 1]`.
///
/// Partial coverage interpolates between the untouched destination and the full result.
pub(crate) fn blend_px(mode: BlendMode, src: Px, dst: Px, cov: f32) -> Px {
    if cov <= 0.0 {
        return dst;
    }
    if mode == BlendMode::SrcOver {
        let k = 1.0 - src[3] * cov;
        return [
            src[0] * cov + dst[0] * k,
            src[1] * cov + dst[1] * k,
            src[2] * cov + dst[2] * k,
            src[3] * cov + dst[3] * k,
        ];
    }
    let full = blend_full(mode, src, dst);
    if cov >= 1.0 {
        full
    } else {
        lerp_px(dst, full, cov)
    }
}

fn blend_full(mode: BlendMode, s: Px, d: Px) -> Px {
    let (sa, da) = (s[3], d[3]);
    if let Some((fa, fb)) = mode.porter_duff(sa, da) {
        let out = [
            s[0] * fa + d[0] * fb,
            s[1] * fa + d[1] * fb,
            s[2] * fa + d[2] * fb,
            sa * fa + da * fb,
        ];
        return if mode == BlendMode::Plus {
            clamp_premul(out)
        } else {
            out
        };
    }

    // Mix modes: co = cs·(1 - ab) + cb·(1 - as) + as·ab·B(Cb, Cs), on unpremultiplied Cb, Cs.
    let cs = unpremul_rgb(s);
    let cb = unpremul_rgb(d);
    let mixed = match mode {
        BlendMode::Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        BlendMode::Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        BlendMode::Color => set_lum(cs, lum(cb)),
        BlendMode::Luminosity => set_lum(cb, lum(cs)),
        _ => [
            separable(mode, cb[0], cs[0]),
            separable(mode, cb[1], cs[1]),
            separable(mode, cb[2], cs[2]),
        ],
    };
    let both = sa * da;
    let mut out = [0.0; 4];
    for i in 0..3 {
        out[i] = s[i] * (1.0 - da) + d[i] * (1.0 - sa) + both * mixed[i];
    }
    out[3] = sa + da - both;
    clamp_premul(out)
}

fn unpremul_rgb(p: Px) -> [f32; 3] {
    if p[3] <= 0.0 {
        return [0.0; 3];
    }
    let inv = 1.0 / p[3];
    [
        (p[0] * inv).clamp(0.0, 1.0),
        (p[1] * inv).clamp(0.0, 1.0),
        (p[2] * inv).clamp(0.0, 1.0),
    ]
}

fn separable(mode: BlendMode, cb: f32, cs: f32) -> f32 {
    match mode {
        BlendMode::Multiply => cb * cs,
        BlendMode::Screen => cb + cs - cb * cs,
        BlendMode::Overlay => hard_light(cs, cb),
        BlendMode::Darken => cb.min(cs),
        BlendMode::Lighten => cb.max(cs),
        BlendMode::ColorDodge => {
            if cb <= 0.0 {
                0.0
            } else if cs >= 1.0 {
                1.0
            } else {
                (cb / (1.0 - cs)).min(1.0)
            }
        }
        BlendMode::ColorBurn => {
            if cb >= 1.0 {
                1.0
            } else if cs <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - cb) / cs).min(1.0)
            }
        }
        BlendMode::HardLight => hard_light(cb, cs),
        BlendMode::SoftLight => {
            if cs <= 0.5 {
                cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
            } else {
                let dcb = if cb <= 0.25 {
                    ((16.0 * cb - 12.0) * cb + 4.0) * cb
                } else {
                    cb.sqrt()
                };
                cb + (2.0 * cs - 1.0) * (dcb - cb)
            }
        }
        BlendMode::Difference => (cb - cs).abs(),
        BlendMode::Exclusion => cb + cs - 2.0 * cb * cs,
        _ => cs,
    }
}

fn hard_light(cb: f32, cs: f32) -> f32 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        let s = 2.0 * cs - 1.0;
        cb + s - cb * s
    }
}

// Non-separable helpers use the W3C compositing weights, not the Rec. 709 luma weights.
fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > f32::EPSILON {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > f32::EPSILON {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

fn sat(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f32; 3], s: f32) -> [f32; 3] {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    let range = max - min;
    if range <= 0.0 {
        return [0.0; 3];
    }
    c.map(|v| (v - min) * s / range)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
