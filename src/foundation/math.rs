/// Linear-premultiplied RGBA pixel as stored in every internal buffer.
pub(crate) type Px = [f32; 4];

pub(crate) const TRANSPARENT_PX: Px = [0.0; 4];

pub(crate) fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub(crate) fn lerp_px(a: Px, b: Px, t: f32) -> Px {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
        lerp(a[3], b[3], t),
    ]
}

/// Clamp alpha to `[0, 1]` and color channels to `[0, alpha]`.
pub(crate) fn clamp_premul(p: Px) -> Px {
    let a = clamp01(p[3]);
    [
        p[0].clamp(0.0, a),
        p[1].clamp(0.0, a),
        p[2].clamp(0.0, a),
        a,
    ]
}

/// Straight-alpha copy of a premultiplied pixel. Transparent pixels map to zero.
pub(crate) fn unpremultiply(p: Px) -> Px {
    if p[3] <= 0.0 {
        return TRANSPARENT_PX;
    }
    let inv = 1.0 / p[3];
    [
        clamp01(p[0] * inv),
        clamp01(p[1] * inv),
        clamp01(p[2] * inv),
        p[3],
    ]
}

pub(crate) fn premultiply(p: Px) -> Px {
    let a = clamp01(p[3]);
    [clamp01(p[0]) * a, clamp01(p[1]) * a, clamp01(p[2]) * a, a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
