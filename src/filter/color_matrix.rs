use crate::color::LUMA_WEIGHTS;
use crate::filter::ColorMatrixKind;
use crate::foundation::math::{premultiply, unpremultiply};
use crate::render::surface::Surface;

pub(crate) type Matrix = [f32; 20];

pub(crate) const IDENTITY: Matrix = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
];

pub(crate) fn matrix_for(kind: &ColorMatrixKind) -> Matrix {
    match kind {
        ColorMatrixKind::Matrix(m) => *m,
        ColorMatrixKind::Saturate(s) => saturate(*s),
        ColorMatrixKind::HueRotate(deg) => hue_rotate(*deg),
        ColorMatrixKind::LuminanceToAlpha => {
            let [r, g, b] = LUMA_WEIGHTS;
            [
                0.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, //
                r, g, b, 0.0, 0.0,
            ]
        }
    }
}

fn saturate(s: f32) -> Matrix {
    [
        0.213 + 0.787 * s,
        0.715 - 0.715 * s,
        0.072 - 0.072 * s,
        0.0,
        0.0,
        0.213 - 0.213 * s,
        0.715 + 0.285 * s,
        0.072 - 0.072 * s,
        0.0,
        0.0,
        0.213 - 0.213 * s,
        0.715 - 0.715 * s,
        0.072 + 0.928 * s,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

fn hue_rotate(deg: f32) -> Matrix {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        0.213 + cos * 0.787 - sin * 0.213,
        0.715 - cos * 0.715 - sin * 0.715,
        0.072 - cos * 0.072 + sin * 0.928,
        0.0,
        0.0,
        0.213 - cos * 0.213 + sin * 0.143,
        0.715 + cos * 0.285 + sin * 0.140,
        0.072 - cos * 0.072 - sin * 0.283,
        0.0,
        0.0,
        0.213 - cos * 0.213 - sin * 0.787,
        0.715 - cos * 0.715 + sin * 0.715,
        0.072 + cos * 0.928 + sin * 0.072,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Apply `m` to unpremultiplied pixels, then clamp and premultiply again.
pub(crate) fn apply(src: &Surface, m: &Matrix) -> Surface {
    if *m == IDENTITY {
        return src.clone();
    }
    let data = src
        .data
        .iter()
        .map(|&p| {
            let [r, g, b, a] = unpremultiply(p);
            let row = |i: usize| m[i] * r + m[i + 1] * g + m[i + 2] * b + m[i + 3] * a + m[i + 4];
            premultiply([row(0), row(5), row(10), row(15)])
        })
        .collect();
    Surface {
        bounds: src.bounds,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/color_matrix.rs"]
mod tests;
