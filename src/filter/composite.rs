use crate::filter::CompositeOperator;
use crate::foundation::math::clamp_premul;
use crate::render::blend::{BlendMode, blend_px};
use crate::render::surface::Surface;

/// `in1` composited onto `in2`.
pub(crate) fn composite(in1: &Surface, in2: &Surface, operator: CompositeOperator) -> Surface {
    let bounds = in2.bounds;
    let mut out = Surface::new(bounds);
    for y in bounds.y0..bounds.y1 {
        for x in bounds.x0..bounds.x1 {
            let (a, b) = (in1.get(x, y), in2.get(x, y));
            let px = match operator {
                CompositeOperator::Over => blend_px(BlendMode::SrcOver, a, b, 1.0),
                CompositeOperator::In => blend_px(BlendMode::SrcIn, a, b, 1.0),
                CompositeOperator::Out => blend_px(BlendMode::SrcOut, a, b, 1.0),
                CompositeOperator::Atop => blend_px(BlendMode::SrcAtop, a, b, 1.0),
                CompositeOperator::Xor => blend_px(BlendMode::Xor, a, b, 1.0),
                CompositeOperator::Arithmetic { k1, k2, k3, k4 } => {
                    let ch = |i: usize| k1 * a[i] * b[i] + k2 * a[i] + k3 * b[i] + k4;
                    clamp_premul([ch(0), ch(1), ch(2), ch(3)])
                }
            };
            if let Some(slot) = out.get_mut(x, y) {
                *slot = px;
            }
        }
    }
    out
}

/// Source-over stack of `layers`, first at the bottom.
pub(crate) fn merge<'a>(layers: impl IntoIterator<Item = &'a Surface>) -> Surface {
    let mut layers = layers.into_iter();
    let Some(first) = layers.next() else {
        return Surface::new(Default::default());
    };
    let mut out = first.clone();
    for layer in layers {
        for (dst, src) in out.data.iter_mut().zip(layer.rebound(first.bounds).data) {
            *dst = blend_px(BlendMode::SrcOver, src, *dst, 1.0);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/filter/composite.rs"]
mod tests;
