use rayon::prelude::*;

use crate::filter::{
    CompositeOperator, Filter, Primitive, Slot, axis_scales, blur, color_matrix, composite,
    displacement, morphology, offset, turbulence,
};
use crate::foundation::core::{PixelBounds, Vec2};
use crate::foundation::error::{StratumError, StratumResult};
use crate::foundation::math::Px;
use crate::geometry::Transform;
use crate::render::surface::Surface;

/// Build a surface over `bounds` row by row. `f` gets the row index and the row to fill.
pub(crate) fn map_rows(
    bounds: PixelBounds,
    parallel: bool,
    f: impl Fn(usize, &mut [Px]) + Sync + Send,
) -> Surface {
    let mut out = Surface::new(bounds);
    let w = out.width();
    if w == 0 {
        return out;
    }
    if parallel {
        out.data
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        out.data
            .chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
    out
}

/// Evaluates a filter over one group layer.
///
/// Every intermediate result shares the source surface bounds, so the layer bounds must already
/// include [`Filter::padding`].
pub(crate) struct FilterEvaluator {
    /// Group transform; maps primitive lengths from user space to device pixels.
    pub(crate) transform: Transform,
    pub(crate) parallel: bool,
}

impl FilterEvaluator {
    #[tracing::instrument(level = "debug", skip_all, fields(primitives = filter.len()))]
    pub(crate) fn evaluate(&self, filter: &Filter, source: &Surface) -> StratumResult<Surface> {
        if filter.is_empty() {
            return Ok(source.clone());
        }

        let source_alpha = Surface {
            bounds: source.bounds,
            data: source.data.iter().map(|p| [0.0, 0.0, 0.0, p[3]]).collect(),
        };
        let (sx, sy) = axis_scales(self.transform);
        let scale_vec = |dx: f64, dy: f64| {
            let v = self.transform.apply_vector(Vec2::new(dx, dy));
            (v.x, v.y)
        };

        let mut results: Vec<Surface> = Vec::with_capacity(filter.len());
        for (idx, prim) in filter.primitives().iter().enumerate() {
            let input = |slot: &Slot| -> StratumResult<&Surface> {
                match *slot {
                    Slot::SourceGraphic => Ok(source),
                    Slot::SourceAlpha => Ok(&source_alpha),
                    Slot::Result(i) => results.get(i).ok_or_else(|| {
                        StratumError::invalid_filter(format!(
                            "primitive {idx} reads result {i} before it exists"
                        ))
                    }),
                }
            };

            let out = match prim {
                Primitive::GaussianBlur {
                    input: i,
                    std_dev_x,
                    std_dev_y,
                } => blur::gaussian_blur(input(i)?, std_dev_x * sx, std_dev_y * sy, self.parallel),
                Primitive::Offset { input: i, dx, dy } => {
                    let (ddx, ddy) = scale_vec(*dx, *dy);
                    offset::offset(input(i)?, ddx, ddy)
                }
                Primitive::ColorMatrix { input: i, kind } => {
                    color_matrix::apply(input(i)?, &color_matrix::matrix_for(kind))
                }
                Primitive::Composite { in1, in2, operator } => {
                    composite::composite(input(in1)?, input(in2)?, *operator)
                }
                Primitive::DisplacementMap {
                    in1,
                    in2,
                    scale,
                    x_channel,
                    y_channel,
                } => displacement::displace(
                    input(in1)?,
                    input(in2)?,
                    (scale * sx, scale * sy),
                    *x_channel,
                    *y_channel,
                ),
                Primitive::Turbulence {
                    base_freq_x,
                    base_freq_y,
                    num_octaves,
                    seed,
                    kind,
                } => match self.transform.invert() {
                    Ok(inverse) => turbulence::render(
                        source.bounds,
                        inverse,
                        &turbulence::TurbulenceParams {
                            base_freq_x: *base_freq_x,
                            base_freq_y: *base_freq_y,
                            num_octaves: *num_octaves,
                            seed: *seed,
                            kind: *kind,
                        },
                        self.parallel,
                    ),
                    // A collapsed user space has no area to sample noise over.
                    Err(_) => Surface::new(source.bounds),
                },
                Primitive::Morphology {
                    input: i,
                    operator,
                    radius_x,
                    radius_y,
                } => morphology::morphology(
                    input(i)?,
                    *operator,
                    radius_x * sx,
                    radius_y * sy,
                    self.parallel,
                ),
                Primitive::DropShadow {
                    input: i,
                    dx,
                    dy,
                    std_dev,
                    color,
                } => {
                    let src = input(i)?;
                    let (ddx, ddy) = scale_vec(*dx, *dy);
                    let moved = offset::offset(src, ddx, ddy);
                    let blurred =
                        blur::gaussian_blur(&moved, std_dev * sx, std_dev * sy, self.parallel);
                    let mut flood = Surface::new(src.bounds);
                    flood.fill(color.to_px());
                    let shadow = composite::composite(&flood, &blurred, CompositeOperator::In);
                    composite::merge([&shadow, src])
                }
                Primitive::Flood { color } => {
                    let mut s = Surface::new(source.bounds);
                    s.fill(color.to_px());
                    s
                }
                Primitive::Merge { inputs } => {
                    let layers = inputs.iter().map(&input).collect::<StratumResult<Vec<_>>>()?;
                    composite::merge(layers)
                }
            };

            tracing::debug!(primitive = prim.name(), index = idx, "filter primitive evaluated");
            let out = if out.bounds == source.bounds {
                out
            } else {
                out.rebound(source.bounds)
            };
            results.push(out);
        }

        results
            .pop()
            .ok_or_else(|| StratumError::evaluation("filter produced no result"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/eval.rs"]
mod tests;
