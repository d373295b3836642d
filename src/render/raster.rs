use crate::foundation::core::{BezPath, PixelBounds};
use crate::foundation::error::{StratumError, StratumResult};
use crate::paint::FillRule;
use crate::render::surface::Coverage;

/// Scan conversion backend: turns device-space geometry into anti-aliased coverage.
///
/// Everything above this trait (paint evaluation, blending, layers, filters) is backend
/// independent.
pub trait Rasterizer {
    /// Coverage of `path` (device space) under `rule`, sampled over `region`.
    fn fill_coverage(
        &mut self,
        path: &BezPath,
        rule: FillRule,
        region: PixelBounds,
    ) -> StratumResult<Coverage>;
}

/// [`Rasterizer`] backed by `vello_cpu`. Reuses its render context and pixmap between calls of the
/// same size.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext, &mut vello_cpu::Pixmap) -> StratumResult<R>,
    ) -> StratumResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == width && p.height() == height => p,
            _ => vello_cpu::Pixmap::new(width, height),
        };
        ctx.reset();
        pixmap.data_as_u8_slice_mut().fill(0);
        let out = f(&mut ctx, &mut pixmap);
        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);
        out
    }
}

impl Rasterizer for CpuRasterizer {
    fn fill_coverage(
        &mut self,
        path: &BezPath,
        rule: FillRule,
        region: PixelBounds,
    ) -> StratumResult<Coverage> {
        if region.is_empty() || path.elements().is_empty() {
            return Ok(Coverage::filled(region, 0.0));
        }
        let width: u16 = region
            .width()
            .try_into()
            .map_err(|_| StratumError::evaluation("raster region width exceeds u16"))?;
        let height: u16 = region
            .height()
            .try_into()
            .map_err(|_| StratumError::evaluation("raster region height exceeds u16"))?;

        let cpu_path = bezpath_to_cpu(path);
        self.with_ctx_mut(width, height, |ctx, pixmap| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                -f64::from(region.x0),
                -f64::from(region.y0),
            )));
            ctx.set_fill_rule(match rule {
                FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
                FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
            });
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&cpu_path);
            ctx.flush();
            ctx.render_to_pixmap(pixmap);

            let data = pixmap
                .data_as_u8_slice()
                .chunks_exact(4)
                .map(|px| f32::from(px[3]) / 255.0)
                .collect();
            Ok(Coverage {
                bounds: region,
                data,
            })
        })
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
