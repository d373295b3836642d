use std::sync::Arc;

use crate::color::{Color, luma};
use crate::engine::config::ResourceBudgets;
use crate::filter::Filter;
use crate::filter::eval::FilterEvaluator;
use crate::foundation::core::{PixelBounds, Point, Rect};
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::{Path, Transform};
use crate::paint::{FillRule, Style, StylePass};
use crate::render::blend::{BlendMode, blend_px};
use crate::render::raster::Rasterizer;
use crate::render::surface::{Coverage, Surface};
use crate::render::surface_pool::{SurfacePool, SurfacePoolOpts};
use crate::scene::{Command, DisplayList, GroupOptions, MaskType};

/// Counters collected while compositing one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw commands that reached a render target.
    pub draws: u64,
    pub offscreen_groups: u64,
    /// Groups drawn straight into their parent (pass-through groups).
    pub direct_groups: u64,
    /// Groups that hit a resource budget and were composited best-effort.
    pub degraded_groups: u64,
    pub skipped_clips: u64,
    pub degraded_masks: u64,
    pub allocated_surfaces: u64,
    pub peak_live_surfaces: usize,
}

/// Graphics state as seen by the replay: clips and masks are already rasterized.
#[derive(Clone, Debug)]
struct ReplayState {
    transform: Transform,
    clip: Option<Arc<Coverage>>,
    clip_depth: usize,
    mask: Option<Arc<Coverage>>,
    opacity: f32,
    blend: BlendMode,
    /// Draws are dropped (content of a mask that could not get a layer, or of an empty group).
    discard: bool,
}

impl ReplayState {
    fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            clip: None,
            clip_depth: 0,
            mask: None,
            opacity: 1.0,
            blend: BlendMode::SrcOver,
            discard: false,
        }
    }

    /// State for content rendered into a fresh layer.
    fn for_layer(&self) -> Self {
        Self {
            transform: self.transform,
            clip: None,
            clip_depth: self.clip_depth,
            mask: None,
            opacity: 1.0,
            blend: BlendMode::SrcOver,
            discard: false,
        }
    }

    /// Clip × mask × opacity at a device pixel.
    fn modulation(&self, x: i32, y: i32) -> f32 {
        let mut m = self.opacity;
        if let Some(clip) = &self.clip {
            m *= clip.at(x, y);
        }
        if let Some(mask) = &self.mask {
            m *= mask.at(x, y);
        }
        m
    }

    /// Device region outside which the modulation is zero, restricted to `target`.
    fn limit(&self, target: PixelBounds) -> PixelBounds {
        let mut region = target;
        if let Some(clip) = &self.clip {
            region = region.intersect(clip.bounds);
        }
        if let Some(mask) = &self.mask {
            region = region.intersect(mask.bounds);
        }
        region
    }
}

#[derive(Debug)]
enum GroupKind {
    Direct,
    /// Budget exceeded: opacity and blend were folded into the state, the filter is skipped.
    Degraded,
    /// Nothing of the group can reach the target.
    Empty,
    Offscreen {
        opacity: f32,
        blend: BlendMode,
        filter: Option<Filter>,
    },
}

#[derive(Debug)]
enum Scope {
    Save(ReplayState),
    Group { saved: ReplayState, kind: GroupKind },
    Mask {
        saved: ReplayState,
        mask_type: MaskType,
        layered: bool,
    },
}

/// Replays a [`DisplayList`] onto a root surface.
///
/// Keeps a stack of render targets: the root first, then one layer per open offscreen group or
/// mask. Layers come from a frame-scoped [`SurfacePool`] that is dropped with the compositor.
pub(crate) struct Compositor<'r, R: Rasterizer> {
    raster: &'r mut R,
    budgets: ResourceBudgets,
    tolerance: f64,
    parallel: bool,
    pool: SurfacePool,
    layers: Vec<Surface>,
    state: ReplayState,
    scopes: Vec<Scope>,
    stats: FrameStats,
}

impl<'r, R: Rasterizer> Compositor<'r, R> {
    pub(crate) fn new(
        raster: &'r mut R,
        budgets: ResourceBudgets,
        tolerance: f64,
        parallel: bool,
    ) -> Self {
        Self {
            raster,
            budgets,
            tolerance,
            parallel,
            pool: SurfacePool::new(SurfacePoolOpts::default()),
            layers: Vec::new(),
            state: ReplayState::new(),
            scopes: Vec::new(),
            stats: FrameStats::default(),
        }
    }

    /// Composite `list` over `root`. On error the partially drawn root is dropped; callers keep
    /// their own copy of the previous contents.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(frame = list.frame_id(), commands = list.len())
    )]
    pub(crate) fn run(
        mut self,
        list: &DisplayList,
        root: Surface,
    ) -> StratumResult<(Surface, FrameStats)> {
        self.layers.push(root);
        for command in list.commands() {
            self.apply(command)?;
        }
        if !self.scopes.is_empty() {
            return Err(StratumError::unbalanced(format!(
                "{} scope(s) still open at end of display list",
                self.scopes.len()
            )));
        }
        let root = self
            .layers
            .pop()
            .ok_or_else(|| StratumError::evaluation("compositor lost its root target"))?;

        let pool = self.pool.stats();
        self.stats.allocated_surfaces = pool.alloc_surfaces;
        self.stats.peak_live_surfaces = pool.peak_live_surfaces;
        tracing::debug!(
            draws = self.stats.draws,
            offscreen_groups = self.stats.offscreen_groups,
            degraded_groups = self.stats.degraded_groups,
            "frame composited"
        );
        Ok((root, self.stats))
    }

    fn apply(&mut self, command: &Command) -> StratumResult<()> {
        match command {
            Command::Save => {
                self.scopes.push(Scope::Save(self.state.clone()));
                Ok(())
            }
            Command::Restore => match self.scopes.pop() {
                Some(Scope::Save(saved)) => {
                    self.state = saved;
                    Ok(())
                }
                _ => Err(StratumError::unbalanced("restore does not close a save")),
            },
            Command::Transform(t) => {
                self.state.transform = self.state.transform.multiply(*t);
                Ok(())
            }
            Command::Clip { path, rule } => self.clip(path, *rule),
            Command::MaskBegin(mask_type) => {
                self.mask_begin(*mask_type);
                Ok(())
            }
            Command::MaskEnd => self.mask_end(),
            Command::Draw {
                path,
                style,
                bounds,
            } => self.draw(path, style, *bounds),
            Command::GroupBegin { options, bounds } => {
                self.group_begin(options, *bounds);
                Ok(())
            }
            Command::GroupEnd => self.group_end(),
        }
    }

    fn target_bounds(&self) -> PixelBounds {
        self.layers
            .last()
            .map(|s| s.bounds)
            .unwrap_or(PixelBounds::EMPTY)
    }

    fn clip(&mut self, path: &Path, rule: FillRule) -> StratumResult<()> {
        if self.state.discard {
            return Ok(());
        }
        if self.state.clip_depth >= self.budgets.max_clip_depth {
            let err = StratumError::budget(format!(
                "clip depth {} reached max_clip_depth",
                self.state.clip_depth
            ));
            tracing::warn!(error = %err, "clip skipped");
            self.stats.skipped_clips += 1;
            return Ok(());
        }

        let region = match &self.state.clip {
            Some(c) => c.bounds,
            None => self.target_bounds(),
        };
        let device = path.transformed(self.state.transform);
        let coverage = self.raster.fill_coverage(&device, rule, region)?;
        let combined = match &self.state.clip {
            Some(c) => c.multiply(&coverage),
            None => coverage,
        };
        self.state.clip = Some(Arc::new(combined));
        self.state.clip_depth += 1;
        Ok(())
    }

    fn draw(&mut self, path: &Path, style: &Style, bounds: Rect) -> StratumResult<()> {
        if self.state.discard {
            return Ok(());
        }
        let region = self
            .state
            .limit(self.target_bounds())
            .intersect(PixelBounds::from_rect_outer(bounds));
        if region.is_empty() {
            return Ok(());
        }
        // A collapsed transform leaves nothing to cover.
        let Ok(inverse) = self.state.transform.invert() else {
            return Ok(());
        };

        let bbox = path.bounds();
        let affine = self.state.transform.as_affine();
        for pass in style.passes() {
            let (device, rule, paint) = match pass {
                StylePass::Fill => (
                    path.transformed(self.state.transform),
                    style.fill_rule,
                    style.fill.as_ref(),
                ),
                StylePass::Stroke => {
                    let outline = style
                        .effective_stroke_style()
                        .outline(path.bez(), self.tolerance);
                    (affine * outline, FillRule::NonZero, style.stroke.as_ref())
                }
            };
            let Some(paint) = paint else {
                continue;
            };
            let coverage = self.raster.fill_coverage(&device, rule, region)?;

            let solid = paint.as_solid().map(Color::to_px);
            let state = &self.state;
            let Some(target) = self.layers.last_mut() else {
                return Err(StratumError::evaluation("no render target"));
            };
            for y in region.y0..region.y1 {
                for x in region.x0..region.x1 {
                    let cov = coverage.at(x, y);
                    if cov <= 0.0 {
                        continue;
                    }
                    let cov = cov * state.modulation(x, y);
                    if cov <= 0.0 {
                        continue;
                    }
                    let src = match solid {
                        Some(px) => px,
                        None => {
                            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                            paint.color_at(inverse.apply(center), bbox).to_px()
                        }
                    };
                    if let Some(dst) = target.get_mut(x, y) {
                        *dst = blend_px(state.blend, src, *dst, cov);
                    }
                }
            }
        }
        self.stats.draws += 1;
        Ok(())
    }

    fn layer_budget_error(&self, bounds: PixelBounds) -> Option<StratumError> {
        let live = self.pool.live();
        if live >= self.budgets.max_offscreen_surfaces {
            return Some(StratumError::budget(format!(
                "{live} offscreen surfaces live, max_offscreen_surfaces is {}",
                self.budgets.max_offscreen_surfaces
            )));
        }
        let max = self.budgets.max_surface_dim;
        if bounds.width() > max || bounds.height() > max {
            return Some(StratumError::budget(format!(
                "layer {}x{} exceeds max_surface_dim {max}",
                bounds.width(),
                bounds.height()
            )));
        }
        None
    }

    fn mask_begin(&mut self, mask_type: MaskType) {
        let saved = self.state.clone();
        if self.state.discard {
            self.scopes.push(Scope::Mask {
                saved,
                mask_type,
                layered: false,
            });
            return;
        }

        let bounds = self.target_bounds();
        let layered = match self.layer_budget_error(bounds) {
            Some(err) => {
                tracing::warn!(error = %err, "mask dropped, content renders unmasked");
                self.stats.degraded_masks += 1;
                self.state.discard = true;
                false
            }
            None => {
                let layer = self.pool.borrow(bounds);
                self.layers.push(layer);
                self.state = saved.for_layer();
                true
            }
        };
        self.scopes.push(Scope::Mask {
            saved,
            mask_type,
            layered,
        });
    }

    fn mask_end(&mut self) -> StratumResult<()> {
        let Some(Scope::Mask {
            saved,
            mask_type,
            layered,
        }) = self.scopes.pop()
        else {
            return Err(StratumError::unbalanced("mask_end does not close a mask"));
        };
        self.state = saved;
        if !layered {
            return Ok(());
        }

        let layer = self
            .layers
            .pop()
            .ok_or_else(|| StratumError::evaluation("mask layer missing"))?;
        let coverage = Coverage::from_surface(&layer, |p| match mask_type {
            MaskType::Alpha => p[3],
            MaskType::Luminance => luma(p[0], p[1], p[2]),
        });
        self.pool.release(layer);
        let combined = match &self.state.mask {
            Some(m) => m.multiply(&coverage),
            None => coverage,
        };
        self.state.mask = Some(Arc::new(combined));
        Ok(())
    }

    fn group_begin(&mut self, options: &GroupOptions, bounds: PixelBounds) {
        let saved = self.state.clone();
        if self.state.discard || options.is_passthrough() {
            if !self.state.discard {
                self.stats.direct_groups += 1;
            }
            self.scopes.push(Scope::Group {
                saved,
                kind: GroupKind::Direct,
            });
            return;
        }

        let limit = self.state.limit(self.target_bounds());
        let layer_bounds = if options.blend_mode.is_unbounded() {
            limit
        } else {
            let pad = options
                .filter
                .as_ref()
                .map(|f| f.padding(self.state.transform))
                .unwrap_or_default();
            bounds.intersect(limit.inflate(pad.x as i32, pad.y as i32))
        };

        let kind = if layer_bounds.is_empty() || options.opacity <= 0.0 {
            self.state.discard = true;
            GroupKind::Empty
        } else if let Some(err) = self.layer_budget_error(layer_bounds) {
            tracing::warn!(error = %err, "group composited without a layer");
            self.stats.degraded_groups += 1;
            self.state.opacity *= options.opacity;
            if options.blend_mode != BlendMode::SrcOver {
                self.state.blend = options.blend_mode;
            }
            GroupKind::Degraded
        } else {
            self.stats.offscreen_groups += 1;
            let layer = self.pool.borrow(layer_bounds);
            self.layers.push(layer);
            self.state = saved.for_layer();
            GroupKind::Offscreen {
                opacity: options.opacity,
                blend: options.blend_mode,
                filter: options.filter.clone(),
            }
        };
        self.scopes.push(Scope::Group { saved, kind });
    }

    fn group_end(&mut self) -> StratumResult<()> {
        let Some(Scope::Group { saved, kind }) = self.scopes.pop() else {
            return Err(StratumError::unbalanced("group_end does not close a group"));
        };
        self.state = saved;
        let GroupKind::Offscreen {
            opacity,
            blend,
            filter,
        } = kind
        else {
            return Ok(());
        };

        let layer = self
            .layers
            .pop()
            .ok_or_else(|| StratumError::evaluation("group layer missing"))?;
        let filtered = match filter.as_ref().filter(|f| !f.is_empty()) {
            Some(filter) => {
                let evaluator = FilterEvaluator {
                    transform: self.state.transform,
                    parallel: self.parallel,
                };
                Some(evaluator.evaluate(filter, &layer)?)
            }
            None => None,
        };

        let mode = match blend {
            BlendMode::SrcOver => self.state.blend,
            other => other,
        };
        self.composite_layer(filtered.as_ref().unwrap_or(&layer), opacity, mode)?;
        self.pool.release(layer);
        Ok(())
    }

    /// Blend a finished layer into the current target, modulated by the restored state.
    fn composite_layer(
        &mut self,
        layer: &Surface,
        opacity: f32,
        mode: BlendMode,
    ) -> StratumResult<()> {
        let state = &self.state;
        let region = state.limit(self.target_bounds()).intersect(layer.bounds);
        let Some(target) = self.layers.last_mut() else {
            return Err(StratumError::evaluation("no render target"));
        };
        for y in region.y0..region.y1 {
            for x in region.x0..region.x1 {
                let cov = opacity * state.modulation(x, y);
                if cov <= 0.0 {
                    continue;
                }
                if let Some(dst) = target.get_mut(x, y) {
                    *dst = blend_px(mode, layer.get(x, y), *dst, cov);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
