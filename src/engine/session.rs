use std::collections::BTreeSet;

use crate::color::Color;
use crate::engine::config::EngineConfig;
use crate::foundation::error::{StratumError, StratumResult};
use crate::render::compositor::{Compositor, FrameStats};
use crate::render::framebuffer::{FrameRGBA, Framebuffer};
use crate::render::raster::{CpuRasterizer, Rasterizer};
use crate::render::surface::Surface;
use crate::scene::{DisplayList, Scene};

/// Frame-oriented entry point.
///
/// Each frame starts with [`Engine::begin_frame`], is recorded on the returned [`Scene`], and is
/// handed back through [`Engine::draw_scene`]. The engine owns the presented framebuffer; a frame
/// that fails leaves the previously presented pixels untouched.
pub struct Engine<R: Rasterizer = CpuRasterizer> {
    config: EngineConfig,
    rasterizer: R,
    framebuffer: Framebuffer,
    next_frame: u64,
    /// Frames handed out by `begin_frame` and not yet submitted.
    pending: BTreeSet<u64>,
    last_stats: Option<FrameStats>,
}

impl Engine<CpuRasterizer> {
    pub fn new(config: EngineConfig) -> StratumResult<Self> {
        Self::with_rasterizer(config, CpuRasterizer::new())
    }
}

impl<R: Rasterizer> Engine<R> {
    pub fn with_rasterizer(config: EngineConfig, rasterizer: R) -> StratumResult<Self> {
        config.validate()?;
        let framebuffer = Framebuffer::cleared(config.canvas, clear_color(&config));
        Ok(Self {
            config,
            rasterizer,
            framebuffer,
            next_frame: 0,
            pending: BTreeSet::new(),
            last_stats: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pixels of the last successfully drawn frame.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn frame_rgba(&self) -> FrameRGBA {
        self.framebuffer.to_rgba8()
    }

    pub fn last_stats(&self) -> Option<&FrameStats> {
        self.last_stats.as_ref()
    }

    /// Start recording a new frame.
    pub fn begin_frame(&mut self) -> Scene {
        let frame = self.next_frame;
        self.next_frame += 1;
        self.pending.insert(frame);
        Scene::new(frame, self.config.canvas)
    }

    /// Finish `scene` and present it over a cleared framebuffer.
    pub fn draw_scene(&mut self, scene: Scene) -> StratumResult<FrameStats> {
        let list = scene.finish()?;
        self.submit(&list)
    }

    /// Present an already finished display list. Each frame is accepted once, in any order.
    #[tracing::instrument(level = "debug", skip_all, fields(frame = list.frame_id()))]
    pub fn submit(&mut self, list: &DisplayList) -> StratumResult<FrameStats> {
        self.accept(list)?;
        let mut root = Surface::new(self.config.canvas.bounds());
        root.fill(clear_color(&self.config).to_px());
        let (surface, stats) = self.composite(list, root)?;
        self.framebuffer.surface = surface;
        self.last_stats = Some(stats.clone());
        Ok(stats)
    }

    /// Composite `scene` over the current contents of `target` instead of a cleared frame.
    ///
    /// `target` is only written when the whole frame succeeds.
    pub fn draw_scene_onto(
        &mut self,
        scene: Scene,
        target: &mut Framebuffer,
    ) -> StratumResult<FrameStats> {
        let list = scene.finish()?;
        if target.canvas() != list.canvas() {
            return Err(StratumError::validation(
                "target framebuffer canvas does not match the scene canvas",
            ));
        }
        self.accept(&list)?;
        let (surface, stats) = self.composite(&list, target.surface.clone())?;
        target.surface = surface;
        self.last_stats = Some(stats.clone());
        Ok(stats)
    }

    fn accept(&mut self, list: &DisplayList) -> StratumResult<()> {
        if list.canvas() != self.config.canvas {
            return Err(StratumError::validation(
                "display list canvas does not match the engine canvas",
            ));
        }
        let frame = list.frame_id();
        if self.pending.remove(&frame) {
            return Ok(());
        }
        if frame < self.next_frame {
            return Err(StratumError::SceneAlreadySubmitted { frame });
        }
        Err(StratumError::validation(format!(
            "frame {frame} was not started by this engine"
        )))
    }

    fn composite(
        &mut self,
        list: &DisplayList,
        root: Surface,
    ) -> StratumResult<(Surface, FrameStats)> {
        let compositor = Compositor::new(
            &mut self.rasterizer,
            self.config.budgets,
            self.config.flatten_tolerance,
            self.config.parallel(),
        );
        compositor.run(list, root).inspect_err(|err| {
            if err.is_frame_fatal() {
                tracing::error!(frame = list.frame_id(), error = %err, "frame aborted");
            }
        })
    }
}

fn clear_color(config: &EngineConfig) -> Color {
    let [r, g, b, a] = config.clear_rgba8;
    Color::from_srgba8(r, g, b, a)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/session.rs"]
mod tests;
