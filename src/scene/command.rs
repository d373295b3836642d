use std::sync::Arc;

use crate::filter::Filter;
use crate::foundation::core::{Canvas, PixelBounds, Point, Rect};
use crate::geometry::{Path, Transform};
use crate::paint::{FillRule, Style};
use crate::render::blend::BlendMode;
use crate::scene::state::MaskType;

/// Options of a `group_begin`/`group_end` span.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupOptions {
    pub opacity: f32,
    pub blend_mode: BlendMode,
    /// Render into a cleared layer that never reads the backdrop.
    pub isolate: bool,
    pub filter: Option<Filter>,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blend_mode: BlendMode::SrcOver,
            isolate: false,
            filter: None,
        }
    }
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(opacity: f32) -> Self {
        Self::default().with_opacity(opacity)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn isolated(mut self) -> Self {
        self.isolate = true;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// A group that can be drawn straight into its parent without a layer.
    pub fn is_passthrough(&self) -> bool {
        !self.isolate
            && self.opacity >= 1.0
            && self.blend_mode == BlendMode::SrcOver
            && self.filter.is_none()
    }
}

/// One positioned glyph outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub path: Path,
    pub origin: Point,
}

/// Shaped text as produced by the text collaborator: outlines plus the run advance.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GlyphRun {
    pub glyphs: Vec<Glyph>,
    pub advance: f64,
}

impl GlyphRun {
    pub fn new(glyphs: Vec<Glyph>, advance: f64) -> Self {
        Self { glyphs, advance }
    }

    /// Union of the glyph outlines' bounds, placed at their origins.
    pub fn bounds(&self) -> Rect {
        self.glyphs
            .iter()
            .filter(|g| !g.path.is_empty())
            .map(|g| g.path.bounds() + g.origin.to_vec2())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }
}

/// Recorded scene command, replayed in order by the compositor.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Save,
    Restore,
    /// Right-multiply the current transform.
    Transform(Transform),
    Clip {
        path: Path,
        rule: FillRule,
    },
    MaskBegin(MaskType),
    MaskEnd,
    Draw {
        path: Path,
        style: Style,
        /// Device-space bounds of everything the draw can touch.
        bounds: Rect,
    },
    GroupBegin {
        options: GroupOptions,
        /// Device-space extent of the group content, filter margin included.
        bounds: PixelBounds,
    },
    GroupEnd,
}

/// Finished, immutable command list of one frame. Cheap to clone and safe to send to another
/// thread.
#[derive(Clone, Debug)]
pub struct DisplayList {
    pub(crate) frame_id: u64,
    pub(crate) canvas: Canvas,
    pub(crate) commands: Arc<[Command]>,
}

impl DisplayList {
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
