use std::sync::Arc;

use crate::foundation::core::{Canvas, PixelBounds, Rect, Vec2};
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::{Path, Transform};
use crate::paint::{FillRule, Style};
use crate::scene::command::{Command, DisplayList, GlyphRun, GroupOptions};
use crate::scene::node::Node;
use crate::scene::state::{ClipEntry, ContextState, MaskRef, MaskType, ScopeKind, StateStack};

/// Group that has begun but not ended, with the device bounds of its content so far.
#[derive(Clone, Debug)]
struct OpenGroup {
    command_index: usize,
    bounds: Option<Rect>,
    padding: Vec2,
    /// Clips pushed before the group; they apply when the layer is composited, not inside it.
    clip_base: usize,
    mask_depth: usize,
}

#[derive(Clone, Copy, Debug)]
struct OpenMask {
    mask_type: MaskType,
    command_index: usize,
}

/// Per-frame command recorder.
///
/// Obtained from `Engine::begin_frame`, built single-threaded in program order, and turned into an
/// immutable [`DisplayList`] when submitted.
#[derive(Debug)]
pub struct Scene {
    frame_id: u64,
    canvas: Canvas,
    commands: Vec<Command>,
    stack: StateStack<ContextState>,
    groups: Vec<OpenGroup>,
    masks: Vec<OpenMask>,
}

impl Scene {
    pub(crate) fn new(frame_id: u64, canvas: Canvas) -> Self {
        Self {
            frame_id,
            canvas,
            commands: Vec::new(),
            stack: StateStack::new(ContextState::default()),
            groups: Vec::new(),
            masks: Vec::new(),
        }
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// State in effect for the next command.
    pub fn state(&self) -> &ContextState {
        self.stack.current()
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

    pub fn save(&mut self) {
        self.stack.push(ScopeKind::Save);
        self.commands.push(Command::Save);
    }

    pub fn restore(&mut self) -> StratumResult<()> {
        self.stack
            .pop(ScopeKind::Save, "restore")
            .map_err(|err| self.loud(err))?;
        self.commands.push(Command::Restore);
        Ok(())
    }

    /// Right-multiply the current transform by `t`.
    pub fn transform(&mut self, t: Transform) {
        let cur = self.stack.current_mut();
        cur.transform = cur.transform.multiply(t);
        self.commands.push(Command::Transform(t));
    }

    /// Intersect the clip with `path` under `rule`, in the current user space.
    pub fn clip_path(&mut self, path: &Path, rule: FillRule) {
        let cur = self.stack.current_mut();
        let transform = cur.transform;
        cur.clips.push(ClipEntry {
            path: path.clone(),
            rule,
            transform,
        });
        self.commands.push(Command::Clip {
            path: path.clone(),
            rule,
        });
    }

    /// Start recording mask content. Draws until the matching `mask_end` go to the mask only.
    pub fn mask_begin(&mut self, mask_type: MaskType) {
        let command_index = self.commands.len();
        self.commands.push(Command::MaskBegin(mask_type));
        self.stack.push(ScopeKind::Mask);
        let cur = self.stack.current_mut();
        cur.clips.clear();
        cur.mask = None;
        self.masks.push(OpenMask {
            mask_type,
            command_index,
        });
    }

    /// Finish the mask; it applies to the enclosing scope until that scope is restored.
    pub fn mask_end(&mut self) -> StratumResult<()> {
        self.stack
            .pop(ScopeKind::Mask, "mask_end")
            .map_err(|err| self.loud(err))?;
        let Some(open) = self.masks.pop() else {
            return Err(self.loud(StratumError::unbalanced("mask_end without mask_begin")));
        };
        let cur = self.stack.current_mut();
        let previous = cur.mask.take().map(Arc::new);
        cur.mask = Some(MaskRef {
            mask_type: open.mask_type,
            command_index: open.command_index,
            composed_with: previous,
        });
        self.commands.push(Command::MaskEnd);
        Ok(())
    }

    /// Record a path draw. Styles without any paint record nothing.
    pub fn draw_path(&mut self, path: &Path, style: &Style) {
        if style.is_noop() || path.is_empty() {
            return;
        }
        let bounds = self.draw_bounds(path, style);
        self.extend_group_bounds(bounds);
        self.commands.push(Command::Draw {
            path: path.clone(),
            style: style.clone(),
            bounds,
        });
    }

    /// Record every glyph of `run` as a path draw at its origin.
    pub fn draw_glyph_run(&mut self, run: &GlyphRun, style: &Style) -> StratumResult<()> {
        for glyph in run.glyphs.iter().filter(|g| !g.path.is_empty()) {
            self.save();
            self.transform(Transform::translate(glyph.origin.x, glyph.origin.y));
            self.draw_path(&glyph.path, style);
            self.restore()?;
        }
        Ok(())
    }

    /// Record a node with its transform. Partial opacity renders through a group so overlapping
    /// fill and stroke fade as one.
    pub fn draw_node(&mut self, node: &Node) -> StratumResult<()> {
        self.save();
        self.transform(node.transform);
        if node.opacity < 1.0 {
            self.group_begin(GroupOptions::opacity(node.opacity));
            self.draw_path(&node.path, &node.style);
            self.group_end()?;
        } else {
            self.draw_path(&node.path, &node.style);
        }
        self.restore()
    }

    pub fn group_begin(&mut self, mut options: GroupOptions) {
        options.opacity = if options.opacity.is_nan() {
            0.0
        } else {
            options.opacity.clamp(0.0, 1.0)
        };

        let state = self.stack.current();
        let padding = options
            .filter
            .as_ref()
            .map(|f| f.padding(state.transform))
            .unwrap_or(Vec2::ZERO);
        self.groups.push(OpenGroup {
            command_index: self.commands.len(),
            bounds: None,
            padding,
            clip_base: state.clips.len(),
            mask_depth: self.masks.len(),
        });

        self.stack.push(ScopeKind::Group);
        let cur = self.stack.current_mut();
        cur.group_opacity *= options.opacity;
        cur.group_blend = options.blend_mode;

        self.commands.push(Command::GroupBegin {
            options,
            bounds: PixelBounds::EMPTY,
        });
    }

    pub fn group_end(&mut self) -> StratumResult<()> {
        self.stack
            .pop(ScopeKind::Group, "group_end")
            .map_err(|err| self.loud(err))?;
        let Some(group) = self.groups.pop() else {
            return Err(self.loud(StratumError::unbalanced("group_end without group_begin")));
        };

        let content = group
            .bounds
            .map(|r| r.inflate(group.padding.x, group.padding.y));
        if let Some(Command::GroupBegin { bounds, .. }) = self.commands.get_mut(group.command_index)
        {
            *bounds = content.map(PixelBounds::from_rect_outer).unwrap_or(PixelBounds::EMPTY);
        }
        if let Some(r) = content {
            self.extend_group_bounds(r);
        }

        self.commands.push(Command::GroupEnd);
        Ok(())
    }

    /// Freeze the recording. Fails if any save, group or mask is still open.
    pub fn finish(self) -> StratumResult<DisplayList> {
        if let Err(err) = self.stack.ensure_balanced() {
            tracing::error!(frame = self.frame_id, error = %err, "scene finished unbalanced");
            return Err(err);
        }
        Ok(DisplayList {
            frame_id: self.frame_id,
            canvas: self.canvas,
            commands: self.commands.into(),
        })
    }

    fn loud(&self, err: StratumError) -> StratumError {
        tracing::error!(
            frame = self.frame_id,
            command = self.commands.len(),
            error = %err,
            "state stack violation"
        );
        err
    }

    /// Device-space bounds of the draw, stroke outset included. Not clipped.
    fn draw_bounds(&self, path: &Path, style: &Style) -> Rect {
        let mut user = path.bounds();
        if style.stroke.is_some() {
            let outset = style.effective_stroke_style().outset();
            user = user.inflate(outset, outset);
        }
        self.stack.current().transform.transform_rect_bbox(user)
    }

    /// Union `device` into the innermost open group, clipped by the clips pushed inside it.
    ///
    /// Content recorded into a mask opened after the group does not extend the group.
    fn extend_group_bounds(&mut self, device: Rect) {
        let state = self.stack.current();
        let Some(group) = self.groups.last_mut() else {
            return;
        };
        if self.masks.len() != group.mask_depth {
            return;
        }
        let clipped = state
            .clips
            .get(group.clip_base..)
            .unwrap_or(&[])
            .iter()
            .map(ClipEntry::device_bounds)
            .fold(device, |acc, clip| acc.intersect(clip));
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return;
        }
        group.bounds = Some(match group.bounds {
            Some(b) => b.union(clipped),
            None => clipped,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/recorder.rs"]
mod tests;
