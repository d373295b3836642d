use std::sync::Arc;

use crate::foundation::core::Rect;
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::{Path, Transform};
use crate::paint::FillRule;
use crate::render::blend::BlendMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    /// Mask coverage is the alpha of the mask content.
    #[default]
    Alpha,
    /// Mask coverage is the Rec. 709 luma of the (premultiplied) mask content.
    Luminance,
}

/// One clip in the clip stack, with the transform that was current when it was pushed.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipEntry {
    pub path: Path,
    pub rule: FillRule,
    pub transform: Transform,
}

impl ClipEntry {
    /// Device-space bounding box of the clip geometry.
    pub fn device_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.path.bounds())
    }
}

/// Identity of an active mask: the `mask_begin` command that produced it, plus the mask it was
/// composed with.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskRef {
    pub mask_type: MaskType,
    pub command_index: usize,
    pub composed_with: Option<Arc<MaskRef>>,
}

/// Graphics state in effect at a point of the recording.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextState {
    pub transform: Transform,
    pub clips: Vec<ClipEntry>,
    pub mask: Option<MaskRef>,
    /// Product of the opacities of every enclosing group.
    pub group_opacity: f32,
    /// Blend mode of the innermost enclosing group.
    pub group_blend: BlendMode,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            clips: Vec::new(),
            mask: None,
            group_opacity: 1.0,
            group_blend: BlendMode::SrcOver,
        }
    }
}

impl ContextState {
    /// Intersection of every clip's device bounds, `None` when unclipped.
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.clips
            .iter()
            .map(ClipEntry::device_bounds)
            .reduce(|a, b| a.intersect(b))
    }
}

/// What pushed a stack entry; each kind is popped only by its own closing call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Save,
    Group,
    Mask,
}

impl ScopeKind {
    fn opener(self) -> &'static str {
        match self {
            ScopeKind::Save => "save",
            ScopeKind::Group => "group_begin",
            ScopeKind::Mask => "mask_begin",
        }
    }
}

/// Stack of states with a base entry that is never popped.
#[derive(Clone, Debug)]
pub struct StateStack<S> {
    base: S,
    scopes: Vec<(ScopeKind, S)>,
}

impl<S: Clone> StateStack<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            scopes: Vec::new(),
        }
    }

    pub fn current(&self) -> &S {
        self.scopes.last().map(|(_, s)| s).unwrap_or(&self.base)
    }

    pub fn current_mut(&mut self) -> &mut S {
        match self.scopes.last_mut() {
            Some((_, s)) => s,
            None => &mut self.base,
        }
    }

    /// Push a copy of the current state.
    pub fn push(&mut self, kind: ScopeKind) {
        let copy = self.current().clone();
        self.scopes.push((kind, copy));
    }

    /// Pop the top state, which must have been pushed by `kind`.
    pub fn pop(&mut self, kind: ScopeKind, closer: &str) -> StratumResult<S> {
        if let Some((top, _)) = self.scopes.last()
            && *top != kind
        {
            return Err(StratumError::unbalanced(format!(
                "{closer} while a {} scope is still open",
                top.opener()
            )));
        }
        self.scopes.pop().map(|(_, s)| s).ok_or_else(|| {
            StratumError::unbalanced(format!("{closer} without matching {}", kind.opener()))
        })
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn top_kind(&self) -> Option<ScopeKind> {
        self.scopes.last().map(|(k, _)| *k)
    }

    pub fn count(&self, kind: ScopeKind) -> usize {
        self.scopes.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Fails if anything besides the base state is still on the stack.
    pub fn ensure_balanced(&self) -> StratumResult<()> {
        match self.top_kind() {
            None => Ok(()),
            Some(kind) => Err(StratumError::unbalanced(format!(
                "{} unclosed scope(s) at end of scene, innermost opened by {}",
                self.scopes.len(),
                kind.opener()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
