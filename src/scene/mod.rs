//! Scene recording: the context state stack and the per-frame command list.

pub mod command;
pub mod node;
pub mod recorder;
pub mod state;

pub use command::{Command, DisplayList, Glyph, GlyphRun, GroupOptions};
pub use node::{Node, Property, PropertyValue};
pub use recorder::Scene;
pub use state::{ClipEntry, ContextState, MaskRef, MaskType, ScopeKind, StateStack};
