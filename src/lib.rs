//! Stratum is a retained-mode 2D scene and compositing engine.
//!
//! A frame is recorded, then composited:
//!
//! - Call [`Engine::begin_frame`] to get a [`Scene`]
//! - Record paths, clips, masks, groups and filters on it
//! - Hand it back with [`Engine::draw_scene`] and read the result from the [`Framebuffer`]
//!
//! All blending, gradient interpolation and filter math runs on linear, premultiplied color.
//! Pixels leave the engine as straight-alpha sRGB only through [`Framebuffer::to_rgba8`].
#![forbid(unsafe_code)]

mod foundation;

pub mod color;
pub mod engine;
pub mod filter;
pub mod geometry;
pub mod paint;
pub mod render;
pub mod scene;

pub use crate::foundation::core::{Affine, BezPath, Canvas, PixelBounds, Point, Rect, Vec2};
pub use crate::foundation::error::{StratumError, StratumResult};

pub use crate::color::Color;
pub use crate::engine::{DeterminismProfile, Engine, EngineConfig, ResourceBudgets};
pub use crate::filter::{
    ChannelSelector, ColorMatrixKind, CompositeOperator, Filter, FilterBuilder, FilterInput,
    MorphologyOperator, Primitive, PrimitiveId, TurbulenceKind,
};
pub use crate::geometry::{
    Path, PathBuilder, Transform, hit_test_fill, hit_test_fill_transformed, hit_test_stroke,
    hit_test_stroke_styled,
};
pub use crate::paint::{
    FillRule, GradientStop, GradientUnits, Image, LineCap, LineJoin, LinearGradient, Paint,
    PaintOrder, Pattern, RadialGradient, SpreadMethod, StrokeStyle, Style,
};
pub use crate::render::{BlendMode, CpuRasterizer, FrameRGBA, FrameStats, Framebuffer, Rasterizer};
pub use crate::scene::{
    DisplayList, Glyph, GlyphRun, GroupOptions, MaskType, Node, Property, PropertyValue, Scene,
};
