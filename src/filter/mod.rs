//! Filter graphs: declaration-ordered image-processing primitives wired by symbolic inputs.
//!
//! A [`Filter`] is validated once by [`FilterBuilder::build`]. Every input reference is resolved to
//! a [`Slot`] at construction, so a dangling or forward reference fails with
//! `InvalidFilterGraph` before any frame uses the filter.

pub(crate) mod blur;
pub(crate) mod color_matrix;
pub(crate) mod composite;
pub(crate) mod displacement;
pub(crate) mod eval;
pub(crate) mod morphology;
pub(crate) mod offset;
pub(crate) mod turbulence;

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::color::Color;
use crate::foundation::core::Vec2;
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::Transform;

/// Index of a primitive inside its filter, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// Symbolic input of a primitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterInput {
    SourceGraphic,
    SourceAlpha,
    /// Output of the primitive declared just before. `SourceGraphic` for the first primitive.
    PreviousResult,
    /// Output registered with [`FilterBuilder::push_named`].
    Named(String),
    /// Output of an earlier primitive by position.
    Result(PrimitiveId),
}

/// Resolved input of a primitive inside a built [`Filter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    SourceGraphic,
    SourceAlpha,
    Result(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColorMatrixKind {
    /// Row-major 4x5 matrix over unpremultiplied `[r, g, b, a, 1]`.
    Matrix([f32; 20]),
    Saturate(f32),
    /// Degrees.
    HueRotate(f32),
    LuminanceToAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompositeOperator {
    Over,
    In,
    Out,
    Atop,
    Xor,
    Arithmetic { k1: f32, k2: f32, k3: f32, k4: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelSelector {
    R,
    G,
    B,
    #[default]
    A,
}

impl ChannelSelector {
    pub(crate) fn index(self) -> usize {
        match self {
            ChannelSelector::R => 0,
            ChannelSelector::G => 1,
            ChannelSelector::B => 2,
            ChannelSelector::A => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurbulenceKind {
    FractalNoise,
    #[default]
    Turbulence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphologyOperator {
    Erode,
    Dilate,
}

/// One filter stage. `I` is [`FilterInput`] while declaring and [`Slot`] once built.
///
/// Lengths (`std_dev`, `dx`, `radius`, `scale`, frequencies) are in the user space of the group
/// that carries the filter.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive<I = FilterInput> {
    GaussianBlur {
        input: I,
        std_dev_x: f64,
        std_dev_y: f64,
    },
    Offset {
        input: I,
        dx: f64,
        dy: f64,
    },
    ColorMatrix {
        input: I,
        kind: ColorMatrixKind,
    },
    Composite {
        in1: I,
        in2: I,
        operator: CompositeOperator,
    },
    DisplacementMap {
        in1: I,
        in2: I,
        scale: f64,
        x_channel: ChannelSelector,
        y_channel: ChannelSelector,
    },
    Turbulence {
        base_freq_x: f64,
        base_freq_y: f64,
        num_octaves: u32,
        seed: i32,
        kind: TurbulenceKind,
    },
    Morphology {
        input: I,
        operator: MorphologyOperator,
        radius_x: f64,
        radius_y: f64,
    },
    DropShadow {
        input: I,
        dx: f64,
        dy: f64,
        std_dev: f64,
        color: Color,
    },
    Flood {
        color: Color,
    },
    Merge {
        inputs: SmallVec<[I; 4]>,
    },
}

impl Primitive<FilterInput> {
    pub fn gaussian_blur(std_dev: f64) -> Self {
        Self::gaussian_blur_xy(std_dev, std_dev)
    }

    pub fn gaussian_blur_xy(std_dev_x: f64, std_dev_y: f64) -> Self {
        Primitive::GaussianBlur {
            input: FilterInput::PreviousResult,
            std_dev_x,
            std_dev_y,
        }
    }

    pub fn offset(dx: f64, dy: f64) -> Self {
        Primitive::Offset {
            input: FilterInput::PreviousResult,
            dx,
            dy,
        }
    }

    pub fn color_matrix(kind: ColorMatrixKind) -> Self {
        Primitive::ColorMatrix {
            input: FilterInput::PreviousResult,
            kind,
        }
    }

    pub fn composite(operator: CompositeOperator, in1: FilterInput, in2: FilterInput) -> Self {
        Primitive::Composite { in1, in2, operator }
    }

    pub fn displacement_map(
        in1: FilterInput,
        in2: FilterInput,
        scale: f64,
        x_channel: ChannelSelector,
        y_channel: ChannelSelector,
    ) -> Self {
        Primitive::DisplacementMap {
            in1,
            in2,
            scale,
            x_channel,
            y_channel,
        }
    }

    pub fn turbulence(
        base_freq_x: f64,
        base_freq_y: f64,
        num_octaves: u32,
        seed: i32,
        kind: TurbulenceKind,
    ) -> Self {
        Primitive::Turbulence {
            base_freq_x,
            base_freq_y,
            num_octaves,
            seed,
            kind,
        }
    }

    pub fn morphology(operator: MorphologyOperator, radius_x: f64, radius_y: f64) -> Self {
        Primitive::Morphology {
            input: FilterInput::PreviousResult,
            operator,
            radius_x,
            radius_y,
        }
    }

    pub fn drop_shadow(dx: f64, dy: f64, std_dev: f64, color: Color) -> Self {
        Primitive::DropShadow {
            input: FilterInput::PreviousResult,
            dx,
            dy,
            std_dev,
            color,
        }
    }

    pub fn flood(color: Color) -> Self {
        Primitive::Flood { color }
    }

    pub fn merge(inputs: impl IntoIterator<Item = FilterInput>) -> Self {
        Primitive::Merge {
            inputs: inputs.into_iter().collect(),
        }
    }

    /// Replace the primary input of a single-input primitive. No effect on the others.
    pub fn with_input(mut self, new: FilterInput) -> Self {
        match &mut self {
            Primitive::GaussianBlur { input, .. }
            | Primitive::Offset { input, .. }
            | Primitive::ColorMatrix { input, .. }
            | Primitive::Morphology { input, .. }
            | Primitive::DropShadow { input, .. } => *input = new,
            Primitive::Composite { .. }
            | Primitive::DisplacementMap { .. }
            | Primitive::Turbulence { .. }
            | Primitive::Flood { .. }
            | Primitive::Merge { .. } => {}
        }
        self
    }
}

impl<I> Primitive<I> {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::GaussianBlur { .. } => "gaussian_blur",
            Primitive::Offset { .. } => "offset",
            Primitive::ColorMatrix { .. } => "color_matrix",
            Primitive::Composite { .. } => "composite",
            Primitive::DisplacementMap { .. } => "displacement_map",
            Primitive::Turbulence { .. } => "turbulence",
            Primitive::Morphology { .. } => "morphology",
            Primitive::DropShadow { .. } => "drop_shadow",
            Primitive::Flood { .. } => "flood",
            Primitive::Merge { .. } => "merge",
        }
    }

    fn try_map_inputs<J>(
        &self,
        mut f: impl FnMut(&I) -> StratumResult<J>,
    ) -> StratumResult<Primitive<J>> {
        Ok(match self {
            Primitive::GaussianBlur {
                input,
                std_dev_x,
                std_dev_y,
            } => Primitive::GaussianBlur {
                input: f(input)?,
                std_dev_x: *std_dev_x,
                std_dev_y: *std_dev_y,
            },
            Primitive::Offset { input, dx, dy } => Primitive::Offset {
                input: f(input)?,
                dx: *dx,
                dy: *dy,
            },
            Primitive::ColorMatrix { input, kind } => Primitive::ColorMatrix {
                input: f(input)?,
                kind: kind.clone(),
            },
            Primitive::Composite { in1, in2, operator } => Primitive::Composite {
                in1: f(in1)?,
                in2: f(in2)?,
                operator: *operator,
            },
            Primitive::DisplacementMap {
                in1,
                in2,
                scale,
                x_channel,
                y_channel,
            } => Primitive::DisplacementMap {
                in1: f(in1)?,
                in2: f(in2)?,
                scale: *scale,
                x_channel: *x_channel,
                y_channel: *y_channel,
            },
            Primitive::Turbulence {
                base_freq_x,
                base_freq_y,
                num_octaves,
                seed,
                kind,
            } => Primitive::Turbulence {
                base_freq_x: *base_freq_x,
                base_freq_y: *base_freq_y,
                num_octaves: *num_octaves,
                seed: *seed,
                kind: *kind,
            },
            Primitive::Morphology {
                input,
                operator,
                radius_x,
                radius_y,
            } => Primitive::Morphology {
                input: f(input)?,
                operator: *operator,
                radius_x: *radius_x,
                radius_y: *radius_y,
            },
            Primitive::DropShadow {
                input,
                dx,
                dy,
                std_dev,
                color,
            } => Primitive::DropShadow {
                input: f(input)?,
                dx: *dx,
                dy: *dy,
                std_dev: *std_dev,
                color: *color,
            },
            Primitive::Flood { color } => Primitive::Flood { color: *color },
            Primitive::Merge { inputs } => Primitive::Merge {
                inputs: inputs.iter().map(&mut f).collect::<StratumResult<_>>()?,
            },
        })
    }

    /// Distance `(x, y)` in user units the primitive can move content outwards.
    fn reach(&self) -> (f64, f64) {
        match self {
            Primitive::GaussianBlur {
                std_dev_x,
                std_dev_y,
                ..
            } => (3.0 * std_dev_x.abs(), 3.0 * std_dev_y.abs()),
            Primitive::Offset { dx, dy, .. } => (dx.abs(), dy.abs()),
            Primitive::DisplacementMap { scale, .. } => (scale.abs() * 0.5, scale.abs() * 0.5),
            Primitive::Morphology {
                operator: MorphologyOperator::Dilate,
                radius_x,
                radius_y,
                ..
            } => (radius_x.abs(), radius_y.abs()),
            Primitive::DropShadow {
                dx, dy, std_dev, ..
            } => (dx.abs() + 3.0 * std_dev.abs(), dy.abs() + 3.0 * std_dev.abs()),
            Primitive::ColorMatrix { .. }
            | Primitive::Composite { .. }
            | Primitive::Turbulence { .. }
            | Primitive::Morphology { .. }
            | Primitive::Flood { .. }
            | Primitive::Merge { .. } => (0.0, 0.0),
        }
    }

    fn validate_params(&self) -> StratumResult<()> {
        let finite_non_neg = |v: f64, what: &str| -> StratumResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(StratumError::invalid_filter(format!(
                    "{}: {what} must be finite and >= 0",
                    self.name()
                )));
            }
            Ok(())
        };
        let finite = |v: f64, what: &str| -> StratumResult<()> {
            if !v.is_finite() {
                return Err(StratumError::invalid_filter(format!(
                    "{}: {what} must be finite",
                    self.name()
                )));
            }
            Ok(())
        };
        match self {
            Primitive::GaussianBlur {
                std_dev_x,
                std_dev_y,
                ..
            } => {
                finite_non_neg(*std_dev_x, "std_dev_x")?;
                finite_non_neg(*std_dev_y, "std_dev_y")
            }
            Primitive::Offset { dx, dy, .. } => {
                finite(*dx, "dx")?;
                finite(*dy, "dy")
            }
            Primitive::DisplacementMap { scale, .. } => finite(*scale, "scale"),
            Primitive::Turbulence {
                base_freq_x,
                base_freq_y,
                ..
            } => {
                finite_non_neg(*base_freq_x, "base_freq_x")?;
                finite_non_neg(*base_freq_y, "base_freq_y")
            }
            Primitive::Morphology {
                radius_x, radius_y, ..
            } => {
                finite_non_neg(*radius_x, "radius_x")?;
                finite_non_neg(*radius_y, "radius_y")
            }
            Primitive::DropShadow {
                dx, dy, std_dev, ..
            } => {
                finite(*dx, "dx")?;
                finite(*dy, "dy")?;
                finite_non_neg(*std_dev, "std_dev")
            }
            Primitive::Merge { inputs } if inputs.is_empty() => Err(StratumError::invalid_filter(
                "merge: needs at least one input",
            )),
            Primitive::ColorMatrix { kind, .. } => match kind {
                ColorMatrixKind::Matrix(m) if m.iter().any(|v| !v.is_finite()) => Err(
                    StratumError::invalid_filter("color_matrix: matrix must be finite"),
                ),
                ColorMatrixKind::Saturate(s) | ColorMatrixKind::HueRotate(s)
                    if !s.is_finite() =>
                {
                    Err(StratumError::invalid_filter(
                        "color_matrix: parameter must be finite",
                    ))
                }
                _ => Ok(()),
            },
            Primitive::Composite { .. } | Primitive::Flood { .. } | Primitive::Merge { .. } => {
                Ok(())
            }
        }
    }
}

/// Accumulates primitives, then validates and resolves them into a [`Filter`].
#[derive(Clone, Debug, Default)]
pub struct FilterBuilder {
    primitives: Vec<(Option<String>, Primitive<FilterInput>)>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, primitive: Primitive<FilterInput>) -> Self {
        self.primitives.push((None, primitive));
        self
    }

    /// Push a primitive whose output later primitives can reference as `FilterInput::Named(name)`.
    pub fn push_named(
        mut self,
        name: impl Into<String>,
        primitive: Primitive<FilterInput>,
    ) -> Self {
        self.primitives.push((Some(name.into()), primitive));
        self
    }

    pub fn build(self) -> StratumResult<Filter> {
        let mut names: HashMap<String, usize> = HashMap::new();
        let mut resolved = Vec::with_capacity(self.primitives.len());

        for (idx, (name, prim)) in self.primitives.iter().enumerate() {
            prim.validate_params()?;
            let slot = prim.try_map_inputs(|input| resolve(input, idx, &names))?;
            resolved.push(slot);
            if let Some(name) = name
                && names.insert(name.clone(), idx).is_some()
            {
                return Err(StratumError::invalid_filter(format!(
                    "duplicate result name '{name}'"
                )));
            }
        }

        Ok(Filter {
            primitives: resolved.into(),
        })
    }
}

fn resolve(input: &FilterInput, idx: usize, names: &HashMap<String, usize>) -> StratumResult<Slot> {
    match input {
        FilterInput::SourceGraphic => Ok(Slot::SourceGraphic),
        FilterInput::SourceAlpha => Ok(Slot::SourceAlpha),
        FilterInput::PreviousResult => Ok(match idx {
            0 => Slot::SourceGraphic,
            _ => Slot::Result(idx - 1),
        }),
        FilterInput::Named(name) => names.get(name).map(|&i| Slot::Result(i)).ok_or_else(|| {
            StratumError::invalid_filter(format!(
                "primitive {idx} references unknown or later result '{name}'"
            ))
        }),
        FilterInput::Result(PrimitiveId(i)) if *i < idx => Ok(Slot::Result(*i)),
        FilterInput::Result(PrimitiveId(i)) => Err(StratumError::invalid_filter(format!(
            "primitive {idx} references primitive {i}, which is not evaluated before it"
        ))),
    }
}

/// Immutable, validated filter graph. Cheap to clone and share across frames.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Filter {
    primitives: Arc<[Primitive<Slot>]>,
}

impl Filter {
    pub fn builder() -> FilterBuilder {
        FilterBuilder::new()
    }

    /// The filter with no primitives: passes `SourceGraphic` through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Chain of primitives each consuming the previous result.
    pub fn chain(
        primitives: impl IntoIterator<Item = Primitive<FilterInput>>,
    ) -> StratumResult<Self> {
        primitives
            .into_iter()
            .fold(FilterBuilder::new(), FilterBuilder::push)
            .build()
    }

    pub fn primitives(&self) -> &[Primitive<Slot>] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Device-space margin, in pixels per axis, the filter needs around its source content.
    ///
    /// Reaches accumulate along the graph, so the sum over all primitives is a safe bound.
    pub fn padding(&self, transform: Transform) -> Vec2 {
        let (ux, uy) = self
            .primitives
            .iter()
            .map(Primitive::reach)
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let (sx, sy) = axis_scales(transform);
        Vec2::new((ux * sx).ceil(), (uy * sy).ceil())
    }
}

/// Per-axis device scale of user lengths. Rotated or skewed transforms use the larger scale on
/// both axes.
pub(crate) fn axis_scales(t: Transform) -> (f64, f64) {
    if t.b == 0.0 && t.c == 0.0 {
        (t.a.abs(), t.d.abs())
    } else {
        let (sx, sy) = t.scale_factors();
        let s = sx.max(sy);
        (s, s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/graph.rs"]
mod tests;
