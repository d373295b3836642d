use crate::color::Color;
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::{Path, Transform};
use crate::paint::{Paint, Style};

/// Animatable field of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Transform,
    Opacity,
    FillColor,
    StrokeColor,
    StrokeWidth,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Property::Transform => "transform",
            Property::Opacity => "opacity",
            Property::FillColor => "fill_color",
            Property::StrokeColor => "stroke_color",
            Property::StrokeWidth => "stroke_width",
        }
    }
}

/// Already-resolved value written by the animation collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Transform(Transform),
    Scalar(f64),
    Color(Color),
}

/// A drawable scene object with addressable fields.
///
/// Values are written between frames, before `draw_node` records the node into a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub path: Path,
    pub style: Style,
    pub transform: Transform,
    pub opacity: f32,
}

impl Node {
    pub fn new(path: Path, style: Style) -> Self {
        Self {
            path,
            style,
            transform: Transform::IDENTITY,
            opacity: 1.0,
        }
    }

    pub fn set(&mut self, property: Property, value: PropertyValue) -> StratumResult<()> {
        match (property, value) {
            (Property::Transform, PropertyValue::Transform(t)) => self.transform = t,
            (Property::Opacity, PropertyValue::Scalar(v)) => {
                if !v.is_finite() {
                    return Err(StratumError::validation("opacity must be finite"));
                }
                self.opacity = v.clamp(0.0, 1.0) as f32;
            }
            (Property::FillColor, PropertyValue::Color(c)) => {
                self.style.fill = Some(Paint::Solid(c))
            }
            (Property::StrokeColor, PropertyValue::Color(c)) => {
                self.style.stroke = Some(Paint::Solid(c))
            }
            (Property::StrokeWidth, PropertyValue::Scalar(w)) => {
                let style = self.style.effective_stroke_style().with_width(w)?;
                self.style.stroke_style = Some(style);
            }
            (property, value) => {
                return Err(StratumError::validation(format!(
                    "property '{}' cannot take {value:?}",
                    property.name()
                )));
            }
        }
        Ok(())
    }

    /// Current value of `property`. `None` when the field is unset or not a solid color.
    pub fn get(&self, property: Property) -> Option<PropertyValue> {
        match property {
            Property::Transform => Some(PropertyValue::Transform(self.transform)),
            Property::Opacity => Some(PropertyValue::Scalar(f64::from(self.opacity))),
            Property::FillColor => self
                .style
                .fill
                .as_ref()
                .and_then(Paint::as_solid)
                .map(PropertyValue::Color),
            Property::StrokeColor => self
                .style
                .stroke
                .as_ref()
                .and_then(Paint::as_solid)
                .map(PropertyValue::Color),
            Property::StrokeWidth => self
                .style
                .stroke_style
                .as_ref()
                .map(|s| PropertyValue::Scalar(s.width())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
