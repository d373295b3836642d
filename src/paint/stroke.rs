use std::sync::Arc;

use kurbo::{Cap, Join, Stroke, StrokeOpts};

use crate::foundation::core::BezPath;
use crate::foundation::error::{StratumError, StratumResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Immutable stroke geometry parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    cap: LineCap,
    join: LineJoin,
    miter_limit: f64,
    dashes: Arc<[f64]>,
    dash_offset: f64,
}

impl StrokeStyle {
    /// Solid stroke with butt caps, miter joins and miter limit 4.
    pub fn new(width: f64) -> StratumResult<Self> {
        Self::builder(width).build()
    }

    /// 1-unit solid stroke used when a style has a stroke paint but no stroke geometry.
    pub fn hairline() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dashes: Arc::from(Vec::new()),
            dash_offset: 0.0,
        }
    }

    pub fn builder(width: f64) -> StrokeStyleBuilder {
        StrokeStyleBuilder {
            width,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dashes: Vec::new(),
            dash_offset: 0.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }

    pub fn join(&self) -> LineJoin {
        self.join
    }

    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    pub fn dashes(&self) -> &[f64] {
        &self.dashes
    }

    pub fn dash_offset(&self) -> f64 {
        self.dash_offset
    }

    /// Copy with a different width; used when animation writes a new stroke width.
    pub fn with_width(&self, width: f64) -> StratumResult<Self> {
        validate_width(width)?;
        Ok(Self {
            width,
            ..self.clone()
        })
    }

    /// How far, in path units, the stroke outline can reach beyond the path bounds.
    pub fn outset(&self) -> f64 {
        let half = self.width * 0.5;
        let join = match self.join {
            LineJoin::Miter => self.miter_limit.max(1.0),
            LineJoin::Round | LineJoin::Bevel => 1.0,
        };
        let cap = match self.cap {
            LineCap::Square => std::f64::consts::SQRT_2,
            LineCap::Butt | LineCap::Round => 1.0,
        };
        half * join.max(cap)
    }

    pub fn to_kurbo(&self) -> Stroke {
        let mut stroke = Stroke::new(self.width)
            .with_caps(match self.cap {
                LineCap::Butt => Cap::Butt,
                LineCap::Round => Cap::Round,
                LineCap::Square => Cap::Square,
            })
            .with_join(match self.join {
                LineJoin::Miter => Join::Miter,
                LineJoin::Round => Join::Round,
                LineJoin::Bevel => Join::Bevel,
            })
            .with_miter_limit(self.miter_limit);
        if !self.dashes.is_empty() {
            stroke = stroke.with_dashes(self.dash_offset, self.dashes.iter().copied());
        }
        stroke
    }

    /// Fillable outline (non-zero rule) of `path` stroked with this style.
    pub fn outline(&self, path: &BezPath, tolerance: f64) -> BezPath {
        kurbo::stroke(path.iter(), &self.to_kurbo(), &StrokeOpts::default(), tolerance)
    }
}

/// Construction phase of a [`StrokeStyle`].
#[derive(Clone, Debug)]
pub struct StrokeStyleBuilder {
    width: f64,
    cap: LineCap,
    join: LineJoin,
    miter_limit: f64,
    dashes: Vec<f64>,
    dash_offset: f64,
}

impl StrokeStyleBuilder {
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// On/off lengths plus phase. An odd-length pattern is repeated to make it even.
    pub fn dash(mut self, pattern: impl IntoIterator<Item = f64>, offset: f64) -> Self {
        self.dashes = pattern.into_iter().collect();
        self.dash_offset = offset;
        self
    }

    pub fn build(self) -> StratumResult<StrokeStyle> {
        validate_width(self.width)?;
        if !self.miter_limit.is_finite() || self.miter_limit < 1.0 {
            return Err(StratumError::validation("stroke miter limit must be >= 1"));
        }
        if !self.dash_offset.is_finite() {
            return Err(StratumError::validation("stroke dash offset must be finite"));
        }
        if self.dashes.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(StratumError::validation(
                "stroke dash lengths must be finite and >= 0",
            ));
        }

        let mut dashes = self.dashes;
        if dashes.iter().sum::<f64>() <= 0.0 {
            // All-zero pattern renders solid.
            dashes.clear();
        } else if dashes.len() % 2 == 1 {
            dashes.extend_from_within(..);
        }

        Ok(StrokeStyle {
            width: self.width,
            cap: self.cap,
            join: self.join,
            miter_limit: self.miter_limit,
            dashes: dashes.into(),
            dash_offset: self.dash_offset,
        })
    }
}

fn validate_width(width: f64) -> StratumResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(StratumError::validation("stroke width must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/paint/stroke.rs"]
mod tests;
