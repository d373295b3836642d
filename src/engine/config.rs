use std::io::Read;
use std::path::Path;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StratumError, StratumResult};
use crate::geometry::FLATTEN_TOLERANCE;

/// Limits enforced when the compositor allocates clip and layer resources.
///
/// Exceeding one degrades the offending clip, mask or group; the frame still completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResourceBudgets {
    /// Clips applied at once, across nested save scopes and groups.
    pub max_clip_depth: usize,
    /// Offscreen group and mask layers alive at once.
    pub max_offscreen_surfaces: usize,
    /// Largest offscreen layer edge, in pixels.
    pub max_surface_dim: u32,
}

impl Default for ResourceBudgets {
    fn default() -> Self {
        Self {
            max_clip_depth: 64,
            max_offscreen_surfaces: 32,
            max_surface_dim: 8192,
        }
    }
}

/// How much of the frame evaluation may vary between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeterminismProfile {
    /// Per-pixel kernels may run data-parallel.
    #[default]
    BestEffort,
    /// Everything runs on the calling thread in a fixed order.
    Strict,
}

impl DeterminismProfile {
    pub fn allows_parallel(self) -> bool {
        matches!(self, Self::BestEffort)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: Canvas,
    /// Background of every fresh frame, sRGB with straight alpha.
    pub clear_rgba8: [u8; 4],
    /// Curve flattening tolerance for stroking, in user units.
    pub flatten_tolerance: f64,
    pub budgets: ResourceBudgets,
    pub determinism: DeterminismProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 640,
                height: 360,
            },
            clear_rgba8: [0, 0, 0, 0],
            flatten_tolerance: FLATTEN_TOLERANCE,
            budgets: ResourceBudgets::default(),
            determinism: DeterminismProfile::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    pub fn with_clear_rgba8(mut self, rgba: [u8; 4]) -> Self {
        self.clear_rgba8 = rgba;
        self
    }

    pub fn with_budgets(mut self, budgets: ResourceBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_determinism(mut self, determinism: DeterminismProfile) -> Self {
        self.determinism = determinism;
        self
    }

    pub fn validate(&self) -> StratumResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StratumError::validation("canvas width/height must be > 0"));
        }
        if !self.flatten_tolerance.is_finite() || self.flatten_tolerance <= 0.0 {
            return Err(StratumError::validation(
                "flatten_tolerance must be finite and > 0",
            ));
        }
        let b = &self.budgets;
        if b.max_clip_depth == 0 || b.max_offscreen_surfaces == 0 || b.max_surface_dim == 0 {
            return Err(StratumError::validation("resource budgets must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> StratumResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| StratumError::validation(format!("invalid engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader(reader: impl Read) -> StratumResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| StratumError::validation(format!("invalid engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StratumResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            StratumError::Other(anyhow::Error::new(e).context(format!(
                "open engine config '{}'",
                path.display()
            )))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub(crate) fn parallel(&self) -> bool {
        self.determinism.allows_parallel()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
