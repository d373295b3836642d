//! Frame lifecycle and engine configuration.

pub mod config;
pub mod session;

pub use config::{DeterminismProfile, EngineConfig, ResourceBudgets};
pub use session::Engine;
