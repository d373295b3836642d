//! Rasterization and compositing of recorded display lists.

pub mod blend;
pub(crate) mod compositor;
pub mod framebuffer;
pub mod raster;
pub(crate) mod surface;
pub(crate) mod surface_pool;

pub use blend::BlendMode;
pub use compositor::FrameStats;
pub use framebuffer::{FrameRGBA, Framebuffer};
pub use raster::{CpuRasterizer, Rasterizer};
pub use surface::Coverage;
