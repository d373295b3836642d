pub mod linear;
pub mod transfer;

pub use linear::Color;
pub use transfer::{LUMA_WEIGHTS, linear_to_srgb, luma, srgb_to_linear};
