//! sRGB transfer functions and luma weights.
//!
//! Everything inside the engine is linear and premultiplied. These functions sit at the two
//! boundaries: color construction (sRGB in) and framebuffer emission (sRGB out).

/// Rec. 709 luma weights applied to linear RGB (luminance masks, `luminanceToAlpha`).
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// sRGB-encoded component in `[0, 1]` to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear-light component in `[0, 1]` to sRGB encoding.
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn srgb8_to_linear(c: u8) -> f32 {
    srgb_to_linear(f32::from(c) / 255.0)
}

pub fn linear_to_srgb8(c: f32) -> u8 {
    let c = if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
    (linear_to_srgb(c) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Luma of linear RGB. Works on premultiplied input too (yields luma scaled by alpha).
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

#[cfg(test)]
#[path = "../../tests/unit/color/transfer.rs"]
mod tests;
