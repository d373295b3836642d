use crate::color::transfer::{linear_to_srgb, luma, srgb_to_linear};
use crate::foundation::math::{Px, clamp01, lerp_px};

/// RGBA color stored as linear light with premultiplied alpha.
///
/// Public constructors take sRGB-encoded, straight-alpha components; the conversion to linear
/// and the premultiplication happen once, here. Channels never exceed alpha.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// sRGB-encoded straight-alpha components in `[0, 1]`.
    pub fn from_srgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_linear(
            srgb_to_linear(clamp01(r)),
            srgb_to_linear(clamp01(g)),
            srgb_to_linear(clamp01(b)),
            a,
        )
    }

    /// sRGB-encoded straight-alpha bytes. Alpha is linear coverage, as everywhere.
    pub fn from_srgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_srgba8(r, g, b, 255)
    }

    /// Linear-light straight-alpha components.
    pub fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = clamp01(a);
        Self {
            r: clamp01(r) * a,
            g: clamp01(g) * a,
            b: clamp01(b) * a,
            a,
        }
    }

    /// Already linear and premultiplied. Channels are clamped into `[0, a]`.
    pub fn from_linear_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = clamp01(a);
        Self {
            r: r.clamp(0.0, a),
            g: g.clamp(0.0, a),
            b: b.clamp(0.0, a),
            a,
        }
    }

    pub(crate) fn from_px(p: Px) -> Self {
        Self::from_linear_premul(p[0], p[1], p[2], p[3])
    }

    pub(crate) fn to_px(self) -> Px {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied linear components `[r·a, g·a, b·a, a]`.
    pub fn to_linear_premul(self) -> [f32; 4] {
        self.to_px()
    }

    /// Straight-alpha linear components.
    pub fn to_linear(self) -> [f32; 4] {
        if self.a <= 0.0 {
            return [0.0; 4];
        }
        [
            clamp01(self.r / self.a),
            clamp01(self.g / self.a),
            clamp01(self.b / self.a),
            self.a,
        ]
    }

    /// Straight-alpha sRGB components in `[0, 1]`.
    pub fn to_srgba(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_linear();
        [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b), a]
    }

    pub fn to_srgba8(self) -> [u8; 4] {
        let s = self.to_srgba();
        s.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    pub fn alpha(self) -> f32 {
        self.a
    }

    /// Interpolate in premultiplied linear space.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::from_px(lerp_px(self.to_px(), other.to_px(), clamp01(t)))
    }

    /// Luma of the premultiplied color (luma × alpha).
    pub fn luminance(self) -> f32 {
        luma(self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/linear.rs"]
mod tests;
