//! Color types and utilities
//!
//! Colors are stored as 8-bit RGBA channels. Theme values are written and
//! compared as packed integers (`0xRRGGBB` or `0xAARRGGBB`), so the channel
//! values must survive conversions exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGBA color with u8 components (0 to 255)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create from float components (0.0 to 1.0), rounding each channel
    /// with `(x * 255 + 0.5)` truncation.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: channel_from_f32(r),
            g: channel_from_f32(g),
            b: channel_from_f32(b),
            a: channel_from_f32(a),
        }
    }

    /// Create an opaque color from `0xRRGGBB` (upper byte ignored)
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Create from `0xAARRGGBB`
    pub const fn from_argb(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    /// Create from a packed value, treating an all-zero alpha byte as opaque.
    ///
    /// This mirrors how theme tests write colors: `0x808000` is opaque olive,
    /// `0x80ff0000` is half transparent red.
    pub const fn from_hex(hex: u32) -> Self {
        if hex & 0xFF00_0000 != 0 {
            Self::from_argb(hex)
        } else {
            Self::from_rgb_u32(hex)
        }
    }

    /// Packed `0xAARRGGBB`
    pub const fn argb(&self) -> u32 {
        ((self.a as u32) << 24) | self.rgb_u32()
    }

    /// Packed `0xRRGGBB` without alpha
    pub const fn rgb_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Set alpha and return new color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { a: alpha, ..self }
    }

    /// Same color with alpha forced to 255
    pub const fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    /// Components as floats (0.0 to 1.0)
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Hex form used in theme files: `#rrggbb`, or `#rrggbbaa` when not opaque
    pub fn to_hex_string(&self) -> String {
        if self.is_opaque() {
            format!("#{:06x}", self.rgb_u32())
        } else {
            format!("#{:06x}{:02x}", self.rgb_u32(), self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

fn channel_from_f32(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
