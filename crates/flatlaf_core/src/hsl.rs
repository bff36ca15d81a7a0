//! HSL color space conversion
//!
//! Hue is in degrees (0-360), saturation and lightness are percentages
//! (0-100). All math is done in `f32` so that results match the packed
//! values recorded in theme files bit for bit.

use crate::color::Color;

/// Hue, saturation and lightness of a color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Convert an RGB color to HSL (alpha is ignored)
    pub fn from_rgb(color: Color) -> Self {
        let r = color.r as f32 / 255.0;
        let g = color.g as f32 / 255.0;
        let b = color.b as f32 / 255.0;

        let min = r.min(g).min(b);
        let max = r.max(g).max(b);

        let h = if max == min {
            0.0
        } else if max == r {
            ((60.0 * (g - b) / (max - min)) + 360.0) % 360.0
        } else if max == g {
            (60.0 * (b - r) / (max - min)) + 120.0
        } else {
            (60.0 * (r - g) / (max - min)) + 240.0
        };

        let l = (max + min) / 2.0;

        let s = if max == min {
            0.0
        } else if l <= 0.5 {
            (max - min) / (max + min)
        } else {
            (max - min) / (2.0 - max - min)
        };

        Self::new(h, s * 100.0, l * 100.0)
    }

    /// Convert to RGB with the given alpha (0.0 to 1.0)
    pub fn to_rgb(self, alpha: f32) -> Color {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let q = if l < 0.5 { l * (1.0 + s) } else { (l + s) - (s * l) };
        let p = 2.0 * l - q;

        let r = hue_to_rgb(p, q, h + (1.0 / 3.0)).clamp(0.0, 1.0);
        let g = hue_to_rgb(p, q, h).clamp(0.0, 1.0);
        let b = hue_to_rgb(p, q, h - (1.0 / 3.0)).clamp(0.0, 1.0);

        Color::from_f32(r, g, b, alpha)
    }
}

fn hue_to_rgb(p: f32, q: f32, mut h: f32) -> f32 {
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }

    if 6.0 * h < 1.0 {
        return p + ((q - p) * 6.0 * h);
    }
    if 2.0 * h < 1.0 {
        return q;
    }
    if 3.0 * h < 2.0 {
        return p + ((q - p) * 6.0 * ((2.0 / 3.0) - h));
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_to_hsl() {
        let hsl = Hsl::from_rgb(Color::RED);
        assert_eq!(hsl, Hsl::new(0.0, 100.0, 50.0));
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let hsl = Hsl::from_rgb(Color::rgb(0x80, 0x80, 0x80));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(Hsl::new(12.0, 34.0, 56.0).to_rgb(1.0), Color::from_hex(0xb57869));
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb(1.0), Color::GREEN);
    }

    #[test]
    fn test_negative_hue_wraps() {
        assert_eq!(
            Hsl::new(-40.0, 100.0, 50.0).to_rgb(1.0),
            Hsl::new(320.0, 100.0, 50.0).to_rgb(1.0)
        );
    }
}
