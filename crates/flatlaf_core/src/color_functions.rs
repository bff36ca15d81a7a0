//! Color algebra used by theme values
//!
//! Functions operate either directly on RGB (`mix`, `fade`, `luma`) or on an
//! HSLA quadruple where hue is in degrees and saturation, lightness and alpha
//! are percentages (0-100).
//!
//! A [`ColorFunction`] is a recorded transformation. Chains of functions are
//! applied with [`apply_functions`], which is also how derived colors are
//! recomputed when their base color changes.
//!
//! # Example
//!
//! ```ignore
//! use flatlaf_core::{color_functions, Color};
//!
//! let lighter = color_functions::lighten(Color::RED, 0.2);
//! assert_eq!(lighter, Color::from_hex(0xff6666));
//! ```

use std::fmt;

use smallvec::SmallVec;

use crate::color::Color;
use crate::hsl::Hsl;

/// Which HSLA component a function works on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HslComponent {
    Hue = 0,
    Saturation = 1,
    Lightness = 2,
    Alpha = 3,
}

/// A recorded color transformation
#[derive(Clone, Debug, PartialEq)]
pub enum ColorFunction {
    /// lighten/darken/saturate/desaturate/fadein/fadeout/spin
    IncreaseDecrease {
        component: HslComponent,
        increase: bool,
        amount: f32,
        relative: bool,
        auto_inverse: bool,
    },
    /// changeHue/changeSaturation/changeLightness/changeAlpha
    Change { component: HslComponent, value: f32 },
    /// fade: set alpha (percentage)
    Fade { amount: f32 },
    /// mix the input color (first) with `color2`; weight in percent
    Mix { color2: Color, weight: f32 },
    /// mix `color1` with the input color (second); weight in percent
    Mix2 { color1: Color, weight: f32 },
}

impl ColorFunction {
    pub fn increase_decrease(
        component: HslComponent,
        increase: bool,
        amount: f32,
        relative: bool,
        auto_inverse: bool,
    ) -> Self {
        ColorFunction::IncreaseDecrease {
            component,
            increase,
            amount,
            relative,
            auto_inverse,
        }
    }

    /// Apply to an HSLA quadruple in place
    pub fn apply(&self, hsla: &mut [f32; 4]) {
        match *self {
            ColorFunction::IncreaseDecrease {
                component,
                increase,
                amount,
                relative,
                auto_inverse,
            } => {
                let mut amount2 = if increase { amount } else { -amount };

                if component == HslComponent::Hue {
                    hsla[0] = (hsla[0] + amount2).rem_euclid(360.0);
                    return;
                }

                let index = component as usize;
                if auto_inverse && should_inverse(hsla[index], increase) {
                    amount2 = -amount2;
                }
                hsla[index] = clamp(if relative {
                    hsla[index] * ((100.0 + amount2) / 100.0)
                } else {
                    hsla[index] + amount2
                });
            }
            ColorFunction::Change { component, value } => {
                let index = component as usize;
                hsla[index] = if component == HslComponent::Hue {
                    value.rem_euclid(360.0)
                } else {
                    clamp(value)
                };
            }
            ColorFunction::Fade { amount } => {
                hsla[3] = clamp(amount);
            }
            ColorFunction::Mix { color2, weight } => {
                let color1 = hsla_to_color(hsla);
                color_to_hsla(mix(color1, color2, weight / 100.0), hsla);
            }
            ColorFunction::Mix2 { color1, weight } => {
                let color2 = hsla_to_color(hsla);
                color_to_hsla(mix(color1, color2, weight / 100.0), hsla);
            }
        }
    }
}

fn should_inverse(value: f32, increase: bool) -> bool {
    if increase {
        value > 65.0
    } else {
        value < 35.0
    }
}

impl fmt::Display for ColorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorFunction::IncreaseDecrease {
                component,
                increase,
                amount,
                relative,
                auto_inverse,
            } => {
                let name = match (component, increase) {
                    (HslComponent::Hue, _) => "spin",
                    (HslComponent::Saturation, true) => "saturate",
                    (HslComponent::Saturation, false) => "desaturate",
                    (HslComponent::Lightness, true) => "lighten",
                    (HslComponent::Lightness, false) => "darken",
                    (HslComponent::Alpha, true) => "fadein",
                    (HslComponent::Alpha, false) => "fadeout",
                };
                write!(f, "{}({:.0}%", name, amount)?;
                if *relative {
                    f.write_str(" relative")?;
                }
                if *auto_inverse {
                    f.write_str(" autoInverse")?;
                }
                f.write_str(")")
            }
            ColorFunction::Change { component, value } => {
                let name = match component {
                    HslComponent::Hue => "changeHue",
                    HslComponent::Saturation => "changeSaturation",
                    HslComponent::Lightness => "changeLightness",
                    HslComponent::Alpha => "changeAlpha",
                };
                let unit = if *component == HslComponent::Hue { "" } else { "%" };
                write!(f, "{}({:.0}{})", name, value, unit)
            }
            ColorFunction::Fade { amount } => write!(f, "fade({:.0}%)", amount),
            ColorFunction::Mix { color2, weight } => {
                write!(f, "mix(#{:08x},{:.0}%)", color2.argb(), weight)
            }
            ColorFunction::Mix2 { color1, weight } => {
                write!(f, "mix2(#{:08x},{:.0}%)", color1.argb(), weight)
            }
        }
    }
}

/// A color computed from a base color by a chain of functions.
///
/// The chain is kept so tooling can recompute the value when the base color
/// is edited.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedColor {
    pub color: Color,
    pub functions: SmallVec<[ColorFunction; 2]>,
}

impl DerivedColor {
    pub fn new(color: Color, functions: impl IntoIterator<Item = ColorFunction>) -> Self {
        Self {
            color,
            functions: functions.into_iter().collect(),
        }
    }

    /// Recompute the derived value for a new base color
    pub fn derive_from(&self, base: Color) -> Color {
        apply_functions(base, &self.functions)
    }
}

pub fn lighten(color: Color, amount: f32) -> Color {
    hsl_increase_decrease(color, amount, HslComponent::Lightness, true)
}

pub fn darken(color: Color, amount: f32) -> Color {
    hsl_increase_decrease(color, amount, HslComponent::Lightness, false)
}

pub fn saturate(color: Color, amount: f32) -> Color {
    hsl_increase_decrease(color, amount, HslComponent::Saturation, true)
}

pub fn desaturate(color: Color, amount: f32) -> Color {
    hsl_increase_decrease(color, amount, HslComponent::Saturation, false)
}

/// Rotate hue by `angle` degrees
pub fn spin(color: Color, angle: f32) -> Color {
    hsl_increase_decrease(color, angle, HslComponent::Hue, true)
}

fn hsl_increase_decrease(
    color: Color,
    amount: f32,
    component: HslComponent,
    increase: bool,
) -> Color {
    let hsl = Hsl::from_rgb(color);
    let mut hsl = [hsl.h, hsl.s, hsl.l];
    let alpha = color.a as f32 / 255.0;

    let amount2 = if increase { amount } else { -amount };
    if component == HslComponent::Hue {
        hsl[0] = (hsl[0] + amount2).rem_euclid(360.0);
    } else {
        let index = component as usize;
        hsl[index] = clamp(hsl[index] + (amount2 * 100.0));
    }

    Hsl::new(hsl[0], hsl[1], hsl[2]).to_rgb(alpha)
}

/// Set alpha to `amount` (0.0 to 1.0)
pub fn fade(color: Color, amount: f32) -> Color {
    color.with_alpha(round_half_up(255.0 * amount).clamp(0, 255) as u8)
}

/// Mix two colors; `weight` 1.0 gives `color1`, 0.0 gives `color2`
pub fn mix(color1: Color, color2: Color, weight: f32) -> Color {
    if weight >= 1.0 {
        return color1;
    }
    if weight <= 0.0 {
        return color2;
    }
    if color1 == color2 {
        return color1;
    }

    let channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as f32;
        let c2 = c2 as f32;
        round_half_up(c2 + ((c1 - c2) * weight)).clamp(0, 255) as u8
    };

    Color::new(
        channel(color1.r, color2.r),
        channel(color1.g, color2.g),
        channel(color1.b, color2.b),
        channel(color1.a, color2.a),
    )
}

pub fn tint(color: Color, weight: f32) -> Color {
    mix(Color::WHITE, color, weight)
}

pub fn shade(color: Color, weight: f32) -> Color {
    mix(Color::BLACK, color, weight)
}

/// Relative luminance (0.0 for black to 1.0 for white)
pub fn luma(color: Color) -> f32 {
    let r = gamma_correction(color.r as f32 / 255.0);
    let g = gamma_correction(color.g as f32 / 255.0);
    let b = gamma_correction(color.b as f32 / 255.0);
    (0.2126 * r) + (0.7152 * g) + (0.0722 * b)
}

fn gamma_correction(value: f32) -> f32 {
    if value <= 0.03928 {
        value / 12.92
    } else {
        ((value as f64 + 0.055) / 1.055).powf(2.4) as f32
    }
}

/// Apply a chain of functions to a color
pub fn apply_functions(color: Color, functions: &[ColorFunction]) -> Color {
    // a single mix needs no round trip through HSL
    if let [single] = functions {
        match *single {
            ColorFunction::Mix { color2, weight } => return mix(color, color2, weight / 100.0),
            ColorFunction::Mix2 { color1, weight } => return mix(color1, color, weight / 100.0),
            _ => {}
        }
    }

    let mut hsla = [0.0; 4];
    color_to_hsla(color, &mut hsla);

    for function in functions {
        function.apply(&mut hsla);
    }

    hsla_to_color(&hsla)
}

pub fn clamp(value: f32) -> f32 {
    value.clamp(0.0, 100.0)
}

fn color_to_hsla(color: Color, hsla: &mut [f32; 4]) {
    let hsl = Hsl::from_rgb(color);
    hsla[0] = hsl.h;
    hsla[1] = hsl.s;
    hsla[2] = hsl.l;
    hsla[3] = (color.a as f32 / 255.0) * 100.0;
}

fn hsla_to_color(hsla: &[f32; 4]) -> Color {
    Hsl::new(hsla[0], hsla[1], hsla[2]).to_rgb(hsla[3] / 100.0)
}

/// `Math.round` semantics: round half up
fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_weights() {
        let red = Color::RED;
        let green = Color::GREEN;
        assert_eq!(mix(red, green, 0.1), Color::from_hex(0x1ae600));
        assert_eq!(mix(red, green, 0.5), Color::from_hex(0x808000));
        assert_eq!(mix(red, green, 0.9), Color::from_hex(0xe61a00));
        assert_eq!(mix(red, green, 1.5), red);
        assert_eq!(mix(red, green, -1.0), green);
    }

    #[test]
    fn test_tint_and_shade() {
        assert_eq!(tint(Color::MAGENTA, 0.25), Color::from_hex(0xff40ff));
        assert_eq!(shade(Color::MAGENTA, 0.5), Color::from_hex(0x800080));
    }

    #[test]
    fn test_luma() {
        assert_eq!(luma(Color::BLACK), 0.0);
        assert!((luma(Color::WHITE) - 1.0).abs() < 1e-6);
        assert!((luma(Color::RED) - 0.2126).abs() < 1e-6);
        assert!((luma(Color::GREEN) - 0.7152).abs() < 1e-6);
        assert!((luma(Color::BLUE) - 0.0722).abs() < 1e-6);
    }

    #[test]
    fn test_lighten_darken() {
        assert_eq!(lighten(Color::RED, 0.2), Color::from_hex(0xff6666));
        assert_eq!(darken(Color::RED, 0.2), Color::from_hex(0x990000));
    }

    #[test]
    fn test_spin_both_directions() {
        assert_eq!(spin(Color::RED, 40.0), Color::from_hex(0xffaa00));
        assert_eq!(spin(Color::RED, -40.0), Color::from_hex(0xff00aa));
    }

    #[test]
    fn test_fade() {
        assert_eq!(fade(Color::RED, 0.5), Color::from_hex(0x80ff0000));
    }

    #[test]
    fn test_apply_functions_chain() {
        let functions = [
            ColorFunction::increase_decrease(HslComponent::Lightness, false, 20.0, false, false),
            ColorFunction::increase_decrease(HslComponent::Saturation, true, 10.0, false, false),
        ];
        assert_eq!(
            apply_functions(Color::WHITE, &functions),
            Color::from_hex(0xd1c7c7)
        );
    }

    #[test]
    fn test_auto_inverse() {
        // lightness of white is 100 > 65, so lighten turns into darken
        let f = ColorFunction::increase_decrease(HslComponent::Lightness, true, 20.0, false, true);
        assert_eq!(apply_functions(Color::WHITE, &[f]), Color::from_hex(0xcccccc));
    }

    #[test]
    fn test_derived_color_recomputes() {
        let derived = DerivedColor::new(
            Color::from_hex(0x990000),
            [ColorFunction::increase_decrease(HslComponent::Lightness, false, 20.0, false, false)],
        );
        assert_eq!(derived.derive_from(Color::WHITE), Color::from_hex(0xcccccc));
    }

    #[test]
    fn test_display() {
        let f = ColorFunction::increase_decrease(HslComponent::Lightness, true, 20.0, true, false);
        assert_eq!(f.to_string(), "lighten(20% relative)");
        let f = ColorFunction::Change { component: HslComponent::Hue, value: 180.0 };
        assert_eq!(f.to_string(), "changeHue(180)");
    }
}
