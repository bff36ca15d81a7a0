//! FlatLaf core value types
//!
//! The values a theme is made of, independent of how they are parsed:
//!
//! - **Colors**: 8-bit RGBA [`Color`] with exact HSL conversion
//! - **Color functions**: lighten, darken, mix and friends, recorded as
//!   [`ColorFunction`] chains so derived colors can be recomputed
//! - **Geometry**: [`Insets`] and [`Dimension`]
//! - **Fonts**: [`Font`] and the [`FontSpec`] derivation rules
//! - **Scaling**: [`UiScale`] for pixel-valued properties
//!
//! # Example
//!
//! ```rust
//! use flatlaf_core::{color_functions, Color, UiScale};
//!
//! let darker = color_functions::darken(Color::RED, 0.2);
//! assert_eq!(darker.rgb_u32(), 0x990000);
//!
//! let scale = UiScale::new(1.5);
//! assert_eq!(scale.scale(4), 6);
//! ```

pub mod color;
pub mod color_functions;
pub mod font;
pub mod geometry;
pub mod hsl;
pub mod scale;

pub use color::Color;
pub use color_functions::{ColorFunction, DerivedColor, HslComponent};
pub use font::{Font, FontSpec, FontStyle, LOGICAL_FAMILIES};
pub use geometry::{Dimension, Insets};
pub use hsl::Hsl;
pub use scale::UiScale;
