//! FlatLaf styling engine
//!
//! Parses the FlatLaf style language, resolves references and color
//! functions against a [`UiDefaults`] store, layers type, class and inline
//! styles, and applies the result to styleable targets.
//!
//! - **Parsing**: `key: value; key2: value2` text into a typed [`StyleMap`]
//! - **Values**: type detection from key names, `{type}` prefixes, fonts,
//!   borders, insets and the color function language
//! - **Resolution**: `$key` references and `@variables`, cycle-safe
//! - **Defaults**: theme `.properties` loading with key prefixes and wildcards
//! - **Layering**: `[style]Type`, `[style].class`, `[style]Type.class`, inline
//! - **Apply**: per-type [`StyleableTable`] descriptors with type coercion
//! - **Caching**: LRU style cache and per-line theme document cache, both
//!   bound to a global invalidation counter
//!
//! # Example
//!
//! ```rust
//! use flatlaf_style::{parse, StyleValue, UiDefaults};
//!
//! let mut defaults = UiDefaults::new();
//! defaults.load_properties("@accent = #f00\nButton.focusColor = @accent\n").unwrap();
//!
//! let style = parse("background: darken(@accent,20%); arc: 8", &defaults).unwrap().unwrap();
//! assert_eq!(style["background"].as_color().map(|c| c.rgb_u32()), Some(0x990000));
//! assert_eq!(style["arc"], StyleValue::Int(8));
//! ```

pub mod cache;
pub mod color_eval;
pub mod defaults;
pub mod error;
pub mod layering;
pub mod loader;
pub mod parser;
pub mod properties;
pub mod resolver;
pub mod state;
pub mod styleable;
pub mod value;

pub use cache::{ParsedStyleCache, ThemeDocument};
pub use color_eval::{parse_color, parse_color_or_function};
pub use defaults::{LoadReport, Platform, UiDefaults};
pub use error::{Result, StyleError};
pub use layering::{
    concat_styles, join_styles, resolved_style, style_for_class, style_for_classes, style_for_type,
    StyleClasses,
};
pub use loader::parse_value;
pub use parser::{parse, ParseError};
pub use properties::{parse_properties, PropertiesError, PropertyEntry};
pub use resolver::{DefaultsResolver, NoopResolver, PropertiesResolver, Resolver};
pub use state::{
    clear_redraw_callback, generation, invalidate_all, set_redraw_callback, StyleChanges,
};
pub use styleable::{
    apply_style, coerce, convert_to_enum, parse_and_apply, Styleable, StyleableInfos,
    StyleableProperty, StyleableTable, StyleEnum,
};
pub use value::{BorderSpec, InstanceSpec, Style, StyleMap, StyleValue, ValueType};
