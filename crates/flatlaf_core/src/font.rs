//! Fonts and font derivation
//!
//! A theme never names a complete font. It describes how to derive one from
//! a base font: change the style, change the size, or pick another family.
//! [`FontSpec`] records such a description and [`FontSpec::derive`] applies
//! it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Font style bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontStyle(pub u8);

impl FontStyle {
    pub const PLAIN: FontStyle = FontStyle(0);
    pub const BOLD: FontStyle = FontStyle(1);
    pub const ITALIC: FontStyle = FontStyle(2);
    pub const BOLD_ITALIC: FontStyle = FontStyle(3);

    pub const fn contains(self, other: FontStyle) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: FontStyle) -> FontStyle {
        FontStyle(self.0 | other.0)
    }

    pub const fn difference(self, other: FontStyle) -> FontStyle {
        FontStyle(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::BOLD), self.contains(Self::ITALIC)) {
            (false, false) => f.write_str("plain"),
            (true, false) => f.write_str("bold"),
            (false, true) => f.write_str("italic"),
            (true, true) => f.write_str("bold italic"),
        }
    }
}

/// A concrete font
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub style: FontStyle,
    pub size: i32,
}

impl Font {
    pub fn new(family: impl Into<String>, style: FontStyle, size: i32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.style.contains(FontStyle::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.style.contains(FontStyle::ITALIC)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Dialog", FontStyle::PLAIN, 12)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.style, self.size)
    }
}

/// Logical families that always exist
pub const LOGICAL_FAMILIES: &[&str] = &["Dialog", "DialogInput", "Monospaced", "SansSerif", "Serif"];

/// Description of a font derived from a base font
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Defaults key of the base font (`$key`); `None` uses the caller's base
    pub base_font_key: Option<String>,
    /// Candidate families, first available one wins
    pub families: Vec<String>,
    /// Absolute style (`normal`, `bold`, `italic`)
    pub style: Option<FontStyle>,
    /// Styles added with `+bold`/`+italic`
    pub add_style: FontStyle,
    /// Styles removed with `-bold`/`-italic`
    pub remove_style: FontStyle,
    /// Absolute size, 0 if unset
    pub absolute_size: i32,
    /// Size increment or decrement, 0 if unset
    pub relative_size: i32,
    /// Size factor (`150%` is 1.5), 0.0 if unset
    pub scale_size: f32,
}

impl FontSpec {
    /// Derive a concrete font from `base`.
    ///
    /// `is_available` decides whether a family can be used. Unavailable
    /// families are skipped; if none is available the base family is kept.
    pub fn derive(&self, base: &Font, is_available: impl Fn(&str) -> bool) -> Font {
        let family = self
            .families
            .iter()
            .find(|family| is_available(family))
            .cloned()
            .unwrap_or_else(|| base.family.clone());

        let style = match self.style {
            Some(style) => style,
            None => base.style.union(self.add_style).difference(self.remove_style),
        };

        let size = if self.absolute_size > 0 {
            self.absolute_size
        } else if self.relative_size != 0 {
            base.size + self.relative_size
        } else if self.scale_size > 0.0 {
            (base.size as f32 * self.scale_size + 0.5).floor() as i32
        } else {
            base.size
        };

        Font::new(family, style, size.max(1))
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(style) = self.style {
            parts.push(if style.is_empty() { "normal".into() } else { style.to_string() });
        }
        if self.add_style.contains(FontStyle::BOLD) {
            parts.push("+bold".into());
        }
        if self.remove_style.contains(FontStyle::BOLD) {
            parts.push("-bold".into());
        }
        if self.add_style.contains(FontStyle::ITALIC) {
            parts.push("+italic".into());
        }
        if self.remove_style.contains(FontStyle::ITALIC) {
            parts.push("-italic".into());
        }
        if self.absolute_size > 0 {
            parts.push(self.absolute_size.to_string());
        } else if self.relative_size != 0 {
            parts.push(format!("{:+}", self.relative_size));
        } else if self.scale_size > 0.0 {
            parts.push(format!("{}%", (self.scale_size * 100.0).round() as i32));
        }
        for family in &self.families {
            if family.contains(' ') {
                parts.push(format!("\"{}\"", family));
            } else {
                parts.push(family.clone());
            }
        }
        if let Some(key) = &self.base_font_key {
            parts.push(format!("${}", key));
        }
        f.write_str(&parts.join(" "))
    }
}
