//! Style layering
//!
//! A component's effective style is built from, lowest to highest:
//! 1. `[style]Type`
//! 2. per style class, in listed order: `[style].class` then `[style]Type.class`
//! 3. the inline style of the component
//!
//! Layers that are both text are concatenated (`a; b`), so the later
//! declaration wins when the text is parsed. As soon as a map is involved,
//! both sides are parsed and merged with the later layer winning.

use tracing::trace;

use crate::defaults::UiDefaults;
use crate::error::Result;
use crate::parser;
use crate::value::{Style, StyleMap};

const STYLE_PREFIX: &str = "[style]";

/// Style classes of a component
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleClasses {
    /// One class, or several separated by whitespace
    One(String),
    Many(Vec<String>),
}

impl StyleClasses {
    /// Class names in order, trimmed, empty names removed
    pub fn names(&self) -> Vec<&str> {
        match self {
            StyleClasses::One(classes) => classes.split_whitespace().collect(),
            StyleClasses::Many(classes) => classes
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }
}

impl From<&str> for StyleClasses {
    fn from(classes: &str) -> Self {
        StyleClasses::One(classes.to_string())
    }
}

impl From<String> for StyleClasses {
    fn from(classes: String) -> Self {
        StyleClasses::One(classes)
    }
}

impl From<Vec<String>> for StyleClasses {
    fn from(classes: Vec<String>) -> Self {
        StyleClasses::Many(classes)
    }
}

impl From<&[&str]> for StyleClasses {
    fn from(classes: &[&str]) -> Self {
        StyleClasses::Many(classes.iter().map(|c| c.to_string()).collect())
    }
}

fn style_at(key: &str, defaults: &UiDefaults) -> Option<Style> {
    let style = defaults.get_string(key)?;
    trace!(key = %key, "found style");
    Some(Style::Text(style))
}

/// `[style]Type`
pub fn style_for_type(type_name: &str, defaults: &UiDefaults) -> Option<Style> {
    style_at(&format!("{}{}", STYLE_PREFIX, type_name), defaults)
}

/// `[style].class` joined with `[style]Type.class`
pub fn style_for_class(class: &str, type_name: &str, defaults: &UiDefaults) -> Result<Option<Style>> {
    join_styles(
        style_at(&format!("{}.{}", STYLE_PREFIX, class), defaults),
        style_at(&format!("{}{}.{}", STYLE_PREFIX, type_name, class), defaults),
        defaults,
    )
}

/// Styles of all `classes` joined in listed order.
///
/// Unknown classes contribute nothing; `None` if no class is known.
pub fn style_for_classes(
    classes: Option<&StyleClasses>,
    type_name: &str,
    defaults: &UiDefaults,
) -> Result<Option<Style>> {
    let Some(classes) = classes else {
        return Ok(None);
    };

    let mut style = None;
    for class in classes.names() {
        style = join_styles(style, style_for_class(class, type_name, defaults)?, defaults)?;
    }
    Ok(style)
}

/// Join two styles; values of `style2` win
pub fn join_styles(style1: Option<Style>, style2: Option<Style>, defaults: &UiDefaults) -> Result<Option<Style>> {
    let (style1, style2) = match (style1, style2) {
        (None, style) | (style, None) => return Ok(style),
        (Some(style1), Some(style2)) => (style1, style2),
    };

    if let (Style::Text(text1), Style::Text(text2)) = (&style1, &style2) {
        return Ok(Some(Style::Text(format!("{}; {}", text1, text2))));
    }

    let mut map = to_map(style1, defaults)?;
    map.extend(to_map(style2, defaults)?);
    Ok(Some(Style::Map(map)))
}

/// Concatenate two style texts
pub fn concat_styles(style1: Option<&str>, style2: Option<&str>) -> Option<String> {
    match (style1, style2) {
        (None, None) => None,
        (Some(style), None) | (None, Some(style)) => Some(style.to_string()),
        (Some(style1), Some(style2)) => Some(format!("{}; {}", style1, style2)),
    }
}

/// Effective style of a component: type style, then class styles, then
/// the inline style
pub fn resolved_style(
    style: Option<Style>,
    classes: Option<&StyleClasses>,
    type_name: &str,
    defaults: &UiDefaults,
) -> Result<Option<Style>> {
    let type_style = style_for_type(type_name, defaults);
    let class_style = style_for_classes(classes, type_name, defaults)?;
    let layered = join_styles(type_style, class_style, defaults)?;
    join_styles(layered, style, defaults)
}

fn to_map(style: Style, defaults: &UiDefaults) -> Result<StyleMap> {
    match style {
        Style::Map(map) => Ok(map),
        Style::Text(text) => Ok(parser::parse(text.as_str(), defaults)?.unwrap_or_default()),
    }
}
