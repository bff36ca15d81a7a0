//! Typed style values
//!
//! Every value in a theme or an inline style is parsed into a [`StyleValue`].
//! The parser decides the type from the key name, an explicit `{type}`
//! prefix or the shape of the value; [`ValueType`] is that type lattice.

use std::fmt;

use indexmap::IndexMap;

use flatlaf_core::{Color, DerivedColor, Dimension, FontSpec, Insets, UiScale};

/// Ordered key/value map produced by parsing style text
pub type StyleMap = IndexMap<String, StyleValue>;

/// Type of a parsed value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Unknown,
    String,
    Boolean,
    Character,
    Integer,
    IntegerOrFloat,
    Float,
    Border,
    Icon,
    Insets,
    Dimension,
    Color,
    Font,
    ScaledInteger,
    ScaledFloat,
    ScaledInsets,
    ScaledDimension,
    Instance,
    Null,
    Lazy,
}

impl ValueType {
    pub const ALL: [ValueType; 20] = [
        ValueType::Unknown,
        ValueType::String,
        ValueType::Boolean,
        ValueType::Character,
        ValueType::Integer,
        ValueType::IntegerOrFloat,
        ValueType::Float,
        ValueType::Border,
        ValueType::Icon,
        ValueType::Insets,
        ValueType::Dimension,
        ValueType::Color,
        ValueType::Font,
        ValueType::ScaledInteger,
        ValueType::ScaledFloat,
        ValueType::ScaledInsets,
        ValueType::ScaledDimension,
        ValueType::Instance,
        ValueType::Null,
        ValueType::Lazy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValueType::Unknown => "Unknown",
            ValueType::String => "String",
            ValueType::Boolean => "Boolean",
            ValueType::Character => "Character",
            ValueType::Integer => "Integer",
            ValueType::IntegerOrFloat => "IntegerOrFloat",
            ValueType::Float => "Float",
            ValueType::Border => "Border",
            ValueType::Icon => "Icon",
            ValueType::Insets => "Insets",
            ValueType::Dimension => "Dimension",
            ValueType::Color => "Color",
            ValueType::Font => "Font",
            ValueType::ScaledInteger => "ScaledInteger",
            ValueType::ScaledFloat => "ScaledFloat",
            ValueType::ScaledInsets => "ScaledInsets",
            ValueType::ScaledDimension => "ScaledDimension",
            ValueType::Instance => "Instance",
            ValueType::Null => "Null",
            ValueType::Lazy => "Lazy",
        }
    }

    /// Look up a type by name, ignoring case (`{color}`, `{scaledInteger}`)
    pub fn from_name(name: &str) -> Option<ValueType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Primitive types cannot hold `null`
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            ValueType::Boolean
                | ValueType::Character
                | ValueType::Integer
                | ValueType::Float
                | ValueType::IntegerOrFloat
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A border described in a theme
#[derive(Clone, Debug, PartialEq)]
pub enum BorderSpec {
    Empty(Insets),
    Line {
        insets: Insets,
        color: Option<Color>,
        thickness: f32,
        arc: i32,
    },
}

impl BorderSpec {
    pub fn insets(&self) -> Insets {
        match self {
            BorderSpec::Empty(insets) => *insets,
            BorderSpec::Line { insets, .. } => *insets,
        }
    }
}

impl fmt::Display for BorderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderSpec::Empty(insets) => write!(f, "{}", insets),
            BorderSpec::Line {
                insets,
                color,
                thickness,
                arc,
            } => {
                write!(f, "{},", insets)?;
                if let Some(color) = color {
                    write!(f, "{}", color)?;
                }
                write!(f, ",{},{}", thickness, arc)
            }
        }
    }
}

/// An object created by class name, with auto-typed constructor arguments
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceSpec {
    pub class_name: String,
    pub args: Vec<StyleValue>,
}

impl InstanceSpec {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            args: Vec::new(),
        }
    }

    /// Class name without package (`com.example.FooIcon` is `FooIcon`)
    pub fn simple_name(&self) -> &str {
        self.class_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.class_name)
    }
}

impl fmt::Display for InstanceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)?;
        for arg in &self.args {
            write!(f, ",{}", arg)?;
        }
        Ok(())
    }
}

/// A parsed, typed value
#[derive(Clone, Debug)]
pub enum StyleValue {
    Null,
    Bool(bool),
    Char(char),
    Int(i32),
    Float(f32),
    String(String),
    Color(Color),
    /// A color computed by color functions that keeps its function chain
    DerivedColor(DerivedColor),
    Insets(Insets),
    Dimension(Dimension),
    Font(FontSpec),
    Border(BorderSpec),
    Instance(InstanceSpec),
    /// Deferred lookup of another defaults key
    Lazy(String),
    ScaledInt(i32),
    ScaledFloat(f32),
    ScaledInsets(Insets),
    ScaledDimension(Dimension),
}

impl StyleValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            StyleValue::Null => ValueType::Null,
            StyleValue::Bool(_) => ValueType::Boolean,
            StyleValue::Char(_) => ValueType::Character,
            StyleValue::Int(_) => ValueType::Integer,
            StyleValue::Float(_) => ValueType::Float,
            StyleValue::String(_) => ValueType::String,
            StyleValue::Color(_) | StyleValue::DerivedColor(_) => ValueType::Color,
            StyleValue::Insets(_) => ValueType::Insets,
            StyleValue::Dimension(_) => ValueType::Dimension,
            StyleValue::Font(_) => ValueType::Font,
            StyleValue::Border(_) => ValueType::Border,
            StyleValue::Instance(_) => ValueType::Instance,
            StyleValue::Lazy(_) => ValueType::Lazy,
            StyleValue::ScaledInt(_) => ValueType::ScaledInteger,
            StyleValue::ScaledFloat(_) => ValueType::ScaledFloat,
            StyleValue::ScaledInsets(_) => ValueType::ScaledInsets,
            StyleValue::ScaledDimension(_) => ValueType::ScaledDimension,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StyleValue::Null)
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(color) => Some(*color),
            StyleValue::DerivedColor(derived) => Some(derived.color),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            StyleValue::Int(v) | StyleValue::ScaledInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats
    pub fn as_float(&self) -> Option<f32> {
        match self {
            StyleValue::Float(v) | StyleValue::ScaledFloat(v) => Some(*v),
            StyleValue::Int(v) | StyleValue::ScaledInt(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_insets(&self) -> Option<Insets> {
        match self {
            StyleValue::Insets(v) | StyleValue::ScaledInsets(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_dimension(&self) -> Option<Dimension> {
        match self {
            StyleValue::Dimension(v) | StyleValue::ScaledDimension(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&FontSpec> {
        match self {
            StyleValue::Font(spec) => Some(spec),
            _ => None,
        }
    }

    /// Evaluate scaled values with the given factor; other values are returned as is
    pub fn scaled(&self, scale: UiScale) -> StyleValue {
        match self {
            StyleValue::ScaledInt(v) => StyleValue::Int(scale.scale(*v)),
            StyleValue::ScaledFloat(v) => StyleValue::Float(scale.scale_f32(*v)),
            StyleValue::ScaledInsets(v) => StyleValue::Insets(scale.scale_insets(*v)),
            StyleValue::ScaledDimension(v) => StyleValue::Dimension(scale.scale_dimension(*v)),
            other => other.clone(),
        }
    }

    /// Text form that parses back to an equal value, used when a `$key`
    /// reference inside a function refers to a stored value
    pub fn to_literal(&self) -> Option<String> {
        match self {
            StyleValue::Null | StyleValue::Lazy(_) => None,
            StyleValue::Float(v) | StyleValue::ScaledFloat(v) => Some(float_literal(*v)),
            StyleValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

fn float_literal(v: f32) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Derived colors compare by their color, so a derived `#990000` equals a
/// plain `#990000`.
impl PartialEq for StyleValue {
    fn eq(&self, other: &Self) -> bool {
        use StyleValue::*;
        match (self, other) {
            (Color(_) | DerivedColor(_), Color(_) | DerivedColor(_)) => {
                self.as_color() == other.as_color()
            }
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Insets(a), Insets(b)) => a == b,
            (Dimension(a), Dimension(b)) => a == b,
            (Font(a), Font(b)) => a == b,
            (Border(a), Border(b)) => a == b,
            (Instance(a), Instance(b)) => a == b,
            (Lazy(a), Lazy(b)) => a == b,
            (ScaledInt(a), ScaledInt(b)) => a == b,
            (ScaledFloat(a), ScaledFloat(b)) => a == b,
            (ScaledInsets(a), ScaledInsets(b)) => a == b,
            (ScaledDimension(a), ScaledDimension(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Null => f.write_str("null"),
            StyleValue::Bool(v) => write!(f, "{}", v),
            StyleValue::Char(v) => write!(f, "{}", v),
            StyleValue::Int(v) => write!(f, "{}", v),
            StyleValue::Float(v) => f.write_str(&float_literal(*v)),
            StyleValue::String(v) => f.write_str(v),
            StyleValue::Color(v) => write!(f, "{}", v),
            StyleValue::DerivedColor(v) => write!(f, "{}", v.color),
            StyleValue::Insets(v) => write!(f, "{}", v),
            StyleValue::Dimension(v) => write!(f, "{}", v),
            StyleValue::Font(v) => write!(f, "{}", v),
            StyleValue::Border(v) => write!(f, "{}", v),
            StyleValue::Instance(v) => write!(f, "{}", v),
            StyleValue::Lazy(key) => write!(f, "lazy({})", key),
            StyleValue::ScaledInt(v) => write!(f, "{}", v),
            StyleValue::ScaledFloat(v) => f.write_str(&float_literal(*v)),
            StyleValue::ScaledInsets(v) => write!(f, "{}", v),
            StyleValue::ScaledDimension(v) => write!(f, "{}", v),
        }
    }
}

impl From<Color> for StyleValue {
    fn from(color: Color) -> Self {
        StyleValue::Color(color)
    }
}

impl From<Option<Color>> for StyleValue {
    fn from(color: Option<Color>) -> Self {
        color.map_or(StyleValue::Null, StyleValue::Color)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Int(v)
    }
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self {
        StyleValue::Float(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::String(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::String(v)
    }
}

impl From<Insets> for StyleValue {
    fn from(v: Insets) -> Self {
        StyleValue::Insets(v)
    }
}

impl From<Option<Insets>> for StyleValue {
    fn from(v: Option<Insets>) -> Self {
        v.map_or(StyleValue::Null, StyleValue::Insets)
    }
}

impl From<Dimension> for StyleValue {
    fn from(v: Dimension) -> Self {
        StyleValue::Dimension(v)
    }
}

/// A style in either text form or already parsed form
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    Text(String),
    Map(StyleMap),
}

impl From<&str> for Style {
    fn from(text: &str) -> Self {
        Style::Text(text.to_string())
    }
}

impl From<String> for Style {
    fn from(text: String) -> Self {
        Style::Text(text)
    }
}

impl From<StyleMap> for Style {
    fn from(map: StyleMap) -> Self {
        Style::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlaf_core::{ColorFunction, HslComponent};

    #[test]
    fn test_value_type_from_name() {
        assert_eq!(ValueType::from_name("color"), Some(ValueType::Color));
        assert_eq!(ValueType::from_name("SCALEDINTEGER"), Some(ValueType::ScaledInteger));
        assert_eq!(ValueType::from_name("nope"), None);
    }

    #[test]
    fn test_derived_color_equals_plain_color() {
        let derived = StyleValue::DerivedColor(DerivedColor::new(
            Color::from_hex(0x990000),
            [ColorFunction::increase_decrease(HslComponent::Lightness, false, 20.0, false, false)],
        ));
        assert_eq!(derived, StyleValue::Color(Color::from_hex(0x990000)));
        assert_ne!(derived, StyleValue::Int(0x990000));
    }

    #[test]
    fn test_literals() {
        assert_eq!(StyleValue::Float(2.0).to_literal().as_deref(), Some("2.0"));
        assert_eq!(StyleValue::Float(1.25).to_literal().as_deref(), Some("1.25"));
        assert_eq!(
            StyleValue::Color(Color::RED.with_alpha(0x80)).to_literal().as_deref(),
            Some("#ff000080")
        );
        assert_eq!(StyleValue::Null.to_literal(), None);
    }

    #[test]
    fn test_scaled() {
        let scale = UiScale::new(2.0);
        assert_eq!(StyleValue::ScaledInt(3).scaled(scale), StyleValue::Int(6));
        assert_eq!(StyleValue::Int(3).scaled(scale), StyleValue::Int(3));
    }
}
