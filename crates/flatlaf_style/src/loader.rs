//! Value loader: raw text to typed [`StyleValue`]
//!
//! The type of a value comes from, in this order:
//! 1. the type expected by the caller
//! 2. the shape of the value (`true`, `lazy(...)`, `#rgb`, `{type}value`)
//! 3. a table of known keys
//! 4. the key suffix (`...Color`, `...Insets`, `...Size`, ...)
//! 5. for anything still unknown, the value itself (quoted string, color,
//!    integer, float, plain string)

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::opt,
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use flatlaf_core::{Dimension, FontSpec, FontStyle, Insets};

use crate::color_eval;
use crate::error::{Result, StyleError};
use crate::parser::split_function_params;
use crate::resolver::Resolver;
use crate::value::{BorderSpec, InstanceSpec, StyleValue, ValueType};

const STYLE_KEY_PREFIX: &str = "[style]";
const TYPE_PREFIX: &str = "{";
const TYPE_PREFIX_END: &str = "}";

/// Parse `value` for `key`.
///
/// `expected` forces a type; `None` detects it from key and value.
pub fn parse_value(
    key: &str,
    value: &str,
    expected: Option<ValueType>,
    resolver: &dyn Resolver,
) -> Result<StyleValue> {
    // styles are parsed when they are applied
    if key.starts_with(STYLE_KEY_PREFIX) {
        return Ok(StyleValue::String(value.to_string()));
    }

    let mut value = value.trim();

    if value == "null" || value.is_empty() {
        return Ok(StyleValue::Null);
    }

    // if(condition,trueValue,falseValue)
    if let Some(args) = value.strip_prefix("if(").and_then(|v| v.strip_suffix(')')) {
        let params = split_function_params(args, ',');
        if params.len() != 3 {
            return Err(StyleError::MissingParameters(value.to_string()));
        }

        let branch = if parse_condition(&params[0], resolver) {
            &params[1]
        } else {
            &params[2]
        };
        return parse_value(key, &resolver.resolve(branch)?, expected, resolver);
    }

    let mut value_type = ValueType::Unknown;

    if let Some(expected) = expected {
        value_type = expected;

        if value_type == ValueType::String {
            if let Some(unquoted) = unquote(value) {
                value = unquoted;
            }
        }
    } else {
        match value {
            "false" => return Ok(StyleValue::Bool(false)),
            "true" => return Ok(StyleValue::Bool(true)),
            _ => {}
        }

        // lazy(uiKey)
        if let Some(ui_key) = value.strip_prefix("lazy(").and_then(|v| v.strip_suffix(')')) {
            return Ok(StyleValue::Lazy(ui_key.trim().to_string()));
        }

        if value.starts_with('#') {
            value_type = ValueType::Color;
        } else if let Some(rest) = value.strip_prefix(TYPE_PREFIX) {
            // an unknown type name leaves the value untouched
            if let Some(end) = rest.find(TYPE_PREFIX_END) {
                if let Some(explicit) = ValueType::from_name(&rest[..end]) {
                    value_type = explicit;
                    value = &rest[end + TYPE_PREFIX_END.len()..];
                }
            }
        }

        if value_type == ValueType::Unknown {
            value_type = known_value_type(key).unwrap_or(ValueType::Unknown);
        }
        if value_type == ValueType::Unknown {
            value_type = value_type_from_key(key);
        }
    }

    match value_type {
        ValueType::String => Ok(StyleValue::String(value.to_string())),
        ValueType::Boolean => parse_boolean(value).map(StyleValue::Bool),
        ValueType::Character => parse_char(value).map(StyleValue::Char),
        ValueType::Integer => parse_integer(value).map(StyleValue::Int),
        ValueType::IntegerOrFloat => parse_integer_or_float(value),
        ValueType::Float => parse_float(value).map(StyleValue::Float),
        ValueType::Border => parse_border(value, resolver),
        ValueType::Icon | ValueType::Instance => parse_instance(value, resolver),
        ValueType::Insets => parse_insets(value).map(StyleValue::Insets),
        ValueType::Dimension => parse_dimension(value).map(StyleValue::Dimension),
        ValueType::Color => color_eval::parse_color_value(value, resolver),
        ValueType::Font => parse_font(value).map(StyleValue::Font),
        ValueType::ScaledInteger => parse_integer(value).map(StyleValue::ScaledInt),
        ValueType::ScaledFloat => parse_float(value).map(StyleValue::ScaledFloat),
        ValueType::ScaledInsets => parse_insets(value).map(StyleValue::ScaledInsets),
        ValueType::ScaledDimension => parse_dimension(value).map(StyleValue::ScaledDimension),
        ValueType::Null => Ok(StyleValue::Null),
        ValueType::Lazy => Ok(StyleValue::Lazy(value.to_string())),
        ValueType::Unknown => parse_unknown(value, resolver),
    }
}

fn parse_unknown(value: &str, resolver: &dyn Resolver) -> Result<StyleValue> {
    if let Some(unquoted) = unquote(value) {
        return Ok(StyleValue::String(unquoted.to_string()));
    }

    if value.starts_with('#') || value.ends_with(')') || color_eval::is_function_call(value) {
        return color_eval::parse_color_value(value, resolver);
    }

    let first = value.chars().next().unwrap_or(' ');
    if first.is_ascii_digit() || matches!(first, '-' | '+' | '.') {
        if let Ok(int) = parse_integer(value) {
            return Ok(StyleValue::Int(int));
        }
        if let Ok(float) = parse_float(value) {
            return Ok(StyleValue::Float(float));
        }
    }

    Ok(StyleValue::String(value.to_string()))
}

/// `"text"` is `text`
fn unquote(value: &str) -> Option<&str> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Evaluate the condition of `if()`.
///
/// False for `null`, `false`, integer zero and any evaluation error,
/// including references that do not resolve; true otherwise.
pub fn parse_condition(condition: &str, resolver: &dyn Resolver) -> bool {
    let value = resolver
        .resolve(condition)
        .and_then(|resolved| parse_value("", &resolved, None, resolver));

    match value {
        Ok(StyleValue::Null | StyleValue::Bool(false) | StyleValue::Int(0)) => false,
        Ok(_) => true,
        Err(err) => {
            tracing::trace!(condition, error = %err, "condition evaluates to false");
            false
        }
    }
}

fn known_value_type(key: &str) -> Option<ValueType> {
    let value_type = match key {
        // system colors
        "activeCaptionBorder" | "inactiveCaptionBorder" | "windowBorder" => ValueType::Color,
        "SplitPane.dividerSize" | "SplitPaneDivider.gripDotSize" | "dividerSize" | "gripDotSize" => {
            ValueType::Integer
        }
        "TabbedPane.closeCrossPlainSize"
        | "TabbedPane.closeCrossFilledSize"
        | "closeCrossPlainSize"
        | "closeCrossFilledSize" => ValueType::Float,
        "Table.intercellSpacing" | "intercellSpacing" => ValueType::Dimension,
        _ => return None,
    };
    Some(value_type)
}

/// Type implied by the key name
pub fn value_type_from_key(key: &str) -> ValueType {
    let is = |suffix: &str| key.ends_with(&format!(".{}", suffix)) || key == suffix;

    if key.ends_with("UI") {
        ValueType::String
    } else if key.ends_with("Color")
        || (key.ends_with("ground")
            && (is("background")
                || key.ends_with("Background")
                || is("foreground")
                || key.ends_with("Foreground")))
    {
        ValueType::Color
    } else if is("font") || key.ends_with("Font") {
        ValueType::Font
    } else if is("border") || key.ends_with("Border") {
        ValueType::Border
    } else if is("icon") || key.ends_with("Icon") {
        ValueType::Icon
    } else if is("margin") || is("padding") || key.ends_with("Margins") || key.ends_with("Insets") {
        ValueType::Insets
    } else if key.ends_with("Size") {
        ValueType::Dimension
    } else if key.ends_with("Width") || key.ends_with("Height") {
        ValueType::IntegerOrFloat
    } else if key.ends_with("Char") {
        ValueType::Character
    } else {
        ValueType::Unknown
    }
}

// ============================================================================
// Structured values
// ============================================================================

/// `top,left,bottom,right`
pub fn parse_insets(value: &str) -> Result<Insets> {
    let invalid = || StyleError::invalid(format!("invalid insets '{}'", value));
    let numbers = split_numbers(value, 4).ok_or_else(invalid)?;
    Ok(Insets::new(numbers[0], numbers[1], numbers[2], numbers[3]))
}

/// `width,height`
pub fn parse_dimension(value: &str) -> Result<Dimension> {
    let invalid = || StyleError::invalid(format!("invalid size '{}'", value));
    let numbers = split_numbers(value, 2).ok_or_else(invalid)?;
    Ok(Dimension::new(numbers[0], numbers[1]))
}

/// First `count` comma-separated integers; extra parts are ignored
fn split_numbers(value: &str, count: usize) -> Option<Vec<i32>> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() < count {
        return None;
    }
    parts[..count].iter().map(|p| p.parse::<i32>().ok()).collect()
}

/// `top,left,bottom,right[,lineColor[,lineThickness[,arc]]]` or a class name
pub fn parse_border(value: &str, resolver: &dyn Resolver) -> Result<StyleValue> {
    if !value.contains(',') {
        return parse_instance(value, resolver);
    }

    let parts = split_function_params(value, ',');
    let part = |index: usize| parts.get(index).map(String::as_str).filter(|p| !p.is_empty());

    let border = (|| -> Result<BorderSpec> {
        let insets = parse_insets(value)?;
        let color = match part(4) {
            Some(color) => color_eval::parse_color_or_function(&resolver.resolve(color)?, resolver)?,
            None => None,
        };
        let thickness = part(5).map(parse_float).transpose()?.unwrap_or(1.0);
        let arc = part(6).map(parse_integer).transpose()?.unwrap_or(-1);

        Ok(if color.is_some() || arc > 0 {
            BorderSpec::Line {
                insets,
                color,
                thickness,
                arc,
            }
        } else {
            BorderSpec::Empty(insets)
        })
    })();

    border
        .map(StyleValue::Border)
        .map_err(|err| StyleError::invalid(format!("invalid border '{}' ({})", value, err)))
}

/// `className[,param...]`; parameters are typed from their text
pub fn parse_instance(value: &str, resolver: &dyn Resolver) -> Result<StyleValue> {
    if !value.contains(',') {
        return Ok(StyleValue::Instance(InstanceSpec::new(value)));
    }

    let mut parts = split_function_params(value, ',').into_iter();
    let class_name = parts.next().unwrap_or_default();
    let args = parts
        .map(|part| parse_value("", &resolver.resolve(&part)?, None, resolver))
        .collect::<Result<Vec<_>>>()?;

    Ok(StyleValue::Instance(InstanceSpec { class_name, args }))
}

// ============================================================================
// Fonts
// ============================================================================

type ParseResult<'a, O> = IResult<&'a str, O>;

fn font_separators(input: &str) -> ParseResult<'_, &str> {
    take_while(|c: char| c <= ' ' || c == ',')(input)
}

fn font_quoted<'a>(quote: char) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    move |input: &'a str| {
        delimited(char(quote), take_while(move |c: char| c != quote), opt(char(quote)))(input)
    }
}

fn font_word(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c: char| c > ' ' && !matches!(c, ',' | '"' | '\''))(input)
}

/// Words and quoted strings separated by whitespace or commas
fn font_tokens(input: &str) -> ParseResult<'_, Vec<&str>> {
    terminated(
        many0(preceded(
            font_separators,
            alt((font_quoted('"'), font_quoted('\''), font_word)),
        )),
        font_separators,
    )(input)
}

/// `[normal] [bold|+bold|-bold] [italic|+italic|-italic] [size|+incr|-decr|pct%] [family[, family]] [$baseFontKey]`
pub fn parse_font(value: &str) -> Result<FontSpec> {
    let invalid = |msg: String| StyleError::invalid(format!("invalid font '{}' ({})", value, msg));

    let tokens = match font_tokens(value) {
        Ok(("", tokens)) => tokens,
        Ok((rest, _)) => return Err(invalid(format!("unexpected '{}'", rest))),
        Err(err) => return Err(invalid(err.to_string())),
    };

    let mut spec = FontSpec::default();
    let mut size_seen = false;

    for token in tokens {
        match token {
            "normal" => spec.style = Some(FontStyle::PLAIN),
            "bold" => spec.style = Some(spec.style.unwrap_or(FontStyle::PLAIN).union(FontStyle::BOLD)),
            "italic" => {
                spec.style = Some(spec.style.unwrap_or(FontStyle::PLAIN).union(FontStyle::ITALIC))
            }
            "+bold" => spec.add_style = spec.add_style.union(FontStyle::BOLD),
            "-bold" => spec.remove_style = spec.remove_style.union(FontStyle::BOLD),
            "+italic" => spec.add_style = spec.add_style.union(FontStyle::ITALIC),
            "-italic" => spec.remove_style = spec.remove_style.union(FontStyle::ITALIC),
            _ => {
                let first = token
                    .chars()
                    .next()
                    .ok_or_else(|| invalid("empty family name".to_string()))?;

                if first.is_ascii_digit() || first == '+' || first == '-' {
                    if size_seen {
                        return Err(invalid(format!("size specified more than once in '{}'", value)));
                    }
                    size_seen = true;

                    let parse = |v: &str| parse_integer(v).map_err(|err| invalid(err.to_string()));
                    if first == '+' || first == '-' {
                        spec.relative_size = parse(token)?;
                    } else if let Some(percent) = token.strip_suffix('%') {
                        spec.scale_size = parse(percent)? as f32 / 100.0;
                    } else {
                        spec.absolute_size = parse(token)?;
                    }
                } else if let Some(key) = token.strip_prefix('$') {
                    if spec.base_font_key.is_some() {
                        return Err(invalid(format!(
                            "baseFontKey specified more than once in '{}'",
                            value
                        )));
                    }
                    spec.base_font_key = Some(key.to_string());
                } else {
                    spec.families.push(token.to_string());
                }
            }
        }
    }

    let derived = !spec.add_style.is_empty() || !spec.remove_style.is_empty();
    if spec.style.is_some() && derived {
        return Err(StyleError::invalid(format!(
            "invalid font '{}': can not mix absolute style (e.g. 'bold') with derived style (e.g. '+italic')",
            value
        )));
    }
    for (style, name) in [(FontStyle::BOLD, "bold"), (FontStyle::ITALIC, "italic")] {
        if spec.add_style.contains(style) && spec.remove_style.contains(style) {
            return Err(StyleError::invalid(format!(
                "invalid font '{}': can not use '+{}' and '-{}'",
                value, name, name
            )));
        }
    }

    Ok(spec)
}

// ============================================================================
// Primitives
// ============================================================================

pub fn parse_boolean(value: &str) -> Result<bool> {
    match value {
        "false" => Ok(false),
        "true" => Ok(true),
        _ => Err(StyleError::invalid(format!("invalid boolean '{}'", value))),
    }
}

pub fn parse_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(StyleError::invalid(format!("invalid character '{}'", value))),
    }
}

pub fn parse_integer(value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .map_err(|_| StyleError::invalid(format!("invalid integer '{}'", value)))
}

/// Integer in `min..=max`; with `allow_percentage`, `n%` maps to `max * n / 100`
pub fn parse_integer_in_range(value: &str, min: i32, max: i32, allow_percentage: bool) -> Result<i32> {
    if allow_percentage && value.ends_with('%') {
        let percent = parse_percentage(value)?;
        return Ok((max * percent) / 100);
    }

    let integer = parse_integer(value)?;
    if integer < min || integer > max {
        return Err(StyleError::IntegerOutOfRange {
            value: value.to_string(),
            min,
            max,
        });
    }
    Ok(integer)
}

/// `0%` to `100%`
pub fn parse_percentage(value: &str) -> Result<i32> {
    let invalid = || StyleError::invalid(format!("invalid percentage '{}'", value));
    let percent = value
        .strip_suffix('%')
        .ok_or_else(invalid)?
        .parse::<i32>()
        .map_err(|_| invalid())?;

    if !(0..=100).contains(&percent) {
        return Err(StyleError::PercentageOutOfRange(value.to_string()));
    }
    Ok(percent)
}

pub fn parse_float(value: &str) -> Result<f32> {
    let trimmed = value.trim_end_matches(['f', 'F', 'd', 'D']);
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));

    valid
        .then(|| trimmed.parse::<f32>().ok())
        .flatten()
        .ok_or_else(|| StyleError::invalid(format!("invalid float '{}'", value)))
}

fn parse_integer_or_float(value: &str) -> Result<StyleValue> {
    if let Ok(int) = value.parse::<i32>() {
        return Ok(StyleValue::Int(int));
    }
    parse_float(value)
        .map(StyleValue::Float)
        .map_err(|_| StyleError::invalid(format!("invalid integer or float '{}'", value)))
}
