//! Style text parser
//!
//! Parses inline styles in the form `key1: value1; key2: value2` into an
//! ordered [`StyleMap`] of typed values.
//!
//! # Error Handling
//!
//! Lexing uses nom's context-based error capture. A malformed declaration
//! or an unterminated function call rejects the whole style; empty segments
//! (`;;`, trailing `;`) are tolerated. Errors carry line, column and the
//! fragment where parsing stopped.
//!
//! # Example
//!
//! ```rust
//! use flatlaf_style::{parse, UiDefaults};
//!
//! let defaults = UiDefaults::new();
//! let style = parse("background: #fff; arc: 8", &defaults).unwrap().unwrap();
//! assert_eq!(style.len(), 2);
//! ```

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::cut,
    error::{context, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::separated_list0,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::{debug, trace};

use crate::defaults::UiDefaults;
use crate::error::Result;
use crate::loader;
use crate::resolver::{DefaultsResolver, Resolver};
use crate::value::{StyleMap, StyleValue};

/// Custom parser result type using VerboseError for better diagnostics
type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Error type for style parsing with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// The input fragment where parsing failed
    pub fragment: String,
    /// Context stack from nom's VerboseError
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if self.line > 1 || self.column > 1 {
            write!(f, " (line {}, column {})", self.line, self.column)?;
        }
        if !self.contexts.is_empty() {
            write!(f, "\n  Context: {}", self.contexts.join(" > "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            fragment: String::new(),
            contexts: Vec::new(),
        }
    }

    /// Error located at `fragment`, which must be a suffix of `original`
    fn at(message: impl Into<String>, original: &str, fragment: &str) -> Self {
        let (line, column, fragment) = calculate_position(original, fragment);
        Self {
            fragment,
            ..Self::new(message, line, column)
        }
    }

    /// Create a ParseError from a nom VerboseError
    fn from_verbose(message: impl Into<String>, input: &str, err: VerboseError<&str>) -> Self {
        let (line, column, fragment) = if let Some((frag, _)) = err.errors.first() {
            calculate_position(input, frag)
        } else {
            (1, 1, String::new())
        };

        let contexts = err
            .errors
            .iter()
            .filter_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(ctx) => Some((*ctx).to_string()),
                _ => None,
            })
            .collect();

        Self {
            message: message.into(),
            line,
            column,
            fragment,
            contexts,
        }
    }
}

// ============================================================================
// Lexing
// ============================================================================

/// Calculate line and column from the original input and the error fragment
fn calculate_position(original: &str, fragment: &str) -> (usize, usize, String) {
    let offset = original.len().saturating_sub(fragment.len());
    let consumed = &original[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);

    let preview: String = fragment.chars().take(30).collect();
    (line, column, preview)
}

/// Function name (`lighten`, `systemColor`)
fn identifier(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Everything up to the `)` that closes the current call, nested calls included
fn balanced_args(input: &str) -> ParseResult<'_, &str> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&input[i..], &input[..i])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(VerboseError::from_error_kind(
        input,
        ErrorKind::TakeUntil,
    )))
}

/// `name(args)`; once the `(` is seen the closing `)` is required
fn function_call(input: &str) -> ParseResult<'_, (&str, &str)> {
    let (input, name) = context("function name", preceded(multispace0, identifier))(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, args) = cut(context(
        "function arguments",
        terminated(balanced_args, char(')')),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (name, args)))
}

/// A lexed function call with its top-level parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall<'a> {
    pub name: &'a str,
    pub params: Vec<String>,
}

/// Lex `value` as a function call.
///
/// Returns `Ok(None)` if the value is not shaped like a call, and an error if
/// it starts like one but the parentheses are not balanced.
pub fn parse_function_call(value: &str) -> std::result::Result<Option<FunctionCall<'_>>, ParseError> {
    match function_call(value) {
        Ok((rest, (name, args))) if rest.is_empty() => Ok(Some(FunctionCall {
            name,
            params: split_function_params(args, ','),
        })),
        Ok(_) => Ok(None),
        Err(nom::Err::Failure(err)) => Err(ParseError::from_verbose(
            format!("unterminated function call '{}'", value),
            value,
            err,
        )),
        Err(_) => Ok(None),
    }
}

/// Split function parameters at `delim`, ignoring delimiters inside nested
/// parentheses. Parameters are trimmed; a single empty parameter list
/// yields no parameters.
pub fn split_function_params(input: &str, delim: char) -> Vec<String> {
    let mut params = Vec::new();
    let mut nest_level: i32 = 0;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => nest_level += 1,
            ')' => nest_level -= 1,
            c if c == delim && nest_level == 0 => {
                params.push(input[start..i].trim().to_string());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    let last = input[start..].trim();
    if !last.is_empty() || !params.is_empty() {
        params.push(last.to_string());
    }
    params
}

/// Raw text of every `;`-separated segment
fn declaration_segments(input: &str) -> ParseResult<'_, Vec<&str>> {
    separated_list0(char(';'), take_while(|c: char| c != ';'))(input)
}

/// One `key: value` declaration before value conversion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub key: String,
    pub value: String,
}

/// Split style text into declarations without converting values.
///
/// Returns an empty list for blank text or text made only of `;`.
pub fn parse_declarations(text: &str) -> std::result::Result<Vec<Declaration>, ParseError> {
    let (_, segments) = declaration_segments(text)
        .map_err(|_| ParseError::new("invalid style", 1, 1))?;

    let mut declarations = Vec::new();
    for segment in segments {
        let part = segment.trim();
        if part.is_empty() {
            continue;
        }

        let offset = segment.as_ptr() as usize - text.as_ptr() as usize
            + (segment.len() - segment.trim_start().len());
        let fragment = &text[offset..];

        let Some(sep) = part.find(':') else {
            return Err(ParseError::at(
                format!("missing colon in '{}'", part),
                text,
                fragment,
            ));
        };

        let key = part[..sep].trim();
        let value = part[sep + 1..].trim();
        if key.is_empty() {
            return Err(ParseError::at(format!("missing key in '{}'", part), text, fragment));
        }
        if value.is_empty() {
            return Err(ParseError::at(format!("missing value in '{}'", part), text, fragment));
        }

        declarations.push(Declaration {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(declarations)
}

// ============================================================================
// Style parsing
// ============================================================================

/// Parse style text into typed values.
///
/// `None`, blank text and text with only separators give `Ok(None)`.
/// Duplicate keys keep declaration order of their first occurrence and
/// the value of the last one.
pub fn parse<'a>(
    style: impl Into<Option<&'a str>>,
    defaults: &UiDefaults,
) -> Result<Option<StyleMap>> {
    let Some(text) = style.into() else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }

    let declarations = parse_declarations(text)?;
    if declarations.is_empty() {
        return Ok(None);
    }

    let resolver = DefaultsResolver::new(defaults);
    let mut map = StyleMap::with_capacity(declarations.len());
    for Declaration { key, value } in declarations {
        let parsed = parse_style_value(&key, &value, defaults, &resolver)?;
        trace!(key = %key, value = %parsed, "parsed style value");
        map.insert(key, parsed);
    }

    debug!(entries = map.len(), "parsed style");
    Ok(Some(map))
}

fn parse_style_value(
    key: &str,
    value: &str,
    defaults: &UiDefaults,
    resolver: &DefaultsResolver<'_>,
) -> Result<StyleValue> {
    // simple reference keeps the stored type
    if let Some(reference) = value.strip_prefix('$') {
        return Ok(defaults.get(reference).unwrap_or(StyleValue::Null));
    }

    // remove key prefix for value type detection ("[light]padding" is still insets)
    let key = strip_key_prefix(key);

    let value = resolver.resolve(value)?;
    match loader::parse_value(key, &value, None, resolver)? {
        StyleValue::Lazy(target) => Ok(defaults.get(&target).unwrap_or(StyleValue::Null)),
        parsed => Ok(parsed.scaled(defaults.scale())),
    }
}

/// `[dark][mac]Button.background` is `Button.background`
pub(crate) fn strip_key_prefix(mut key: &str) -> &str {
    while key.starts_with('[') {
        match key.find(']') {
            Some(end) => key = &key[end + 1..],
            None => break,
        }
    }
    key
}
