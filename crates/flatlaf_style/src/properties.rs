//! Reader for theme `.properties` files
//!
//! - One entry per logical line: `key = value`, `key: value` or `key value`
//! - Comments: lines starting with `#` or `!`
//! - A line ending in an odd number of `\` continues on the next line
//!   (leading whitespace of the continuation is dropped)
//! - Escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other `\x` is `x`
//!
//! Entries are returned in file order. Duplicates are kept; the consumer
//! decides (theme loading lets the last one win).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    #[error("properties syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },
}

/// One `key = value` entry with the line it started on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

pub fn parse_properties(src: &str) -> Result<Vec<PropertyEntry>, PropertiesError> {
    let mut entries = Vec::new();
    let mut lines = src.lines().enumerate();

    while let Some((idx, raw_line)) = lines.next() {
        let line_no = idx + 1;
        let line = raw_line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        // join continuation lines
        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key).map_err(|msg| PropertiesError::Syntax { line: line_no, msg })?;
        let value =
            unescape(raw_value).map_err(|msg| PropertiesError::Syntax { line: line_no, msg })?;

        entries.push(PropertyEntry {
            key,
            value,
            line: line_no,
        });
    }

    Ok(entries)
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\u{c}']))
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(n) = it.next() else {
            // a trailing backslash at end of input is dropped
            break;
        };
        match n {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => {
                let hex: String = it.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\uxxxx encoding `\\u{hex}`"))?;
                out.push(code);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(src: &str) -> Vec<(String, String)> {
        parse_properties(src)
            .unwrap()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    #[test]
    fn test_separators_and_comments() {
        let src = "# comment\n! also comment\n\nButton.arc = 6\nButton.background: #fff\n@accent #08f\n";
        assert_eq!(
            pairs(src),
            vec![
                ("Button.arc".to_string(), "6".to_string()),
                ("Button.background".to_string(), "#fff".to_string()),
                ("@accent".to_string(), "#08f".to_string()),
            ]
        );
    }

    #[test]
    fn test_style_values_keep_colons() {
        let src = "[style]Button.primary = borderColor: #08f; background: #08f\n";
        assert_eq!(
            pairs(src),
            vec![(
                "[style]Button.primary".to_string(),
                "borderColor: #08f; background: #08f".to_string()
            )]
        );
    }

    #[test]
    fn test_line_continuation() {
        let src = "key = first, \\\n    second\nnext = 1\n";
        assert_eq!(
            pairs(src),
            vec![
                ("key".to_string(), "first, second".to_string()),
                ("next".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_escapes() {
        let src = "a\\:b = x\\ty\\u0041\n";
        assert_eq!(pairs(src), vec![("a:b".to_string(), "x\tyA".to_string())]);
    }

    #[test]
    fn test_bad_unicode_escape() {
        let err = parse_properties("\n\nkey = \\u00zz\n").unwrap_err();
        assert!(matches!(err, PropertiesError::Syntax { line: 3, .. }));
    }

    #[test]
    fn test_line_numbers() {
        let entries = parse_properties("# c\na = 1\n\nb = 2\n").unwrap();
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[1].line, 4);
    }
}
