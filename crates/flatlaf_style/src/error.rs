use thiserror::Error;

use crate::parser::ParseError;
use crate::properties::PropertiesError;
use crate::value::ValueType;

/// Errors produced while parsing, resolving or applying styles
#[derive(Debug, Clone, Error)]
pub enum StyleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Properties(#[from] PropertiesError),

    #[error("variable or property '{0}' not found")]
    NotFound(String),

    /// Payload names what recursed, e.g. `variable or property '@a'`
    #[error("endless recursion in {0}")]
    EndlessRecursion(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("unknown color function '{0}'")]
    UnknownFunction(String),

    #[error("missing parameters in function '{0}'")]
    MissingParameters(String),

    #[error("percentage out of range (0-100%) '{0}'")]
    PercentageOutOfRange(String),

    #[error("integer '{value}' out of range ({min}-{max})")]
    IntegerOutOfRange { value: String, min: i32, max: i32 },

    #[error("value of '{key}' has type {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("unknown style '{key}'")]
    UnknownStyle { key: String },

    #[error("unknown enum value '{value}' in enum '{enum_name}'")]
    UnknownEnumValue { value: String, enum_name: String },

    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
}

impl StyleError {
    pub fn invalid(message: impl Into<String>) -> Self {
        StyleError::InvalidValue(message.into())
    }

    pub fn unknown_style(key: impl Into<String>) -> Self {
        StyleError::UnknownStyle { key: key.into() }
    }

    /// Resolution failures are local and may be swallowed by `if()`
    pub fn is_not_found(&self) -> bool {
        matches!(self, StyleError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;
