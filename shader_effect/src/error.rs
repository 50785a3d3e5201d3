//! Error types for the effect runtime
//!
//! Errors are only produced while an effect is being built (declaring
//! parameters, writing values, declaring techniques). Compiling, binding and
//! unbinding passes never fail: anomalies there are logged and absorbed.

use std::fmt;
use crate::effect::ParamType;

/// Result type for effect construction
pub type Result<T> = std::result::Result<T, Error>;

/// Effect construction errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Parameter declaration is malformed (empty name, unsupported array form)
    InvalidParameter(String),

    /// A parameter with this name is already declared in the effect
    DuplicateParameter(String),

    /// Value written to a parameter does not match its declared type
    TypeMismatch {
        parameter: String,
        expected: ParamType,
        found: ParamType,
    },

    /// Array value length does not match the declared array size
    ArraySizeMismatch {
        parameter: String,
        expected: u32,
        found: usize,
    },

    /// Effect structure is invalid (duplicate technique/pass names, bad state names)
    InvalidEffect(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::DuplicateParameter(name) => write!(f, "Duplicate parameter: '{}'", name),
            Error::TypeMismatch { parameter, expected, found } => write!(
                f,
                "Type mismatch on '{}': expected {}, found {}",
                parameter,
                expected.type_name(),
                found.type_name()
            ),
            Error::ArraySizeMismatch { parameter, expected, found } => write!(
                f,
                "Array size mismatch on '{}': expected {} elements, found {}",
                parameter, expected, found
            ),
            Error::InvalidEffect(msg) => write!(f, "Invalid effect: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
