//! Error handling for value access and conversion.
//!
//! Parse failures never surface here: [`crate::parse`] collapses them to `None`
//! (see [`crate::json::ParseError`] for the diagnostic variant). The errors in
//! this module are caller contract violations raised by [`crate::Value`]
//! accessors and by the conversion layer.
//!
//! Every variant carries a stable numeric code and name so that tools (the CLI,
//! test corpora) can compare failures without matching on display strings.

use std::fmt;

use thiserror::Error;

use crate::json::ValueType;

/// The lookup that an [`Error::InvalidAccess`] failed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// Positional lookup into an array.
    Index(usize),
    /// Key lookup into an object.
    Key(String),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Index(index) => write!(f, "index {}", index),
            Accessor::Key(key) => write!(f, "key {:?}", key),
        }
    }
}

/// Errors raised by value accessors and conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Index or key lookup on a value that cannot satisfy it (code 100).
    #[error("invalid access: {accessor} on {found}")]
    InvalidAccess {
        /// The failed lookup.
        accessor: Accessor,
        /// Type of the value the lookup was applied to.
        found: ValueType,
    },

    /// `extract_or_fail` could not produce the requested type (code 101).
    #[error("unavailable type: cannot extract `{target}` from {found}")]
    UnavailableType {
        /// Rust type name of the requested target.
        target: &'static str,
        /// Type of the source value.
        found: ValueType,
    },

    /// A built-in conversion found the wrong variant (code 200).
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Variant the conversion requires.
        expected: ValueType,
        /// Variant actually present.
        found: ValueType,
    },

    /// A numeric conversion would not fit the target type (code 201).
    #[error("value {value} is out of range for `{target}`")]
    OutOfRange {
        /// Rust type name of the target.
        target: &'static str,
        /// Rendering of the offending value.
        value: String,
    },
}

impl Error {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidAccess { .. } => 100,
            Error::UnavailableType { .. } => 101,
            Error::TypeMismatch { .. } => 200,
            Error::OutOfRange { .. } => 201,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Error::InvalidAccess { .. } => "InvalidAccess",
            Error::UnavailableType { .. } => "UnavailableType",
            Error::TypeMismatch { .. } => "TypeMismatch",
            Error::OutOfRange { .. } => "OutOfRange",
        }
    }
}

/// Result type for value access and conversion.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names() {
        let err = Error::InvalidAccess {
            accessor: Accessor::Index(3),
            found: ValueType::Array,
        };
        assert_eq!(err.code(), 100);
        assert_eq!(err.name(), "InvalidAccess");

        let err = Error::TypeMismatch {
            expected: ValueType::Int,
            found: ValueType::String,
        };
        assert_eq!(err.code(), 200);
        assert_eq!(err.name(), "TypeMismatch");
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidAccess {
            accessor: Accessor::Key("missing".to_string()),
            found: ValueType::Object,
        };
        assert_eq!(err.to_string(), "invalid access: key \"missing\" on object");

        let err = Error::OutOfRange {
            target: "u8",
            value: "300".to_string(),
        };
        assert_eq!(err.to_string(), "value 300 is out of range for `u8`");
    }
}
