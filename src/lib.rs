//! jsonplus - a JSON-superset value library.
//!
//! Parses an extended JSON grammar into an owned [`Value`] tree, lets callers
//! query the tree or convert it to and from their own types, and writes it back
//! out as canonical, whitespace-free JSON.
//!
//! # Architecture
//!
//! - [`json`] - Value model, parser and serializer
//! - [`convert`] - [`ToValue`] / [`FromValue`] conversion hooks
//! - [`error`] - Access and conversion errors
//!
//! # Example
//!
//! ```
//! use jsonplus::{parse, Value};
//!
//! let value = parse("[1, 2.0, 0b11]").unwrap();
//! assert_eq!(value.index(2), Ok(&Value::Int(3)));
//! assert_eq!(value.dump(), "[1,2.0,3]");
//!
//! // A failed parse is distinct from a parsed null.
//! assert_eq!(parse("@"), None);
//! assert_eq!(parse("null"), Some(Value::Null));
//! ```

// Library code propagates errors instead of panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod json;

// Re-export commonly used types
pub use convert::{FromValue, ToValue};
pub use error::{Accessor, Error, Result};
pub use json::{dump, parse, parse_reader, Array, Limits, Object, ParseError, Value, ValueType};
