//! Parsing and canonical serialization.
//!
//! The accepted grammar is a superset of JSON: integers may be written in
//! binary (`0b1010`), octal (`01010`) or hex (`0x1010`), floats may have a
//! bare leading or trailing dot (`.5`, `5.`), and any leading whitespace byte
//! recognized by C `isspace` is skipped. Output is always strict JSON.
//!
//! # Architecture
//!
//! - [`value`] - The value tree and its accessors
//! - [`source`] - Byte cursors over slices and readers
//! - [`limits`] - Size and nesting limits
//! - `lexer` - Literal, string and number readers
//! - [`parser`] - Recursive descent parser
//! - [`dump`] - Canonical serializer
//!
//! # Example
//!
//! ```
//! use jsonplus::json::{dump, parse, Value};
//!
//! let value = parse(r#"{"b": 0x10, "a": [.5, 017]}"#).unwrap();
//! assert_eq!(value.field("b"), Ok(&Value::Int(16)));
//! assert_eq!(dump(&value), r#"{"a":[0.5,15],"b":16}"#);
//! ```

pub mod dump;
pub(crate) mod lexer;
pub mod limits;
pub mod parser;
pub mod source;
pub mod value;

// Re-export commonly used items
pub use dump::{dump, is_canonical};
pub use limits::Limits;
pub use parser::{
    parse, parse_reader, parse_reader_with_limits, parse_with_limits, try_parse,
    try_parse_reader, ParseError, Parser,
};
pub use source::{ReadSource, SliceSource, Source};
pub use value::{Array, Object, Value, ValueType};
