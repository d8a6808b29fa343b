//! Recursive descent parser.
//!
//! One forward pass over a [`Source`]; the parser stops after the first
//! complete top-level value and ignores whatever follows it.
//!
//! Failures are reported as [`ParseError`] internally and by [`try_parse`].
//! The public [`parse`] family collapses every failure to `None`, which keeps a
//! failed parse distinguishable from a successfully parsed `null`.
//!
//! Recovery differs by container: an array skips one byte after a malformed
//! element and keeps scanning, while a malformed object value fails the whole
//! parse.

use std::io::{self, BufReader, Read};

use thiserror::Error;
use tracing::{debug, trace};

use super::lexer::{read_bool, read_null, read_number, read_string};
use super::limits::Limits;
use super::source::{skip_whitespace, ReadSource, SliceSource, Source};
use super::value::{Array, Object, Value};

/// Why a parse failed. Offsets are byte positions in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No value can start with this byte.
    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte {
        /// The offending byte.
        byte: u8,
        /// Where it was found.
        offset: usize,
    },
    /// Malformed `null`, `true` or `false`.
    #[error("invalid literal at offset {offset}")]
    InvalidLiteral {
        /// Start of the literal.
        offset: usize,
    },
    /// Malformed or out-of-range numeric literal.
    #[error("invalid number at offset {offset}")]
    InvalidNumber {
        /// Start of the literal.
        offset: usize,
    },
    /// A string was required (object key) but something else was found.
    #[error("expected string at offset {offset}")]
    ExpectedString {
        /// Where the string should have started.
        offset: usize,
    },
    /// Input ended inside a string.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString {
        /// Opening quote.
        offset: usize,
    },
    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 in string starting at offset {offset}")]
    InvalidUtf8 {
        /// Opening quote.
        offset: usize,
    },
    /// Input ended inside an array.
    #[error("unterminated array starting at offset {offset}")]
    UnterminatedArray {
        /// Opening bracket.
        offset: usize,
    },
    /// Input ended inside an object.
    #[error("unterminated object starting at offset {offset}")]
    UnterminatedObject {
        /// Opening brace.
        offset: usize,
    },
    /// Object keys must be non-empty.
    #[error("empty object key at offset {offset}")]
    EmptyKey {
        /// Start of the key.
        offset: usize,
    },
    /// Key not followed by `:`.
    #[error("expected ':' at offset {offset}")]
    MissingColon {
        /// Where the separator should have been.
        offset: usize,
    },
    /// Arrays/objects nested deeper than the limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep {
        /// Depth reached.
        depth: u64,
        /// Configured limit.
        limit: u64,
    },
    /// More input consumed than the limit allows.
    #[error("input size {size} exceeds limit {limit}")]
    InputTooLarge {
        /// Bytes seen.
        size: u64,
        /// Configured limit.
        limit: u64,
    },
    /// The reader failed.
    #[error("i/o error: {kind}")]
    Io {
        /// Kind of the underlying error.
        kind: io::ErrorKind,
    },
}

impl ParseError {
    /// Byte offset of the failure, for positional errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedByte { offset, .. }
            | ParseError::InvalidLiteral { offset }
            | ParseError::InvalidNumber { offset }
            | ParseError::ExpectedString { offset }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidUtf8 { offset }
            | ParseError::UnterminatedArray { offset }
            | ParseError::UnterminatedObject { offset }
            | ParseError::EmptyKey { offset }
            | ParseError::MissingColon { offset } => Some(*offset),
            ParseError::NestingTooDeep { .. }
            | ParseError::InputTooLarge { .. }
            | ParseError::Io { .. } => None,
        }
    }

    /// Resource and I/O failures that array resynchronization must not skip.
    fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::NestingTooDeep { .. }
                | ParseError::InputTooLarge { .. }
                | ParseError::Io { .. }
        )
    }
}

/// Parser over any byte [`Source`].
pub struct Parser<S> {
    source: S,
    limits: Limits,
    depth: u64,
}

impl<S: Source> Parser<S> {
    /// Create a new parser reading from `source`.
    pub fn new(source: S, limits: Limits) -> Self {
        Self {
            source,
            limits,
            depth: 0,
        }
    }

    /// Parse one top-level value.
    ///
    /// Empty or whitespace-only input yields `Value::Null`. Bytes after the
    /// value are left unread.
    pub fn parse(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_value();
        if let Some(kind) = self.source.io_error() {
            return Err(ParseError::Io { kind });
        }
        value
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Give back the source, positioned just after the parsed value.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Parse a single value, dispatching on its (lower-cased) first byte.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        skip_whitespace(&mut self.source);

        let offset = self.source.position();
        match self.source.peek() {
            None => Ok(Value::Null),
            Some(b) => match b.to_ascii_lowercase() {
                b'n' => read_null(&mut self.source),
                b't' | b'f' => read_bool(&mut self.source),
                b'"' => read_string(&mut self.source).map(Value::String),
                b'[' => self.nested(Self::parse_array),
                b'{' => self.nested(Self::parse_object),
                b'+' | b'-' | b'.' | b'0'..=b'9' => read_number(&mut self.source),
                _ => Err(ParseError::UnexpectedByte { byte: b, offset }),
            },
        }
    }

    /// Run a container parser one nesting level deeper.
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, ParseError>,
    ) -> Result<Value, ParseError> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth.saturating_add(1),
                limit: self.limits.max_nesting_depth,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse an array. A malformed element costs one skipped byte, not the array.
    fn parse_array(&mut self) -> Result<Value, ParseError> {
        let offset = self.source.position();
        // Consume opening bracket
        self.source.advance();

        let mut arr = Array::new();
        loop {
            skip_whitespace(&mut self.source);
            match self.source.peek() {
                None => return Err(ParseError::UnterminatedArray { offset }),
                Some(b']') => {
                    self.source.advance();
                    return Ok(Value::Array(arr));
                }
                Some(b',') => {
                    self.source.advance();
                }
                Some(_) => match self.parse_value() {
                    Ok(value) => arr.push(value),
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        trace!(%err, "skipping malformed array element");
                        self.source.advance();
                    }
                },
            }
        }
    }

    /// Parse an object. Duplicate keys keep the last value.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let offset = self.source.position();
        // Consume opening brace
        self.source.advance();

        let mut map = Object::new();
        loop {
            skip_whitespace(&mut self.source);
            match self.source.peek() {
                None => return Err(ParseError::UnterminatedObject { offset }),
                Some(b'}') => {
                    self.source.advance();
                    return Ok(Value::Object(map));
                }
                Some(b',') => {
                    self.source.advance();
                }
                Some(_) => {
                    let key_offset = self.source.position();
                    let key = read_string(&mut self.source)?;
                    if key.is_empty() {
                        return Err(ParseError::EmptyKey { offset: key_offset });
                    }

                    skip_whitespace(&mut self.source);
                    let separator_offset = self.source.position();
                    if self.source.advance() != Some(b':') {
                        return Err(ParseError::MissingColon {
                            offset: separator_offset,
                        });
                    }

                    let value = self.parse_value()?;
                    map.insert(key, value);
                }
            }
        }
    }
}

/// Parse text (or raw bytes) with [`Limits::standard`].
///
/// Returns `None` when the input does not parse. Empty input yields
/// `Some(Value::Null)`.
///
/// ```
/// use jsonplus::{parse, Value};
///
/// assert_eq!(parse("0x2a"), Some(Value::Int(42)));
/// assert_eq!(parse(""), Some(Value::Null));
/// assert_eq!(parse("A"), None);
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Option<Value> {
    parse_with_limits(input, Limits::standard())
}

/// Parse text with custom limits, returning `None` on failure.
pub fn parse_with_limits(input: impl AsRef<[u8]>, limits: Limits) -> Option<Value> {
    try_parse(input.as_ref(), limits)
        .map_err(|err| debug!(%err, "parse failed"))
        .ok()
}

/// Parse text with custom limits, reporting why a failure happened.
///
/// The size limit applies to the bytes the parser consumes, exactly as for
/// [`try_parse_reader`].
pub fn try_parse(input: &[u8], limits: Limits) -> Result<Value, ParseError> {
    let visible = usize::try_from(limits.max_input_size.saturating_add(1)).unwrap_or(usize::MAX);
    let bounded = input.get(..visible).unwrap_or(input);
    let mut parser = Parser::new(SliceSource::new(bounded), limits);
    let result = parser.parse();
    check_consumed(parser.position(), limits)?;
    result
}

/// Fail when more than `max_input_size` bytes were consumed.
fn check_consumed(consumed: usize, limits: Limits) -> Result<(), ParseError> {
    let consumed = consumed as u64;
    if consumed > limits.max_input_size {
        return Err(ParseError::InputTooLarge {
            size: consumed,
            limit: limits.max_input_size,
        });
    }
    Ok(())
}

/// Parse from a reader with [`Limits::standard`], returning `None` on failure.
///
/// The reader is buffered internally, so bytes past the value may be consumed
/// from it.
pub fn parse_reader<R: Read>(reader: R) -> Option<Value> {
    parse_reader_with_limits(reader, Limits::standard())
}

/// Parse from a reader with custom limits, returning `None` on failure.
pub fn parse_reader_with_limits<R: Read>(reader: R, limits: Limits) -> Option<Value> {
    try_parse_reader(reader, limits)
        .map_err(|err| debug!(%err, "parse failed"))
        .ok()
}

/// Parse from a reader with custom limits, reporting why a failure happened.
pub fn try_parse_reader<R: Read>(reader: R, limits: Limits) -> Result<Value, ParseError> {
    // One byte past the limit is enough to tell that the input was too large.
    let bounded = reader.take(limits.max_input_size.saturating_add(1));
    let mut parser = Parser::new(ReadSource::new(BufReader::new(bounded)), limits);
    let result = parser.parse();
    check_consumed(parser.position(), limits)?;
    result
}
