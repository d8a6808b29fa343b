//! Scalar token readers: keyword literals, strings and numbers.
//!
//! Each reader is called with the cursor on the token's first byte and leaves
//! the cursor on the first byte after it. On failure the bytes examined so far
//! stay consumed; the array parser's resynchronization relies on this.

use super::parser::ParseError;
use super::source::{is_space, Source};
use super::value::Value;

/// Classification of a numeric literal while it is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// Nothing but an optional sign seen yet.
    Unknown,
    /// Base 10 integer.
    Decimal,
    /// `0b` prefixed integer.
    Binary,
    /// `0` prefixed integer.
    Octal,
    /// `0x` prefixed integer.
    Hex,
    /// Contains a `.`.
    Float,
    /// Float with an `e` exponent.
    Scientific,
}

/// Expect specific bytes at the current position.
fn expect_bytes<S: Source>(source: &mut S, expected: &[u8]) -> Result<(), ParseError> {
    let offset = source.position();
    for &b in expected {
        if source.advance() != Some(b) {
            return Err(ParseError::InvalidLiteral { offset });
        }
    }
    Ok(())
}

/// Read the `null` literal. Four bytes are consumed even when they do not match.
pub(crate) fn read_null<S: Source>(source: &mut S) -> Result<Value, ParseError> {
    let offset = source.position();
    let mut bytes = [0u8; 4];
    let mut len = 0;
    for slot in bytes.iter_mut() {
        match source.advance() {
            Some(b) => {
                *slot = b;
                len += 1;
            }
            None => break,
        }
    }

    if &bytes[..len] == b"null" {
        Ok(Value::Null)
    } else {
        Err(ParseError::InvalidLiteral { offset })
    }
}

/// Read the `true` or `false` literal.
pub(crate) fn read_bool<S: Source>(source: &mut S) -> Result<Value, ParseError> {
    match source.peek() {
        Some(b't') => expect_bytes(source, b"true").map(|()| Value::Bool(true)),
        Some(b'f') => expect_bytes(source, b"false").map(|()| Value::Bool(false)),
        _ => Err(ParseError::InvalidLiteral {
            offset: source.position(),
        }),
    }
}

/// Read a `"`-delimited string.
///
/// A backslash makes the byte after it literal and is itself dropped; escape
/// codes are not decoded, so `\n` yields `n`.
pub(crate) fn read_string<S: Source>(source: &mut S) -> Result<String, ParseError> {
    let offset = source.position();
    if source.advance() != Some(b'"') {
        return Err(ParseError::ExpectedString { offset });
    }

    let mut bytes = Vec::new();
    loop {
        match source.advance() {
            None => return Err(ParseError::UnterminatedString { offset }),
            Some(b'"') => break,
            Some(b'\\') => match source.advance() {
                None => return Err(ParseError::UnterminatedString { offset }),
                Some(b) => bytes.push(b),
            },
            Some(b) => bytes.push(b),
        }
    }

    String::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8 { offset })
}

/// Read a numeric literal.
///
/// Accepted forms: decimal (`-42`), binary (`0b1010`), octal (`017`), hex
/// (`0x2a`), float (`1.5`, `.5`, `5.`) and scientific (`1.5e-3`). The literal
/// must be followed by end of input, whitespace, `,`, `]` or `}`.
pub(crate) fn read_number<S: Source>(source: &mut S) -> Result<Value, ParseError> {
    let offset = source.position();
    let mut kind = NumberKind::Unknown;
    let mut token = String::new();
    let mut sign_allowed = false;

    while let Some(b) = source.peek() {
        match kind {
            NumberKind::Unknown => match b {
                b'0' => {
                    source.advance();
                    match source.peek().map(|c| c.to_ascii_lowercase()) {
                        Some(b'x') => {
                            source.advance();
                            kind = NumberKind::Hex;
                        }
                        Some(b'b') => {
                            source.advance();
                            kind = NumberKind::Binary;
                        }
                        Some(b'.') => {
                            source.advance();
                            token.push('.');
                            kind = NumberKind::Float;
                        }
                        _ => {
                            token.push('0');
                            kind = NumberKind::Octal;
                        }
                    }
                }
                b'.' => {
                    source.advance();
                    token.push('.');
                    kind = NumberKind::Float;
                }
                b'-' => {
                    source.advance();
                    token.push('-');
                }
                b'1'..=b'9' => {
                    source.advance();
                    token.push(b as char);
                    kind = NumberKind::Decimal;
                }
                // The unclassifiable byte is consumed with the rest.
                _ => {
                    source.advance();
                    break;
                }
            },
            NumberKind::Decimal => match b {
                b'0'..=b'9' => {
                    source.advance();
                    token.push(b as char);
                }
                b'.' => {
                    source.advance();
                    token.push('.');
                    kind = NumberKind::Float;
                }
                _ => break,
            },
            NumberKind::Binary => match b {
                b'0' | b'1' => {
                    source.advance();
                    token.push(b as char);
                }
                _ => break,
            },
            NumberKind::Octal => match b {
                b'0'..=b'7' => {
                    source.advance();
                    token.push(b as char);
                }
                _ => break,
            },
            NumberKind::Hex => match b.to_ascii_lowercase() {
                c @ (b'0'..=b'9' | b'a'..=b'f') => {
                    source.advance();
                    token.push(c as char);
                }
                _ => break,
            },
            NumberKind::Float => match b {
                b'0'..=b'9' => {
                    source.advance();
                    token.push(b as char);
                }
                b'e' => {
                    source.advance();
                    token.push('e');
                    kind = NumberKind::Scientific;
                    sign_allowed = true;
                }
                _ => break,
            },
            NumberKind::Scientific => match b {
                b'+' | b'-' if sign_allowed => {
                    source.advance();
                    token.push(b as char);
                    sign_allowed = false;
                }
                b'0'..=b'9' => {
                    source.advance();
                    token.push(b as char);
                    sign_allowed = false;
                }
                _ => break,
            },
        }
    }

    match source.peek() {
        None | Some(b'}' | b']' | b',') => {}
        Some(b) if is_space(b) => {}
        Some(_) => return Err(ParseError::InvalidNumber { offset }),
    }

    let value = match kind {
        NumberKind::Unknown => None,
        NumberKind::Decimal => parse_int(&token, 10),
        NumberKind::Binary => parse_int(&token, 2),
        NumberKind::Octal => parse_int(&token, 8),
        NumberKind::Hex => parse_int(&token, 16),
        NumberKind::Float => parse_mantissa(&token).map(Value::Float),
        NumberKind::Scientific => parse_scientific(&token).map(Value::Float),
    };

    value.ok_or(ParseError::InvalidNumber { offset })
}

fn parse_int(token: &str, radix: u32) -> Option<Value> {
    i64::from_str_radix(token, radix).ok().map(Value::Int)
}

/// `mantissa * 10^exponent`, each half parsed on its own.
fn parse_scientific(token: &str) -> Option<f64> {
    let (mantissa, exponent) = token.split_once('e')?;
    let mantissa = parse_mantissa(mantissa)?;
    let exponent = parse_exponent(exponent)?;
    Some(mantissa * 10f64.powf(exponent as f64))
}

/// Parse a float token, completing a bare leading or trailing `.` with `0`.
fn parse_mantissa(token: &str) -> Option<f64> {
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token),
    };

    let mut normalized = String::with_capacity(token.len() + 2);
    normalized.push_str(sign);
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits);
    if digits.ends_with('.') {
        normalized.push('0');
    }

    normalized.parse().ok()
}

/// Parse an exponent; a missing value (`1.5e`, `1.5e+`) counts as zero.
fn parse_exponent(token: &str) -> Option<i64> {
    match token {
        "" | "+" | "-" => Some(0),
        _ => token.parse().ok(),
    }
}
