//! Byte cursors the parser reads from.
//!
//! The parser never touches global stream state: it owns a [`Source`] and
//! threads it through every sub-parser. Two cursors are provided, one over an
//! in-memory slice and one over any [`std::io::Read`].

use std::io::{self, Read};

/// A forward-only byte cursor with one byte of lookahead.
pub trait Source {
    /// Peek at the current byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Consume and return the current byte.
    fn advance(&mut self) -> Option<u8>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    /// The I/O error that ended the input early, if any.
    fn io_error(&self) -> Option<io::ErrorKind> {
        None
    }
}

/// Whitespace as classified by C `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Skip whitespace characters.
pub(crate) fn skip_whitespace<S: Source>(source: &mut S) {
    while let Some(b) = source.peek() {
        if !is_space(b) {
            break;
        }
        source.advance();
    }
}

/// Cursor over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a cursor positioned at the start of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }
}

impl Source for SliceSource<'_> {
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Cursor over a reader, pulling one byte at a time.
///
/// Wrap unbuffered readers in a [`io::BufReader`]; [`crate::parse_reader`]
/// does this for you. A read error ends the input and is reported through
/// [`Source::io_error`].
#[derive(Debug)]
pub struct ReadSource<R> {
    bytes: io::Bytes<R>,
    lookahead: Option<u8>,
    exhausted: bool,
    error: Option<io::ErrorKind>,
    pos: usize,
}

impl<R: Read> ReadSource<R> {
    /// Create a cursor over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            lookahead: None,
            exhausted: false,
            error: None,
            pos: 0,
        }
    }

    fn fill(&mut self) {
        if self.lookahead.is_some() || self.exhausted {
            return;
        }
        match self.bytes.next() {
            Some(Ok(b)) => self.lookahead = Some(b),
            Some(Err(e)) => {
                self.error = Some(e.kind());
                self.exhausted = true;
            }
            None => self.exhausted = true,
        }
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.fill();
        self.lookahead
    }

    fn advance(&mut self) -> Option<u8> {
        self.fill();
        let b = self.lookahead.take();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn io_error(&self) -> Option<io::ErrorKind> {
        self.error
    }
}
