//! Resource limits for parsing.
//!
//! The parser is recursive, so unbounded nesting can exhaust the stack. These
//! limits turn oversized or overly deep input into an ordinary parse failure.

/// Resource limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of input bytes the parser consumes.
    ///
    /// Only bytes read up to the end of the first value count, for slices and
    /// readers alike, so `"1234 5"` fits a limit of 4. At most one byte past
    /// the limit is ever looked at, and that byte is reported in the error.
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects.
    pub max_nesting_depth: u64,
}

impl Limits {
    /// Default limits used by [`crate::parse`] and [`crate::parse_reader`].
    pub const fn standard() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024, // 64 MiB
            max_nesting_depth: 128,           // 128 levels
        }
    }

    /// No limits. Deeply nested input may overflow the stack.
    pub const fn unbounded() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: u64::MAX,
        }
    }

    /// Builder-style override of the nesting depth.
    pub const fn with_max_nesting_depth(mut self, depth: u64) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Builder-style override of the input size.
    pub const fn with_max_input_size(mut self, size: u64) -> Self {
        self.max_input_size = size;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
