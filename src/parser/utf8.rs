//! Incremental UTF-8 decoding for byte stream sources
//!
//! Bytes are fed one at a time. Malformed input is replaced using the
//! "maximal subpart" rule: each maximal prefix of a valid sequence, and each
//! stray byte, becomes one U+FFFD.

use std::str;

/// Replacement for malformed input
pub const REPLACEMENT: char = '\u{FFFD}';

/// Decoder holding the bytes of at most one partial character
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    buffer: [u8; 4],
    len: usize,
}

/// Outcome of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Result {
    /// Valid prefix so far, more bytes needed
    Pending,
    /// A complete code point
    Char(char),
    /// Malformed input ending at this byte, which was consumed
    Invalid,
    /// Malformed prefix ended by this byte; the byte was not consumed and
    /// must be fed again
    Interrupted,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial character
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Check for a partial character awaiting more bytes
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        if self.len == 0 && byte.is_ascii() {
            return Utf8Result::Char(char::from(byte));
        }
        self.buffer[self.len] = byte;
        self.len += 1;
        let result = match str::from_utf8(&self.buffer[..self.len]) {
            Ok(s) => s.chars().next().map_or(Utf8Result::Invalid, Utf8Result::Char),
            Err(e) => match e.error_len() {
                None if self.len < self.buffer.len() => return Utf8Result::Pending,
                Some(n) if n < self.len => Utf8Result::Interrupted,
                _ => Utf8Result::Invalid,
            },
        };
        self.reset();
        result
    }

    /// Get the replacement character for invalid sequences
    pub fn replacement_char() -> char {
        REPLACEMENT
    }
}
