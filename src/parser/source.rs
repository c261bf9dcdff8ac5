//! Character sources for the tokenizer
//!
//! The tokenizer pulls one code point at a time through [`CharSource`].
//! Adapters are provided for in-memory text and for any [`std::io::Read`]
//! byte stream (decoded as UTF-8). [`Canonical`] wraps a source and rewrites
//! 8-bit C1 controls into their 7-bit `ESC` form as each code point is
//! ingested, so every code point is canonicalized exactly once.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::{self, Bytes, Read};
use std::iter::Peekable;
use std::str::Chars;

use super::utf8::{Utf8Decoder, Utf8Result};
use crate::codes::{c1_to_final, ESC};

/// A pull-based stream of code points
pub trait CharSource {
    /// Error raised by the underlying stream
    type Error;

    /// Consume and return the next code point, or `None` at end of stream
    fn read_one(&mut self) -> Result<Option<char>, Self::Error>;

    /// Return the next code point without consuming it
    fn peek_one(&mut self) -> Result<Option<char>, Self::Error>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    type Error = S::Error;

    fn read_one(&mut self) -> Result<Option<char>, Self::Error> {
        (**self).read_one()
    }

    fn peek_one(&mut self) -> Result<Option<char>, Self::Error> {
        (**self).peek_one()
    }
}

/// Source over in-memory text
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }
}

impl CharSource for StrSource<'_> {
    type Error = Infallible;

    fn read_one(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.chars.next())
    }

    fn peek_one(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.chars.peek().copied())
    }
}

/// Source over a UTF-8 byte stream
///
/// Invalid byte sequences decode to U+FFFD. A multi-byte sequence cut off by
/// end of stream also yields a single U+FFFD.
#[derive(Debug)]
pub struct ReaderSource<R> {
    bytes: Bytes<R>,
    decoder: Utf8Decoder,
    /// Byte that interrupted a multi-byte sequence and must be decoded again
    held: Option<u8>,
    peeked: Option<char>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            decoder: Utf8Decoder::new(),
            held: None,
            peeked: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.held.take() {
            Some(byte) => Ok(Some(byte)),
            None => self.bytes.next().transpose(),
        }
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        loop {
            let Some(byte) = self.next_byte()? else {
                if self.decoder.is_pending() {
                    self.decoder.reset();
                    return Ok(Some(Utf8Decoder::replacement_char()));
                }
                return Ok(None);
            };
            match self.decoder.feed(byte) {
                Utf8Result::Char(c) => return Ok(Some(c)),
                Utf8Result::Pending => {}
                Utf8Result::Invalid => return Ok(Some(Utf8Decoder::replacement_char())),
                Utf8Result::Interrupted => {
                    self.held = Some(byte);
                    return Ok(Some(Utf8Decoder::replacement_char()));
                }
            }
        }
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    type Error = io::Error;

    fn read_one(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(c) => Ok(Some(c)),
            None => self.decode(),
        }
    }

    fn peek_one(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode()?;
        }
        Ok(self.peeked)
    }
}

/// Lookahead buffer that canonicalizes 8-bit C1 controls on ingestion
///
/// `U+0080 + n` is delivered as `ESC` followed by `U+0040 + n`.
#[derive(Debug)]
pub struct Canonical<S> {
    source: S,
    pending: VecDeque<char>,
}

impl<S: CharSource> Canonical<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: VecDeque::with_capacity(2),
        }
    }

    /// Pull one code point from the source into the buffer
    fn fill(&mut self) -> Result<bool, S::Error> {
        match self.source.read_one()? {
            Some(c) => {
                match c1_to_final(c) {
                    Some(fin) => {
                        self.pending.push_back(ESC);
                        self.pending.push_back(fin);
                    }
                    None => self.pending.push_back(c),
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<S: CharSource> CharSource for Canonical<S> {
    type Error = S::Error;

    fn read_one(&mut self) -> Result<Option<char>, S::Error> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    fn peek_one(&mut self) -> Result<Option<char>, S::Error> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.front().copied())
    }
}
