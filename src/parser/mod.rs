//! Terminal text tokenizer
//!
//! A pull-based tokenizer that splits a character stream into units: plain
//! characters, newlines, and complete escape sequences, optionally with
//! trailing combining marks attached.
//! Sequence classes follow ECMA-35 and ECMA-48.

mod cluster;
mod source;
mod state;
mod unit;
mod utf8;

use std::io::Read;

pub use cluster::{is_combining, Clusters};
pub use source::{Canonical, CharSource, ReaderSource, StrSource};
pub use state::Tokenizer;
pub use unit::{Cluster, EscapeClass, EscapeSequence, Newline, Termination, Unit};
pub use utf8::{Utf8Decoder, Utf8Result};

/// Tokenize in-memory text (without mark grouping)
pub fn tokenize(text: &str) -> Tokenizer<StrSource<'_>> {
    Tokenizer::new(StrSource::new(text))
}

/// Tokenize a UTF-8 byte stream (without mark grouping)
pub fn tokenize_reader<R: Read>(reader: R) -> Tokenizer<ReaderSource<R>> {
    Tokenizer::new(ReaderSource::new(reader))
}

/// Split text into mark-grouped units
pub fn units(text: &str) -> Vec<Unit> {
    tokenize(text)
        .clusters()
        .map(|unit| match unit {
            Ok(unit) => unit,
            Err(never) => match never {},
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Read};

    /// Reader that fails once with `WouldBlock` at each listed offset
    pub(crate) struct Stalling {
        data: Vec<u8>,
        pos: usize,
        stalls: Vec<usize>,
    }

    impl Stalling {
        pub(crate) fn new(data: &[u8], stalls: &[usize]) -> Self {
            Self {
                data: data.to_vec(),
                pos: 0,
                stalls: stalls.to_vec(),
            }
        }
    }

    impl Read for Stalling {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(i) = self.stalls.iter().position(|&at| at == self.pos) {
                self.stalls.remove(i);
                return Err(io::ErrorKind::WouldBlock.into());
            }
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    /// Drain a fallible iterator, retrying after each error
    pub(crate) fn collect_retrying<T, I>(iter: I) -> (Vec<T>, usize)
    where
        I: Iterator<Item = io::Result<T>>,
    {
        let mut items = Vec::new();
        let mut errors = 0;
        for item in iter {
            match item {
                Ok(item) => items.push(item),
                Err(e) => {
                    assert_eq!(e.kind(), io::ErrorKind::WouldBlock);
                    errors += 1;
                }
            }
        }
        (items, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_groups_marks() {
        let units = units("a\u{308}b");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].to_string(), "a\u{308}");
    }

    #[test]
    fn test_tokenize_reader_matches_str() {
        let text = "x\x1b[2Jy\r\nｗ\u{301}";
        let from_reader: Vec<Unit> = tokenize_reader(text.as_bytes())
            .clusters()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(from_reader, units(text));
    }

    #[test]
    fn test_tokenize_reader_canonicalizes_8bit_controls() {
        // U+009B encoded as UTF-8
        let bytes = b"\xC2\x9B1mz";
        let raw: String = tokenize_reader(&bytes[..])
            .map(|u| u.unwrap().to_string())
            .collect();
        assert_eq!(raw, "\x1b[1mz");
    }
}
