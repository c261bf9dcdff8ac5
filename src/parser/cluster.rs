//! Combining mark grouping
//!
//! Wraps a [`Tokenizer`] so that any combining marks (general category M*)
//! immediately after a unit are attached to it, whatever kind of unit it is.

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use super::source::CharSource;
use super::state::Tokenizer;
use super::unit::{Cluster, Unit};

/// Check whether a code point is a combining mark
pub fn is_combining(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Mark
}

/// Tokenizer adapter yielding mark-grouped units
///
/// Grouping looks one code point past each unit, so on a live stream a unit
/// is delivered only once the next input (or end of stream) arrives. Use the
/// bare [`Tokenizer`] where that latency matters.
#[derive(Debug)]
pub struct Clusters<S> {
    tokenizer: Tokenizer<S>,
    /// Unit and marks read so far, kept across a source error
    pending: Option<(Unit, Vec<char>)>,
}

impl<S: CharSource> Clusters<S> {
    pub fn new(tokenizer: Tokenizer<S>) -> Self {
        Self {
            tokenizer,
            pending: None,
        }
    }

    /// Read the next unit with its trailing marks, or `None` at end of stream
    pub fn next_unit(&mut self) -> Result<Option<Unit>, S::Error> {
        let (base, mut marks) = match self.pending.take() {
            Some(pending) => pending,
            None => match self.tokenizer.next_unit()? {
                Some(base) => (base, Vec::new()),
                None => return Ok(None),
            },
        };
        let input = self.tokenizer.input_mut();
        loop {
            match input.peek_one() {
                Ok(Some(c)) if is_combining(c) => {
                    input.read_one()?;
                    marks.push(c);
                }
                Ok(_) => break,
                Err(e) => {
                    self.pending = Some((base, marks));
                    return Err(e);
                }
            }
        }
        if marks.is_empty() {
            Ok(Some(base))
        } else {
            Ok(Some(Unit::Cluster(Cluster::new(base, marks))))
        }
    }
}

impl<S: CharSource> Iterator for Clusters<S> {
    type Item = Result<Unit, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_unit().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::source::{ReaderSource, StrSource};
    use crate::parser::test_support::{collect_retrying, Stalling};
    use crate::parser::unit::Newline;

    fn clusters(text: &str) -> Vec<Unit> {
        Tokenizer::new(StrSource::new(text))
            .clusters()
            .map(|unit| match unit {
                Ok(unit) => unit,
                Err(never) => match never {},
            })
            .collect()
    }

    #[test]
    fn test_is_combining() {
        assert!(is_combining('\u{301}')); // combining acute, Mn
        assert!(is_combining('\u{903}')); // devanagari visarga, Mc
        assert!(is_combining('\u{20DD}')); // enclosing circle, Me
        assert!(!is_combining('e'));
        assert!(!is_combining('\x1b'));
        assert!(!is_combining('ｗ'));
    }

    #[test]
    fn test_marks_attach_to_plain() {
        let units = clusters("e\u{301}\u{302}x");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].base(), &Unit::Plain('e'));
        assert_eq!(units[0].marks(), &['\u{301}', '\u{302}']);
        assert_eq!(units[1], Unit::Plain('x'));
    }

    #[test]
    fn test_marks_attach_to_newline_and_escape() {
        let units = clusters("\r\n\u{301}\x1b[1m\u{300}");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].base(), &Unit::Newline(Newline::CrLf));
        assert!(units[0].is_newline());
        assert!(units[1].is_escape());
        assert_eq!(units[1].to_string(), "\x1b[1m\u{300}");
    }

    #[test]
    fn test_leading_mark_is_its_own_unit() {
        let units = clusters("\u{301}a");
        assert_eq!(units, vec![Unit::Plain('\u{301}'), Unit::Plain('a')]);
    }

    #[test]
    fn test_no_marks_no_cluster() {
        assert_eq!(clusters("ab"), vec![Unit::Plain('a'), Unit::Plain('b')]);
    }

    #[test]
    fn test_clusters_resume_after_source_error() {
        let text = "qe\u{301}\u{302}\r\n\u{300}r";
        let stalls: Vec<usize> = (1..=text.len()).collect();
        let reader = Stalling::new(text.as_bytes(), &stalls);
        let (units, errors) =
            collect_retrying(Tokenizer::new(ReaderSource::new(reader)).clusters());
        assert_eq!(errors, stalls.len());
        let joined: String = units.iter().map(|u| u.to_string()).collect();
        assert_eq!(joined, text);
        assert_eq!(units.len(), 4);
        assert_eq!(units[0], Unit::Plain('q'));
        assert_eq!(units[1].marks(), &['\u{301}', '\u{302}']);
        assert_eq!(units[2].base(), &Unit::Newline(Newline::CrLf));
        assert_eq!(units[3], Unit::Plain('r'));
    }
}
