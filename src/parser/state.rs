//! Tokenizer State Machine
//!
//! Partitions a code point stream into [`Unit`]s. Plain text is passed
//! through one character at a time; CR is joined with a following LF; an
//! `ESC` starts a sequence whose end depends on its class.
//!
//! # State Machine
//!
//! States while inside a sequence:
//! - Escape: After ESC, the next character picks the class
//! - ControlSequence: CSI/SS3, waiting for a final byte in `@`..`~`
//! - ControlString: DCS/SOS/OSC/PM/APC, waiting for ESC
//! - ControlStringEscape: ESC seen inside a string, `\` completes ST
//! - Intermediate: nF, waiting for a byte in `0`..`~`
//!
//! End of stream inside a sequence emits what was read so far, marked
//! incomplete. A source error inside a unit keeps the partial unit, and the
//! next call picks up where it stopped.

use tracing::trace;

use super::cluster::Clusters;
use super::source::{Canonical, CharSource};
use super::unit::{EscapeClass, EscapeSequence, Newline, Termination, Unit};
use crate::codes::{CR, ESC, LF};

/// Tokenizer state inside an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Escape,
    ControlSequence,
    ControlString,
    ControlStringEscape,
    Intermediate,
    Done,
}

/// A unit started but not yet finished when the source returned an error
#[derive(Debug, Clone, PartialEq, Eq)]
enum Partial {
    /// CR read, LF lookahead outstanding
    CarriageReturn,
    Escape {
        raw: String,
        class: EscapeClass,
        state: State,
    },
}

/// Pull-based tokenizer over a character source
///
/// Each call to [`Tokenizer::next_unit`] consumes exactly one unit from the
/// source. A source error leaves the unit in progress buffered, so calling
/// again after a transient error (such as `WouldBlock`) resumes it.
#[derive(Debug)]
pub struct Tokenizer<S> {
    input: Canonical<S>,
    partial: Option<Partial>,
}

impl<S: CharSource> Tokenizer<S> {
    /// Create a tokenizer. 8-bit C1 controls from `source` are delivered in
    /// 7-bit form.
    pub fn new(source: S) -> Self {
        Self {
            input: Canonical::new(source),
            partial: None,
        }
    }

    /// Group combining marks with the unit before them
    pub fn clusters(self) -> Clusters<S> {
        Clusters::new(self)
    }

    /// Canonicalized input, for lookahead past the current unit
    pub(crate) fn input_mut(&mut self) -> &mut Canonical<S> {
        &mut self.input
    }

    /// Read the next unit, or `None` at end of stream
    pub fn next_unit(&mut self) -> Result<Option<Unit>, S::Error> {
        let partial = match self.partial.take() {
            Some(partial) => partial,
            None => match self.input.read_one()? {
                None => return Ok(None),
                Some(CR) => Partial::CarriageReturn,
                Some(ESC) => Partial::Escape {
                    raw: String::from(ESC),
                    class: EscapeClass::Unrecognized,
                    state: State::Escape,
                },
                Some(c) => {
                    let unit = Newline::from_char(c).map_or(Unit::Plain(c), Unit::Newline);
                    return Ok(Some(unit));
                }
            },
        };
        let unit = match partial {
            Partial::CarriageReturn => self.carriage_return()?,
            Partial::Escape { raw, class, state } => self.escape_sequence(raw, class, state)?,
        };
        Ok(Some(unit))
    }

    /// Finish a CR, joining a following LF
    fn carriage_return(&mut self) -> Result<Unit, S::Error> {
        match self.input.peek_one() {
            Ok(Some(LF)) => {
                // Already buffered by the peek
                self.input.read_one()?;
                Ok(Unit::Newline(Newline::CrLf))
            }
            Ok(_) => Ok(Unit::Newline(Newline::Cr)),
            Err(e) => {
                self.partial = Some(Partial::CarriageReturn);
                Err(e)
            }
        }
    }

    /// Collect the rest of an escape sequence starting from `raw`
    fn escape_sequence(
        &mut self,
        mut raw: String,
        mut class: EscapeClass,
        mut state: State,
    ) -> Result<Unit, S::Error> {
        while state != State::Done {
            let c = match self.input.read_one() {
                Ok(Some(c)) => c,
                Ok(None) => {
                    trace!(?class, len = raw.len(), "escape sequence truncated by end of stream");
                    return Ok(Unit::Escape(EscapeSequence::new(raw, class, false)));
                }
                Err(e) => {
                    self.partial = Some(Partial::Escape { raw, class, state });
                    return Err(e);
                }
            };
            raw.push(c);
            state = match state {
                State::Escape => {
                    class = EscapeClass::from_introducer(c);
                    match class.termination() {
                        Termination::Immediate => State::Done,
                        Termination::FinalByte => State::ControlSequence,
                        Termination::StringTerminator => State::ControlString,
                        Termination::Intermediate => State::Intermediate,
                    }
                }
                State::ControlSequence => match c {
                    '@'..='~' => State::Done,
                    _ => State::ControlSequence,
                },
                State::ControlString | State::ControlStringEscape => match (state, c) {
                    (State::ControlStringEscape, '\\') => State::Done,
                    (_, ESC) => State::ControlStringEscape,
                    _ => State::ControlString,
                },
                State::Intermediate => match c {
                    '0'..='~' => State::Done,
                    _ => State::Intermediate,
                },
                State::Done => State::Done,
            };
        }

        if class == EscapeClass::Fe && raw == crate::codes::NEL {
            return Ok(Unit::Newline(Newline::Nel));
        }
        Ok(Unit::Escape(EscapeSequence::new(raw, class, true)))
    }
}

impl<S: CharSource> Iterator for Tokenizer<S> {
    type Item = Result<Unit, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_unit().transpose()
    }
}
