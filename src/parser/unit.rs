//! Character units produced by the tokenizer
//!
//! A unit is one indivisible terminal token: a single character, a newline
//! (including the CRLF pair), a complete escape sequence, or any of those
//! followed by combining marks. Concatenating the raw text of every unit
//! reproduces the (C1-canonicalized) input.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codes::{self, ESC};

/// One token of terminal text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// A single character that is not part of an escape sequence or newline
    Plain(char),
    /// A line-ending character or pair
    Newline(Newline),
    /// An `ESC`-introduced sequence
    Escape(EscapeSequence),
    /// A base unit followed by one or more combining marks
    Cluster(Cluster),
}

/// Newline forms recognised by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Newline {
    /// Carriage return alone
    Cr,
    /// Line feed
    Lf,
    /// Carriage return followed by line feed
    CrLf,
    /// Next line, `ESC E` (the 8-bit form is canonicalized to this)
    Nel,
    /// Vertical tab
    Vt,
    /// Form feed
    Ff,
    /// Line separator, U+2028
    Ls,
    /// Paragraph separator, U+2029
    Ps,
}

impl Newline {
    /// Classify a single code point. CR and NEL are not handled here as
    /// both need lookahead.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            codes::LF => Some(Newline::Lf),
            codes::VT => Some(Newline::Vt),
            codes::FF => Some(Newline::Ff),
            codes::LS => Some(Newline::Ls),
            codes::PS => Some(Newline::Ps),
            _ => None,
        }
    }

    /// Raw text of this newline
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Cr => "\r",
            Newline::Lf => "\n",
            Newline::CrLf => codes::CRLF,
            Newline::Nel => codes::NEL,
            Newline::Vt => "\x0b",
            Newline::Ff => "\x0c",
            Newline::Ls => "\u{2028}",
            Newline::Ps => "\u{2029}",
        }
    }
}

/// Escape sequence classes (ECMA-35 / ECMA-48)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscapeClass {
    /// Control sequence, `ESC [`
    Csi,
    /// Single shift 3, `ESC O`
    Ss3,
    /// Device control string, `ESC P`
    Dcs,
    /// Start of string, `ESC X`
    Sos,
    /// Operating system command, `ESC ]`
    Osc,
    /// Privacy message, `ESC ^`
    Pm,
    /// Application program command, `ESC _`
    Apc,
    /// Other C1 control in 7-bit form, `ESC 0x40..0x5F`
    Fe,
    /// Standardized single function, `ESC 0x60..0x7E`
    Fs,
    /// Private single function, `ESC 0x30..0x3F`
    Fp,
    /// Announcer with intermediate bytes, `ESC 0x20..0x2F ... 0x30..0x7E`
    Nf,
    /// `ESC` followed by anything else, or nothing at all
    Unrecognized,
}

/// How a sequence of a given class ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Nothing follows the introducer
    Immediate,
    /// Ends with a final byte in `@`..`~`
    FinalByte,
    /// Ends with ST (`ESC \`)
    StringTerminator,
    /// Ends with a byte in `0`..`~` after intermediates
    Intermediate,
}

impl EscapeClass {
    /// Classify a sequence by the character following `ESC`
    pub fn from_introducer(c: char) -> Self {
        match c {
            '[' => EscapeClass::Csi,
            'O' => EscapeClass::Ss3,
            'P' => EscapeClass::Dcs,
            'X' => EscapeClass::Sos,
            ']' => EscapeClass::Osc,
            '^' => EscapeClass::Pm,
            '_' => EscapeClass::Apc,
            '@'..='_' => EscapeClass::Fe,
            '`'..='~' => EscapeClass::Fs,
            '0'..='?' => EscapeClass::Fp,
            ' '..='/' => EscapeClass::Nf,
            _ => EscapeClass::Unrecognized,
        }
    }

    pub fn termination(&self) -> Termination {
        match self {
            EscapeClass::Csi | EscapeClass::Ss3 => Termination::FinalByte,
            EscapeClass::Dcs
            | EscapeClass::Sos
            | EscapeClass::Osc
            | EscapeClass::Pm
            | EscapeClass::Apc => Termination::StringTerminator,
            EscapeClass::Nf => Termination::Intermediate,
            EscapeClass::Fe | EscapeClass::Fs | EscapeClass::Fp | EscapeClass::Unrecognized => {
                Termination::Immediate
            }
        }
    }

    /// Check if this class is terminated by ST
    pub fn is_string(&self) -> bool {
        self.termination() == Termination::StringTerminator
    }
}

/// A complete (or end-of-stream truncated) escape sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EscapeSequence {
    raw: String,
    class: EscapeClass,
    complete: bool,
}

impl EscapeSequence {
    pub fn new(raw: impl Into<String>, class: EscapeClass, complete: bool) -> Self {
        Self {
            raw: raw.into(),
            class,
            complete,
        }
    }

    /// Full raw text, starting with `ESC`
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn class(&self) -> EscapeClass {
        self.class
    }

    /// False when the stream ended before the sequence's terminator
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Character after `ESC`
    pub fn introducer(&self) -> Option<char> {
        self.raw.chars().nth(1)
    }

    /// Last character of the sequence (the final byte for complete CSI/SS3)
    pub fn final_char(&self) -> Option<char> {
        if self.raw.chars().count() > 2 {
            self.raw.chars().last()
        } else {
            None
        }
    }

    /// Text between the introducer and the final byte (or ST)
    pub fn body(&self) -> &str {
        let after_intro = self
            .raw
            .char_indices()
            .nth(2)
            .map_or(self.raw.len(), |(i, _)| i);
        let end = match (self.complete, self.class.termination()) {
            (true, Termination::StringTerminator) => self.raw.len() - codes::ST.len(),
            (true, Termination::FinalByte) | (true, Termination::Intermediate) => self
                .raw
                .char_indices()
                .last()
                .map_or(self.raw.len(), |(i, _)| i),
            _ => self.raw.len(),
        };
        self.raw.get(after_intro..end.max(after_intro)).unwrap_or("")
    }

    /// Check for an SGR reset (`CSI 0 m` or `CSI m`)
    pub fn is_sgr_reset(&self) -> bool {
        self.raw == "\x1b[0m" || self.raw == "\x1b[m"
    }
}

/// A base unit with trailing combining marks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cluster {
    base: Box<Unit>,
    marks: Vec<char>,
}

impl Cluster {
    pub fn new(base: Unit, marks: Vec<char>) -> Self {
        // Flatten so a cluster never nests inside another
        match base {
            Unit::Cluster(mut inner) => {
                inner.marks.extend(marks);
                inner
            }
            base => Self {
                base: Box::new(base),
                marks,
            },
        }
    }

    pub fn base(&self) -> &Unit {
        &self.base
    }

    pub fn marks(&self) -> &[char] {
        &self.marks
    }
}

impl Unit {
    /// Append the raw text of this unit to `out`
    pub fn push_raw(&self, out: &mut String) {
        match self {
            Unit::Plain(c) => out.push(*c),
            Unit::Newline(n) => out.push_str(n.as_str()),
            Unit::Escape(seq) => out.push_str(&seq.raw),
            Unit::Cluster(cluster) => {
                cluster.base.push_raw(out);
                out.extend(cluster.marks.iter());
            }
        }
    }

    /// Raw text of this unit
    pub fn raw(&self) -> Cow<'_, str> {
        match self {
            Unit::Newline(n) => Cow::Borrowed(n.as_str()),
            Unit::Escape(seq) => Cow::Borrowed(&seq.raw),
            _ => {
                let mut out = String::new();
                self.push_raw(&mut out);
                Cow::Owned(out)
            }
        }
    }

    /// The unit without any combining marks
    pub fn base(&self) -> &Unit {
        match self {
            Unit::Cluster(cluster) => &cluster.base,
            other => other,
        }
    }

    /// Combining marks attached to this unit
    pub fn marks(&self) -> &[char] {
        match self {
            Unit::Cluster(cluster) => &cluster.marks,
            _ => &[],
        }
    }

    /// The code point that determines this unit's measurement.
    ///
    /// For 7-bit C1 escapes (`ESC @` .. `ESC _`) this is the equivalent
    /// 8-bit control, so `ESC E` reports NEL and `ESC [` reports CSI.
    pub fn lead_char(&self) -> char {
        match self {
            Unit::Plain(c) => *c,
            Unit::Newline(Newline::Nel) => codes::C1_NEL,
            Unit::Newline(n) => n.as_str().chars().next().unwrap_or(codes::LF),
            Unit::Escape(seq) => seq
                .introducer()
                .and_then(codes::final_to_c1)
                .unwrap_or(ESC),
            Unit::Cluster(cluster) => cluster.base.lead_char(),
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Unit::Plain(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_escape(&self) -> Option<&EscapeSequence> {
        match self.base() {
            Unit::Escape(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self.base(), Unit::Newline(_))
    }

    pub fn is_escape(&self) -> bool {
        matches!(self.base(), Unit::Escape(_))
    }

    /// False only for an escape sequence cut short by end of stream
    pub fn is_complete(&self) -> bool {
        self.as_escape().map_or(true, EscapeSequence::is_complete)
    }

    /// Check for an SGR reset (`CSI 0 m` or `CSI m`) with no marks
    pub fn is_sgr_reset(&self) -> bool {
        matches!(self, Unit::Escape(seq) if seq.is_sgr_reset())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Plain(c) => write!(f, "{}", c),
            Unit::Newline(n) => f.write_str(n.as_str()),
            Unit::Escape(seq) => f.write_str(&seq.raw),
            Unit::Cluster(cluster) => {
                write!(f, "{}", cluster.base)?;
                for mark in &cluster.marks {
                    write!(f, "{}", mark)?;
                }
                Ok(())
            }
        }
    }
}

impl From<char> for Unit {
    fn from(c: char) -> Self {
        Unit::Plain(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_class_from_introducer() {
        assert_eq!(EscapeClass::from_introducer('['), EscapeClass::Csi);
        assert_eq!(EscapeClass::from_introducer('O'), EscapeClass::Ss3);
        assert_eq!(EscapeClass::from_introducer('P'), EscapeClass::Dcs);
        assert_eq!(EscapeClass::from_introducer('_'), EscapeClass::Apc);
        assert_eq!(EscapeClass::from_introducer('D'), EscapeClass::Fe);
        assert_eq!(EscapeClass::from_introducer('c'), EscapeClass::Fs);
        assert_eq!(EscapeClass::from_introducer('7'), EscapeClass::Fp);
        assert_eq!(EscapeClass::from_introducer('('), EscapeClass::Nf);
        assert_eq!(EscapeClass::from_introducer('\x07'), EscapeClass::Unrecognized);
        assert_eq!(EscapeClass::from_introducer('é'), EscapeClass::Unrecognized);
    }

    #[test]
    fn test_termination() {
        assert_eq!(EscapeClass::Csi.termination(), Termination::FinalByte);
        assert_eq!(EscapeClass::Osc.termination(), Termination::StringTerminator);
        assert_eq!(EscapeClass::Nf.termination(), Termination::Intermediate);
        assert_eq!(EscapeClass::Fs.termination(), Termination::Immediate);
        assert!(EscapeClass::Sos.is_string());
        assert!(!EscapeClass::Ss3.is_string());
    }

    #[test]
    fn test_unit_raw_text() {
        assert_eq!(Unit::Plain('x').raw(), "x");
        assert_eq!(Unit::Newline(Newline::CrLf).raw(), "\r\n");
        assert_eq!(Unit::Newline(Newline::Nel).raw(), "\x1bE");
        let seq = EscapeSequence::new("\x1b[31m", EscapeClass::Csi, true);
        assert_eq!(Unit::Escape(seq).to_string(), "\x1b[31m");
        let cluster = Unit::Cluster(Cluster::new(Unit::Plain('e'), vec!['\u{301}']));
        assert_eq!(cluster.raw(), "e\u{301}");
        assert_eq!(cluster.to_string(), "e\u{301}");
    }

    #[test]
    fn test_lead_char_collapses_c1() {
        let csi = Unit::Escape(EscapeSequence::new("\x1b[0m", EscapeClass::Csi, true));
        assert_eq!(csi.lead_char(), '\u{9B}');
        let ris = Unit::Escape(EscapeSequence::new("\x1bc", EscapeClass::Fs, true));
        assert_eq!(ris.lead_char(), ESC);
        assert_eq!(Unit::Newline(Newline::Nel).lead_char(), '\u{85}');
        assert_eq!(Unit::Newline(Newline::CrLf).lead_char(), '\r');
    }

    #[test]
    fn test_escape_body() {
        let sgr = EscapeSequence::new("\x1b[1;31m", EscapeClass::Csi, true);
        assert_eq!(sgr.body(), "1;31");
        assert_eq!(sgr.final_char(), Some('m'));
        let osc = EscapeSequence::new("\x1b]0;title\x1b\\", EscapeClass::Osc, true);
        assert_eq!(osc.body(), "0;title");
        let cut = EscapeSequence::new("\x1b[12", EscapeClass::Csi, false);
        assert_eq!(cut.body(), "12");
        let lone = EscapeSequence::new("\x1b", EscapeClass::Unrecognized, false);
        assert_eq!(lone.body(), "");
        assert_eq!(lone.final_char(), None);
    }

    #[test]
    fn test_cluster_flattens() {
        let inner = Unit::Cluster(Cluster::new(Unit::Plain('a'), vec!['\u{300}']));
        let outer = Cluster::new(inner, vec!['\u{301}']);
        assert_eq!(outer.base(), &Unit::Plain('a'));
        assert_eq!(outer.marks(), &['\u{300}', '\u{301}']);
    }

    #[test]
    fn test_sgr_reset() {
        let csi = |raw: &str| Unit::Escape(EscapeSequence::new(raw, EscapeClass::Csi, true));
        assert!(csi("\x1b[0m").is_sgr_reset());
        assert!(csi("\x1b[m").is_sgr_reset());
        assert!(!csi("\x1b[1m").is_sgr_reset());
    }
}
