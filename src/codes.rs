//! Control code table
//!
//! Constants for the ECMA-48 C0 and C1 control sets, the escape sequence
//! introducers, and the set of Unicode newline code points.
//!
//! C1 controls are represented here in their 7-bit form (`ESC` followed by a
//! byte from 0x40-0x5F). An 8-bit C1 code `0x80 + n` is equivalent to
//! `ESC (0x40 + n)` (ECMA-35 § 8.2.2), and all input is canonicalized to the
//! 7-bit form as it is read.

// C0 control codes
pub const NUL: char = '\x00';
pub const SOH: char = '\x01';
pub const STX: char = '\x02';
pub const ETX: char = '\x03';
pub const EOT: char = '\x04';
pub const ENQ: char = '\x05';
pub const ACK: char = '\x06';
pub const BEL: char = '\x07';
pub const BS: char = '\x08';
pub const HT: char = '\x09';
pub const LF: char = '\x0A';
pub const VT: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\x0D';
pub const SO: char = '\x0E';
pub const SI: char = '\x0F';
pub const DLE: char = '\x10';
pub const DC1: char = '\x11';
pub const DC2: char = '\x12';
pub const DC3: char = '\x13';
pub const DC4: char = '\x14';
pub const NAK: char = '\x15';
pub const SYN: char = '\x16';
pub const ETB: char = '\x17';
pub const CAN: char = '\x18';
pub const EM: char = '\x19';
pub const SUB: char = '\x1A';
pub const ESC: char = '\x1B';
pub const FS: char = '\x1C';
pub const GS: char = '\x1D';
pub const RS: char = '\x1E';
pub const US: char = '\x1F';

pub const SP: char = '\x20';
pub const DEL: char = '\x7F';

// C1 control codes, 7-bit form
pub const PAD: &str = "\x1b@";
pub const HOP: &str = "\x1bA";
pub const BPH: &str = "\x1bB";
pub const NBH: &str = "\x1bC";
pub const IND: &str = "\x1bD";
pub const NEL: &str = "\x1bE";
pub const SSA: &str = "\x1bF";
pub const ESA: &str = "\x1bG";
pub const HTS: &str = "\x1bH";
pub const HTJ: &str = "\x1bI";
pub const VTS: &str = "\x1bJ";
pub const PLD: &str = "\x1bK";
pub const PLU: &str = "\x1bL";
pub const RI: &str = "\x1bM";
pub const SS2: &str = "\x1bN";
pub const SS3: &str = "\x1bO";
pub const DCS: &str = "\x1bP";
pub const PU1: &str = "\x1bQ";
pub const PU2: &str = "\x1bR";
pub const STS: &str = "\x1bS";
pub const CCH: &str = "\x1bT";
pub const MW: &str = "\x1bU";
pub const SPA: &str = "\x1bV";
pub const EPA: &str = "\x1bW";
pub const SOS: &str = "\x1bX";
pub const SGC: &str = "\x1bY";
pub const SCI: &str = "\x1bZ";
pub const CSI: &str = "\x1b[";
pub const ST: &str = "\x1b\\";
pub const OSC: &str = "\x1b]";
pub const PM: &str = "\x1b^";
pub const APC: &str = "\x1b_";

/// First and last 8-bit C1 code points
pub const C1_FIRST: char = '\u{80}';
pub const C1_LAST: char = '\u{9F}';

// Newlines
// https://www.unicode.org/versions/Unicode16.0.0/core-spec/chapter-5/#G10213
pub const CRLF: &str = "\r\n";
pub const C1_NEL: char = '\u{85}';
pub const LS: char = '\u{2028}';
pub const PS: char = '\u{2029}';

/// Single code points that end a line.
///
/// CRLF is a pair and is recognised by the tokenizer from its leading CR; the
/// 7-bit NEL (`ESC E`) collapses to [`C1_NEL`] before lookup.
pub const NEWLINE_CHARS: [char; 7] = [CR, LF, VT, FF, C1_NEL, LS, PS];

/// Check whether a single code point is a Unicode newline
pub fn is_newline(c: char) -> bool {
    NEWLINE_CHARS.contains(&c)
}

/// Check whether a code point is an 8-bit C1 control
pub fn is_c1(c: char) -> bool {
    (C1_FIRST..=C1_LAST).contains(&c)
}

/// Expand an 8-bit C1 control to the final byte of its 7-bit escape form.
///
/// Returns `None` for anything outside 0x80-0x9F.
pub fn c1_to_final(c: char) -> Option<char> {
    if is_c1(c) {
        char::from_u32(c as u32 - 0x40)
    } else {
        None
    }
}

/// Collapse the final byte of a 7-bit C1 escape (`ESC @` .. `ESC _`) to the
/// equivalent 8-bit code point.
pub fn final_to_c1(c: char) -> Option<char> {
    if ('@'..='_').contains(&c) {
        char::from_u32(c as u32 + 0x40)
    } else {
        None
    }
}

/// Replace every 8-bit C1 control in `text` with its 7-bit escape form
pub fn canonicalize_c1(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c1_to_final(c) {
            Some(fin) => {
                out.push(ESC);
                out.push(fin);
            }
            None => out.push(c),
        }
    }
    out
}
