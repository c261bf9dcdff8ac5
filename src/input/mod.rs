//! Input Decoding Module
//!
//! Decodes units read from a terminal into key events. Function keys arrive
//! as CSI or SS3 sequences; modifiers are carried in the second parameter
//! using the xterm PC-style encoding:
//!
//! ```text
//! param = 1 + (shift ? 1 : 0) + (alt ? 2 : 0) + (ctrl ? 4 : 0) + (meta ? 8 : 0)
//! ```
//!
//! APC strings (`ESC _ ... ESC \`) are application responses rather than key
//! presses and are reported separately.

use serde::{Deserialize, Serialize};

use crate::codes::{BS, DEL, ESC, HT};
use crate::parser::{CharSource, EscapeClass, EscapeSequence, Tokenizer, Unit};

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// Decode an xterm modifier parameter (1 + bitmask); out-of-range values
    /// decode to no modifiers
    pub fn from_param(param: u32) -> Self {
        if !(2..=16).contains(&param) {
            return Self::default();
        }
        let bits = param - 1;
        Self {
            shift: bits & 1 != 0,
            alt: bits & 2 != 0,
            ctrl: bits & 4 != 0,
            meta: bits & 8 != 0,
        }
    }

    /// Encode as an xterm modifier parameter
    pub fn as_param(&self) -> u32 {
        let mut param = 1;
        if self.shift {
            param += 1;
        }
        if self.alt {
            param += 2;
        }
        if self.ctrl {
            param += 4;
        }
        if self.meta {
            param += 8;
        }
        param
    }

    /// Check if any modifier is pressed
    pub fn any(&self) -> bool {
        self.shift || self.alt || self.ctrl || self.meta
    }
}

/// Decoded key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Printable character
    Char(char),

    // Cursor keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Editing
    Backspace,
    Tab,
    Enter,
    Escape,
    /// Keypad space (SS3 SP)
    Space,
    Pause,

    /// A control or sequence with no key mapping
    Unknown,
}

impl Key {
    /// Key for `CSI n ~`
    fn from_tilde(n: u32) -> Key {
        match n {
            2 => Key::Insert,
            3 => Key::Delete,
            5 => Key::PageUp,
            6 => Key::PageDown,
            13 => Key::F3,
            15 => Key::F5,
            17 => Key::F6,
            18 => Key::F7,
            19 => Key::F8,
            20 => Key::F9,
            21 => Key::F10,
            23 => Key::F11,
            24 => Key::F12,
            _ => Key::Unknown,
        }
    }

    /// Key for a CSI or SS3 letter final
    fn from_final(c: char) -> Key {
        match c {
            'A' => Key::Up,
            'B' => Key::Down,
            'C' => Key::Right,
            'D' => Key::Left,
            'F' => Key::End,
            'H' => Key::Home,
            'I' => Key::Tab,
            'P' => Key::F1,
            'Q' => Key::F2,
            'R' => Key::F3,
            'S' => Key::F4,
            _ => Key::Unknown,
        }
    }
}

/// Kitty keyboard protocol code for Pause (`CSI 57362 u`)
const KITTY_PAUSE: u32 = 57362;

/// A key press decoded from one input unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Raw text of the unit
    pub raw: String,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn from_unit(unit: &Unit) -> Self {
        let (key, modifiers) = match unit.base() {
            Unit::Plain(c) => (char_key(*c), Modifiers::default()),
            Unit::Newline(_) => (Key::Enter, Modifiers::default()),
            Unit::Escape(seq) => decode_sequence(seq),
            Unit::Cluster(_) => (Key::Unknown, Modifiers::default()),
        };
        Self {
            raw: unit.to_string(),
            key,
            modifiers,
        }
    }
}

fn char_key(c: char) -> Key {
    match c {
        HT => Key::Tab,
        BS | DEL => Key::Backspace,
        ESC => Key::Escape,
        c if c.is_control() => Key::Unknown,
        c => Key::Char(c),
    }
}

/// Split `n;m` parameters; missing or malformed values read as `None`
fn params(body: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = body.splitn(2, ';');
    let n = parts.next().and_then(|s| s.parse().ok());
    let m = parts.next().and_then(|s| s.parse().ok());
    (n, m)
}

fn decode_sequence(seq: &EscapeSequence) -> (Key, Modifiers) {
    if seq.as_str() == "\x1b" {
        return (Key::Escape, Modifiers::default());
    }
    let Some(final_char) = seq.final_char().filter(|_| seq.is_complete()) else {
        return (Key::Unknown, Modifiers::default());
    };
    let (n, m) = params(seq.body());
    let modifiers = Modifiers::from_param(m.unwrap_or(1));
    match seq.class() {
        EscapeClass::Csi => match final_char {
            '~' => (n.map_or(Key::Unknown, Key::from_tilde), modifiers),
            'u' if n == Some(KITTY_PAUSE) => (Key::Pause, modifiers),
            'Z' => (Key::Tab, Modifiers { shift: true, ..modifiers }),
            c => (Key::from_final(c), modifiers),
        },
        EscapeClass::Ss3 => match final_char {
            ' ' => (Key::Space, modifiers),
            c => (Key::from_final(c), modifiers),
        },
        _ => (Key::Unknown, Modifiers::default()),
    }
}

/// An input unit classified as a key press or an application response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Payload of an APC string
    Apc(String),
}

impl InputEvent {
    pub fn from_unit(unit: &Unit) -> Self {
        match unit.as_escape() {
            Some(seq) if seq.class() == EscapeClass::Apc => InputEvent::Apc(seq.body().to_string()),
            _ => InputEvent::Key(KeyEvent::from_unit(unit)),
        }
    }
}

/// Iterator of input events read from a character source
///
/// Each event is delivered as soon as its unit is complete; no lookahead
/// for combining marks is done.
#[derive(Debug)]
pub struct Events<S> {
    units: Tokenizer<S>,
}

impl<S: CharSource> Events<S> {
    pub fn new(source: S) -> Self {
        Self {
            units: Tokenizer::new(source),
        }
    }
}

impl<S: CharSource> Iterator for Events<S> {
    type Item = Result<InputEvent, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.units
            .next()
            .map(|unit| unit.map(|unit| InputEvent::from_unit(&unit)))
    }
}
