//! Text styling
//!
//! Encodes CSS-like style properties as SGR sequences and applies them to
//! text. Multi-line text is re-wrapped line by line: each line gets its own
//! prefix and reset, so pagers and other line-oriented consumers that start
//! each line from a clean state still see the style.

mod color;
mod sgr;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use color::Color;
pub use sgr::{Sgr, RESET};

use crate::error::{Error, Result};
use crate::parser::{self, Unit};

/// Font weight; numeric weights follow the CSS scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Light,
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_numeric(weight: u32) -> Self {
        if weight > 500 {
            FontWeight::Bold
        } else if weight < 400 {
            FontWeight::Light
        } else {
            FontWeight::Normal
        }
    }

    pub fn sgr(&self) -> Sgr {
        match self {
            FontWeight::Light => Sgr::LIGHT,
            FontWeight::Normal => !Sgr::BOLD,
            FontWeight::Bold => Sgr::BOLD,
        }
    }
}

impl FromStr for FontWeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "bold" => Ok(FontWeight::Bold),
            "normal" => Ok(FontWeight::Normal),
            other => other
                .parse::<u32>()
                .map(FontWeight::from_numeric)
                .map_err(|_| Error::InvalidStyle {
                    property: "font-weight",
                    value: s.to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn sgr(&self) -> Sgr {
        match self {
            FontStyle::Normal => !Sgr::ITALIC,
            FontStyle::Italic => Sgr::ITALIC,
        }
    }
}

impl FromStr for FontStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "italic" | "oblique" => Ok(FontStyle::Italic),
            "normal" => Ok(FontStyle::Normal),
            _ => Err(Error::InvalidStyle {
                property: "font-style",
                value: s.to_string(),
            }),
        }
    }
}

/// Set of text decoration lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextDecoration {
    pub underline: bool,
    /// Doubles the underline; ignored without `underline`
    pub double: bool,
    pub blink: bool,
    pub line_through: bool,
    pub overline: bool,
}

impl TextDecoration {
    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::default()
        }
    }

    pub fn sgrs(&self) -> Vec<Sgr> {
        let mut sgrs = Vec::new();
        if self.underline {
            sgrs.push(if self.double {
                Sgr::DOUBLE_UNDERLINE
            } else {
                Sgr::UNDERLINE
            });
        }
        if self.blink {
            sgrs.push(Sgr::BLINK);
        }
        if self.line_through {
            sgrs.push(Sgr::LINE_THROUGH);
        }
        if self.overline {
            sgrs.push(Sgr::OVERLINE);
        }
        sgrs
    }
}

/// Space-separated keywords, e.g. `"double underline blink"`
impl FromStr for TextDecoration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut decoration = TextDecoration::default();
        for word in s.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "underline" => decoration.underline = true,
                "double" => decoration.double = true,
                "blink" => decoration.blink = true,
                "line-through" => decoration.line_through = true,
                "overline" => decoration.overline = true,
                "none" => {}
                _ => {
                    return Err(Error::InvalidStyle {
                        property: "text-decoration",
                        value: s.to_string(),
                    })
                }
            }
        }
        Ok(decoration)
    }
}

const SUBSCRIPT: &[(char, char)] = &[
    ('(', '₍'), (')', '₎'), ('+', '₊'), ('-', '₋'),
    ('0', '₀'), ('1', '₁'), ('2', '₂'), ('3', '₃'), ('4', '₄'),
    ('5', '₅'), ('6', '₆'), ('7', '₇'), ('8', '₈'), ('9', '₉'),
    ('=', '₌'), ('a', 'ₐ'), ('e', 'ₑ'), ('h', 'ₕ'), ('k', 'ₖ'),
    ('l', 'ₗ'), ('m', 'ₘ'), ('n', 'ₙ'), ('o', 'ₒ'), ('p', 'ₚ'),
    ('s', 'ₛ'), ('t', 'ₜ'),
];

const SUPERSCRIPT: &[(char, char)] = &[
    ('(', '⁽'), (')', '⁾'), ('+', '⁺'), ('-', '⁻'),
    ('0', '⁰'), ('1', '¹'), ('2', '²'), ('3', '³'), ('4', '⁴'),
    ('5', '⁵'), ('6', '⁶'), ('7', '⁷'), ('8', '⁸'), ('9', '⁹'),
    ('=', '⁼'), ('i', 'ⁱ'), ('n', 'ⁿ'),
];

/// Vertical alignment, rendered with Unicode sub/superscript characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAlign {
    #[default]
    Baseline,
    Sub,
    Super,
}

impl VerticalAlign {
    /// Map a character to its shifted form; characters without one are
    /// returned unchanged
    pub fn translate(&self, c: char) -> char {
        let table = match self {
            VerticalAlign::Baseline => return c,
            VerticalAlign::Sub => SUBSCRIPT,
            VerticalAlign::Super => SUPERSCRIPT,
        };
        table
            .iter()
            .find(|(from, _)| *from == c)
            .map_or(c, |&(_, to)| to)
    }
}

impl FromStr for VerticalAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "baseline" => Ok(VerticalAlign::Baseline),
            "sub" => Ok(VerticalAlign::Sub),
            "super" => Ok(VerticalAlign::Super),
            _ => Err(Error::InvalidStyle {
                property: "vertical-align",
                value: s.to_string(),
            }),
        }
    }
}

/// A set of style properties; unset properties emit nothing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub vertical_align: Option<VerticalAlign>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn text_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = Some(decoration);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    /// SGR sequences in emission order: colour, background, weight, style,
    /// decoration
    pub fn sgrs(&self) -> Vec<Sgr> {
        let mut sgrs = Vec::new();
        sgrs.extend(self.color.map(|c| c.foreground()));
        sgrs.extend(self.background.map(|c| c.background()));
        sgrs.extend(self.font_weight.map(|w| w.sgr()));
        sgrs.extend(self.font_style.map(|s| s.sgr()));
        if let Some(decoration) = self.text_decoration {
            sgrs.extend(decoration.sgrs());
        }
        sgrs
    }

    /// Control sequences emitted before each styled line
    pub fn prefix(&self) -> String {
        self.sgrs().iter().map(Sgr::to_string).collect()
    }

    /// Style `text`, re-wrapping each line in the prefix and a reset
    pub fn apply(&self, text: &str) -> String {
        let mut units = parser::units(text);
        if let Some(align) = self.vertical_align {
            for unit in &mut units {
                if let Unit::Plain(c) = unit {
                    *c = align.translate(*c);
                }
            }
        }
        wrap_lines(&units, &self.prefix())
    }
}

/// Join units back into text, wrapping the content of each line
pub(crate) fn wrap_lines(units: &[Unit], prefix: &str) -> String {
    let mut out = String::new();
    if prefix.is_empty() {
        units.iter().for_each(|unit| unit.push_raw(&mut out));
        return out;
    }
    for line in units.split_inclusive(Unit::is_newline) {
        let (content, newline) = match line.split_last() {
            Some((last, content)) if last.is_newline() => (content, Some(last)),
            _ => (line, None),
        };
        if let Some(last) = content.last() {
            out.push_str(prefix);
            content.iter().for_each(|unit| unit.push_raw(&mut out));
            if !last.is_sgr_reset() {
                out.push_str(RESET);
            }
        }
        if let Some(newline) = newline {
            newline.push_raw(&mut out);
        }
    }
    out
}
