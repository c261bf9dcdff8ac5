//! Colour values
//!
//! Named colours select the terminal's own 16-colour palette; hex codes
//! select 24-bit RGB.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sgr::Sgr;
use crate::error::{Error, Result};

const DEFAULT_FG: u8 = 39;
const DEFAULT_BG: u8 = 49;

/// The first sixteen web colours and their CGA terminal selectors
/// (foreground, background). Some colours go by two names.
const CGA_PALETTE: &[(&str, u8, u8)] = &[
    ("aqua", 96, 106),
    ("black", 30, 40),
    ("blue", 94, 104),
    ("cyan", 96, 106),
    ("fuchsia", 95, 105),
    ("gray", 90, 100),
    ("green", 32, 42),
    ("grey", 90, 100),
    ("lime", 92, 102),
    ("magenta", 95, 105),
    ("maroon", 31, 41),
    ("navy", 34, 44),
    ("olive", 33, 43),
    ("purple", 35, 45),
    ("red", 91, 101),
    ("silver", 37, 47),
    ("teal", 36, 46),
    ("white", 97, 107),
    ("yellow", 93, 103),
];

/// Terminal colour selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// The terminal's default colour
    Default,
    /// One of the 16 palette colours, as foreground/background selectors
    Palette { fg: u8, bg: u8 },
    /// 24-bit colour
    Rgb(u8, u8, u8),
}

impl Color {
    /// Look up a CGA colour name (case insensitive)
    pub fn named(name: &str) -> Option<Color> {
        let name = name.to_ascii_lowercase();
        CGA_PALETTE
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, fg, bg)| Color::Palette { fg, bg })
    }

    /// Decode `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; alpha is discarded
    pub fn from_hex(value: &str) -> Result<Color> {
        let invalid = || Error::InvalidColor(value.to_string());
        let digits = value.trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let component = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 | 4 => {
                let r = component(&digits[0..1])? * 17;
                let g = component(&digits[1..2])? * 17;
                let b = component(&digits[2..3])? * 17;
                Ok(Color::Rgb(r, g, b))
            }
            6 | 8 => Ok(Color::Rgb(
                component(&digits[0..2])?,
                component(&digits[2..4])?,
                component(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// SGR selecting this colour as the foreground
    pub fn foreground(&self) -> Sgr {
        self.sgr(false)
    }

    /// SGR selecting this colour as the background
    pub fn background(&self) -> Sgr {
        self.sgr(true)
    }

    fn sgr(&self, background: bool) -> Sgr {
        let default = if background { DEFAULT_BG } else { DEFAULT_FG };
        match *self {
            Color::Default => Sgr::new(vec![default], Vec::new()),
            Color::Palette { fg, bg } => {
                let param = if background { bg } else { fg };
                Sgr::new(vec![param], vec![default])
            }
            Color::Rgb(r, g, b) => {
                let select = if background { 48 } else { 38 };
                Sgr::new(vec![select, 2, r, g, b], vec![default])
            }
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.starts_with('#') {
            Color::from_hex(value)
        } else if value.eq_ignore_ascii_case("default") {
            Ok(Color::Default)
        } else {
            Color::named(value).ok_or_else(|| Error::InvalidColor(value.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        let red: Color = "red".parse().unwrap();
        assert_eq!(red.foreground().to_string(), "\x1b[91m");
        assert_eq!(red.background().to_string(), "\x1b[101m");
        assert_eq!((!red.foreground()).to_string(), "\x1b[39m");
        assert_eq!(Color::named("Grey"), Color::named("gray"));
        assert_eq!(Color::named("aqua"), Color::named("cyan"));
        assert_eq!("navy".parse::<Color>().unwrap().foreground().to_string(), "\x1b[34m");
    }

    #[test]
    fn test_default_color() {
        let color: Color = " default ".parse().unwrap();
        assert_eq!(color.foreground().to_string(), "\x1b[39m");
        assert_eq!(color.background().to_string(), "\x1b[49m");
        assert!(color.foreground().reset().is_empty());
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::from_hex("#f80").unwrap(), Color::Rgb(255, 136, 0));
        assert_eq!(Color::from_hex("#f80c").unwrap(), Color::Rgb(255, 136, 0));
        assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::Rgb(255, 128, 0));
        assert_eq!(Color::from_hex("#ff800080").unwrap(), Color::Rgb(255, 128, 0));
        let sgr = Color::Rgb(1, 2, 3).background();
        assert_eq!(sgr.to_string(), "\x1b[48;2;1;2;3m");
        assert_eq!(sgr.reset(), &[49u8]);
    }

    #[test]
    fn test_invalid_colors() {
        assert!(matches!("chartreuse".parse::<Color>(), Err(Error::InvalidColor(_))));
        assert!("#12".parse::<Color>().is_err());
        assert!("#ggg".parse::<Color>().is_err());
        assert!("#ff80001".parse::<Color>().is_err());
        assert!("#é00".parse::<Color>().is_err());
    }
}
