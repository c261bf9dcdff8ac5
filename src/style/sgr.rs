//! SGR (Select Graphic Rendition) sequences
//!
//! An [`Sgr`] holds the parameters of a `CSI ... m` sequence together with
//! the parameters that undo it.

use std::borrow::Cow;
use std::fmt;
use std::ops::Not;

use crate::codes::CSI;

/// Full reset of all graphic rendition
pub const RESET: &str = "\x1b[0m";

/// Parameters of an SGR control sequence, with an optional reset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sgr {
    params: Cow<'static, [u8]>,
    reset: Cow<'static, [u8]>,
}

impl Sgr {
    pub const BOLD: Sgr = Sgr::fixed(&[1], &[22]);
    pub const LIGHT: Sgr = Sgr::fixed(&[2], &[22]);
    pub const ITALIC: Sgr = Sgr::fixed(&[3], &[23]);
    pub const UNDERLINE: Sgr = Sgr::fixed(&[4], &[24]);
    pub const BLINK: Sgr = Sgr::fixed(&[5], &[25]);
    pub const INVERT: Sgr = Sgr::fixed(&[7], &[27]);
    pub const LINE_THROUGH: Sgr = Sgr::fixed(&[9], &[29]);
    pub const DOUBLE_UNDERLINE: Sgr = Sgr::fixed(&[21], &[24]);
    pub const OVERLINE: Sgr = Sgr::fixed(&[53], &[55]);
    pub const RESET: Sgr = Sgr::fixed(&[0], &[]);

    const fn fixed(params: &'static [u8], reset: &'static [u8]) -> Self {
        Self {
            params: Cow::Borrowed(params),
            reset: Cow::Borrowed(reset),
        }
    }

    pub fn new(params: Vec<u8>, reset: Vec<u8>) -> Self {
        Self {
            params: Cow::Owned(params),
            reset: Cow::Owned(reset),
        }
    }

    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Parameters that undo this rendition; empty if there are none
    pub fn reset(&self) -> &[u8] {
        &self.reset
    }
}

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(CSI)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str("m")
    }
}

/// Swap parameters and reset; an SGR without a reset is its own inverse
impl Not for Sgr {
    type Output = Sgr;

    fn not(self) -> Sgr {
        if self.reset.is_empty() {
            self
        } else {
            Sgr {
                params: self.reset,
                reset: self.params,
            }
        }
    }
}

impl Not for &Sgr {
    type Output = Sgr;

    fn not(self) -> Sgr {
        !self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgr_display() {
        assert_eq!(Sgr::BOLD.to_string(), "\x1b[1m");
        assert_eq!(Sgr::RESET.to_string(), RESET);
        assert_eq!(
            Sgr::new(vec![38, 2, 255, 128, 0], vec![39]).to_string(),
            "\x1b[38;2;255;128;0m"
        );
    }

    #[test]
    fn test_sgr_not() {
        assert_eq!((!Sgr::BOLD).to_string(), "\x1b[22m");
        assert_eq!(!!Sgr::ITALIC, Sgr::ITALIC);
        assert_eq!(!&Sgr::OVERLINE, Sgr::fixed(&[55], &[53]));
        assert_eq!(!Sgr::RESET, Sgr::RESET);
    }
}
