//! Measured text
//!
//! [`Text`] holds canonical text (8-bit C1 controls replaced by their 7-bit
//! escape forms) split into units, with measurements computed on first use.

use std::sync::OnceLock;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Bound, RangeBounds};
use std::slice;

use crate::codes;
use crate::error::Result;
use crate::measure::{Advance, Measurer};
use crate::parser::{self, Unit};
use crate::style::{self, Style};

/// Text split into units with a fixed tab size
#[derive(Clone)]
pub struct Text {
    raw: String,
    units: Vec<Unit>,
    measurer: Measurer,
    measurements: OnceLock<Vec<Advance>>,
}

impl Text {
    /// Create text measured with the default tab size
    pub fn new(text: &str) -> Self {
        Self::with_measurer(text, Measurer::default())
    }

    pub fn with_tab_size(text: &str, tab_size: usize) -> Result<Self> {
        Ok(Self::with_measurer(text, Measurer::new(tab_size)?))
    }

    pub fn with_measurer(text: &str, measurer: Measurer) -> Self {
        let raw = codes::canonicalize_c1(text);
        let units = parser::units(&raw);
        Self {
            raw,
            units,
            measurer,
            measurements: OnceLock::new(),
        }
    }

    fn from_units(units: Vec<Unit>, measurer: Measurer) -> Self {
        let mut raw = String::new();
        units.iter().for_each(|unit| unit.push_raw(&mut raw));
        Self {
            raw,
            units,
            measurer,
            measurements: OnceLock::new(),
        }
    }

    /// Same text measured with a different tab size
    pub fn retab(&self, tab_size: usize) -> Result<Self> {
        let measurer = Measurer::new(tab_size)?;
        if measurer == self.measurer {
            return Ok(self.clone());
        }
        Ok(Self {
            raw: self.raw.clone(),
            units: self.units.clone(),
            measurer,
            measurements: OnceLock::new(),
        })
    }

    pub fn tab_size(&self) -> usize {
        self.measurer.tab_size()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Unit> {
        self.units.iter()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units in `range` as new text, or `None` if out of bounds
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Option<Text> {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        self.units
            .get(bounds)
            .map(|units| Self::from_units(units.to_vec(), self.measurer))
    }

    /// Substring search over the raw text
    pub fn contains(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }

    /// Per-unit advances
    pub fn measurements(&self) -> &[Advance] {
        self.measurements
            .get_or_init(|| self.measurer.measure(&self.units).collect())
    }

    /// Width of each line in cells
    pub fn line_widths(&self) -> Vec<usize> {
        self.measurer.line_widths(&self.units)
    }

    /// Width of the widest line
    pub fn width(&self) -> usize {
        self.line_widths().into_iter().max().unwrap_or(0)
    }

    /// Number of lines; empty text is one empty line
    pub fn height(&self) -> usize {
        1 + self.units.iter().filter(|unit| unit.is_newline()).count()
    }

    /// Map each plain character through `f`, leaving escape sequences,
    /// newlines and clusters as they are
    pub fn translate<F>(&self, mut f: F) -> Text
    where
        F: FnMut(char) -> char,
    {
        let mut raw = String::with_capacity(self.raw.len());
        for unit in &self.units {
            match unit {
                Unit::Plain(c) => raw.push(f(*c)),
                other => other.push_raw(&mut raw),
            }
        }
        Self::with_measurer(&raw, self.measurer)
    }

    /// Apply `style` line by line
    pub fn style(&self, style: &Style) -> Text {
        let translated = match style.vertical_align {
            Some(align) => self.translate(|c| align.translate(c)),
            None => self.clone(),
        };
        let wrapped = style::wrap_lines(&translated.units, &style.prefix());
        Self::with_measurer(&wrapped, self.measurer)
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Text").field(&self.raw).finish()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.raw == codes::canonicalize_c1(other)
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: AsRef<str>> Add<T> for Text {
    type Output = Text;

    fn add(self, other: T) -> Text {
        let mut raw = self.raw;
        raw.push_str(other.as_ref());
        Self::with_measurer(&raw, self.measurer)
    }
}

impl<'a> IntoIterator for &'a Text {
    type Item = &'a Unit;
    type IntoIter = slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
