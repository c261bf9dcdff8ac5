//! Cell width measurement
//!
//! Measures how far each unit moves the cursor. The measurement is a strict
//! left-to-right fold: the current column is the accumulator, and tab and
//! backspace advances depend on it.
//!
//! Classification looks at the unit's lead character (see
//! [`Unit::lead_char`]) in priority order:
//! 1. Newlines end the line and return to column 0
//! 2. The control table below (BS, HT, other C0, printable ASCII, DEL..APC)
//! 3. Unicode general category and East Asian width for everything else

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_width::UnicodeWidthChar;

use crate::codes::{self, BS, DEL, HT, NUL, SP, US};
use crate::error::{Error, Result};
use crate::parser::{self, Unit};

/// Default tab stop interval
pub const DEFAULT_TAB_SIZE: usize = 8;

/// Cursor movement caused by one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Advance {
    /// Lines moved down (1 for a newline, otherwise 0)
    pub lines: usize,
    /// Columns moved right; negative for backspace and newlines
    pub columns: isize,
}

impl Advance {
    pub const ZERO: Advance = Advance { lines: 0, columns: 0 };

    pub fn new(lines: usize, columns: isize) -> Self {
        Self { lines, columns }
    }

    /// Horizontal movement only
    pub fn columns(columns: isize) -> Self {
        Self { lines: 0, columns }
    }

    pub fn as_tuple(&self) -> (usize, isize) {
        (self.lines, self.columns)
    }
}

impl From<(usize, isize)> for Advance {
    fn from((lines, columns): (usize, isize)) -> Self {
        Self { lines, columns }
    }
}

/// Width class of a lead character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// Ends the current line
    LineBreak,
    /// Moves back one cell, never past column 0
    Backspace,
    /// Moves to the next tab stop
    Tab,
    /// No visible effect
    Zero,
    /// One cell
    Single,
    /// Two cells
    Double,
}

/// Fixed classes by code point range, checked in order
// TODO: DEL..APC is blanket zero-width; some C1 controls (IND, RI, HTS, PLD,
// PLU) do move the cursor on real terminals and should get their own entries.
const CONTROL_TABLE: &[(char, char, CellClass)] = &[
    (BS, BS, CellClass::Backspace),
    (HT, HT, CellClass::Tab),
    (NUL, US, CellClass::Zero),
    (SP, '~', CellClass::Single),
    (DEL, codes::C1_LAST, CellClass::Zero),
];

/// Classify a lead character
pub fn classify(c: char) -> CellClass {
    if codes::is_newline(c) {
        return CellClass::LineBreak;
    }
    if let Some(&(_, _, class)) = CONTROL_TABLE
        .iter()
        .find(|(first, last, _)| (*first..=*last).contains(&c))
    {
        return class;
    }
    if !is_printable(c) {
        CellClass::Zero
    } else if is_wide(c) {
        CellClass::Double
    } else {
        CellClass::Single
    }
}

/// Letters, numbers, punctuation, symbols and space separators
fn is_printable(c: char) -> bool {
    match c.general_category_group() {
        GeneralCategoryGroup::Letter
        | GeneralCategoryGroup::Number
        | GeneralCategoryGroup::Punctuation
        | GeneralCategoryGroup::Symbol => true,
        _ => c.general_category() == GeneralCategory::SpaceSeparator,
    }
}

/// Code points where `unicode-width` disagrees with East Asian Width F/W
const WIDE_EXCEPTIONS: &[(char, bool)] = &[
    // KHMER INDEPENDENT VOWEL QAA, EAW N
    ('\u{17A4}', false),
    // HANGUL FILLER, EAW W
    ('\u{3164}', true),
];

/// East Asian Wide or Fullwidth
fn is_wide(c: char) -> bool {
    match WIDE_EXCEPTIONS.iter().find(|(e, _)| *e == c) {
        Some(&(_, wide)) => wide,
        None => c.width() == Some(2),
    }
}

/// Measures units with a fixed tab size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurer {
    tab_size: usize,
}

impl Default for Measurer {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl Measurer {
    /// Create a measurer; `tab_size` must be at least 1
    pub fn new(tab_size: usize) -> Result<Self> {
        if tab_size == 0 {
            return Err(Error::InvalidConfiguration(
                "tab size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tab_size })
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Advance for a single unit with the cursor at `column`
    pub fn advance(&self, column: usize, unit: &Unit) -> Advance {
        match classify(unit.lead_char()) {
            CellClass::LineBreak => Advance::new(1, -(column as isize)),
            CellClass::Backspace => Advance::columns(if column > 0 { -1 } else { 0 }),
            CellClass::Tab => Advance::columns((self.tab_size - column % self.tab_size) as isize),
            CellClass::Zero => Advance::ZERO,
            CellClass::Single => Advance::columns(1),
            CellClass::Double => Advance::columns(2),
        }
    }

    /// Lazily measure a sequence of units
    pub fn measure<I>(&self, units: I) -> Measurements<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Unit>,
    {
        Measurements {
            measurer: *self,
            units: units.into_iter(),
            column: 0,
        }
    }

    /// Final cursor column of each line; always at least one entry
    pub fn line_widths<I>(&self, units: I) -> Vec<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<Unit>,
    {
        let mut widths = Vec::new();
        let mut column = 0;
        for unit in units {
            let advance = self.advance(column, unit.borrow());
            if advance.lines > 0 {
                widths.push(column);
                column = 0;
            } else {
                column = step(column, advance);
            }
        }
        widths.push(column);
        widths
    }
}

fn step(column: usize, advance: Advance) -> usize {
    column.saturating_add_signed(advance.columns)
}

/// Iterator of per-unit advances; see [`Measurer::measure`]
#[derive(Debug, Clone)]
pub struct Measurements<I> {
    measurer: Measurer,
    units: I,
    column: usize,
}

impl<I> Measurements<I> {
    /// Current cursor column after the units measured so far
    pub fn column(&self) -> usize {
        self.column
    }

    /// Yield each unit alongside its advance
    pub fn with_units(self) -> WithUnits<I> {
        WithUnits { inner: self }
    }
}

impl<I> Measurements<I>
where
    I: Iterator,
    I::Item: Borrow<Unit>,
{
    fn next_pair(&mut self) -> Option<(Advance, I::Item)> {
        let unit = self.units.next()?;
        let advance = self.measurer.advance(self.column, unit.borrow());
        self.column = step(self.column, advance);
        Some((advance, unit))
    }
}

impl<I> Iterator for Measurements<I>
where
    I: Iterator,
    I::Item: Borrow<Unit>,
{
    type Item = Advance;

    fn next(&mut self) -> Option<Advance> {
        self.next_pair().map(|(advance, _)| advance)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.units.size_hint()
    }
}

/// Iterator of `(advance, unit)` pairs
#[derive(Debug, Clone)]
pub struct WithUnits<I> {
    inner: Measurements<I>,
}

impl<I> Iterator for WithUnits<I>
where
    I: Iterator,
    I::Item: Borrow<Unit>,
{
    type Item = (Advance, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_pair()
    }
}

/// Measure the width of each line of `text`
///
/// Escape sequences and non-printable characters take no cells, full-width
/// characters take two.
pub fn measure_text(text: &str, tab_size: usize) -> Result<Vec<usize>> {
    let measurer = Measurer::new(tab_size)?;
    Ok(measurer.line_widths(parser::units(text)))
}
