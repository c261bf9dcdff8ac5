//! Property-based invariant tests for the tokenizer and measurer.
//!
//! Verifies:
//! 1. Round trip: joined unit text equals the C1-canonicalized input
//! 2. Atomicity: only the last unit may be an incomplete escape sequence
//! 3. Tab advance lies in 1..=tab_size and lands on a tab stop
//! 4. Backspace never moves the running column below zero
//! 5. Line widths have one entry per newline unit plus one
//! 6. Reader and in-memory sources produce the same units
//! 7. Combining marks never start a unit after another unit

use proptest::prelude::*;
use termtext::codes::canonicalize_c1;
use termtext::parser::{is_combining, tokenize, tokenize_reader, units, Unit};
use termtext::{Advance, Measurer};

// ── Strategy helpers ──────────────────────────────────────────────────

/// Fixed fragments that exercise every tokenizer path
const FRAGMENTS: &[&str] = &[
    "\t",
    "\x08",
    "\r\n",
    "\r",
    "\n",
    "\u{2028}",
    "\u{85}",
    "\x1bE",
    "\x1b[1;31m",
    "\x1b[0m",
    "\x1bOA",
    "\x1b]0;title\x1b\\",
    "\u{9B}2J",
    "\x1b(B",
    "\x1b7",
    "\u{301}",
    "ｗ",
    "中文",
    "\x1b",
    "\x1b[",
];

fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,8}",
        prop::sample::select(FRAGMENTS).prop_map(String::from),
        any::<char>().prop_map(String::from),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..24).prop_map(|parts| parts.concat())
}

fn raw_units(text: &str) -> Vec<Unit> {
    tokenize(text)
        .map(|unit| match unit {
            Ok(unit) => unit,
            Err(never) => match never {},
        })
        .collect()
}

fn running_columns(measurer: &Measurer, units: &[Unit]) -> Vec<isize> {
    let mut column = 0isize;
    measurer
        .measure(units)
        .map(|Advance { lines, columns }| {
            column += columns;
            if lines > 0 {
                assert_eq!(column, 0);
            }
            column
        })
        .collect()
}

proptest! {
    #[test]
    fn round_trip_reproduces_canonical_input(text in arb_text()) {
        let joined: String = units(&text).iter().map(|u| u.to_string()).collect();
        prop_assert_eq!(&joined, &canonicalize_c1(&text));
        let joined: String = raw_units(&text).iter().map(|u| u.to_string()).collect();
        prop_assert_eq!(joined, canonicalize_c1(&text));
    }

    #[test]
    fn only_last_unit_may_be_incomplete(text in arb_text()) {
        let units = units(&text);
        if let Some((_, init)) = units.split_last() {
            prop_assert!(init.iter().all(Unit::is_complete));
        }
    }

    #[test]
    fn tab_advance_lands_on_tab_stop(column in 0usize..500, tab_size in 1usize..32) {
        let measurer = Measurer::new(tab_size).unwrap();
        let advance = measurer.advance(column, &Unit::Plain('\t'));
        prop_assert_eq!(advance.lines, 0);
        prop_assert!(advance.columns >= 1);
        prop_assert!(advance.columns as usize <= tab_size);
        prop_assert_eq!((column + advance.columns as usize) % tab_size, 0);
    }

    #[test]
    fn running_column_never_negative(text in arb_text(), tab_size in 1usize..16) {
        let measurer = Measurer::new(tab_size).unwrap();
        let units = units(&text);
        for column in running_columns(&measurer, &units) {
            prop_assert!(column >= 0);
        }
    }

    #[test]
    fn line_count_matches_newlines(text in arb_text()) {
        let units = units(&text);
        let widths = Measurer::default().line_widths(&units);
        let newlines = units.iter().filter(|u| u.is_newline()).count();
        prop_assert!(!widths.is_empty());
        prop_assert_eq!(widths.len(), newlines + 1);
    }

    #[test]
    fn reader_matches_str_source(text in arb_text()) {
        let from_reader: Vec<Unit> = tokenize_reader(text.as_bytes())
            .clusters()
            .collect::<std::io::Result<_>>()
            .unwrap();
        prop_assert_eq!(from_reader, units(&text));
    }

    #[test]
    fn marks_only_lead_the_first_unit(text in arb_text()) {
        let units = units(&text);
        for unit in units.iter().skip(1) {
            prop_assert!(!matches!(unit, Unit::Plain(c) if is_combining(*c)));
        }
    }
}
