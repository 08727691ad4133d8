//! Cell address encoding and decoding.
//!
//! Converts between zero-indexed `(row, col)` pairs and spreadsheet-style
//! addresses such as `A1` or `C12`. Formula scanning only recognises
//! single-letter columns, but [`CellRef`] renders any column index so that
//! error messages never lose information.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of columns addressable by a single letter (`A`..=`Z`).
pub const SINGLE_LETTER_COLUMNS: usize = 26;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Build a reference from a zero-indexed `row` and `col`, in that order
    /// (`CellRef::new(1, 0)` is `A2`).
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell address (e.g. "A1", "b2", "AA10").
    /// Returns None for malformed input, row 0, or numeric overflow.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(address: &str) -> Option<CellRef> {
        let caps = a1_re().captures(address)?;
        let col = letters_to_col(&caps["letters"])?;
        let row = row_from_digits(&caps["numbers"])?;
        Some(CellRef::new(row, col))
    }

    /// Decode a token produced by the formula scanner: a single column letter
    /// and its row digits.
    pub fn from_token(letter: char, digits: &str) -> Option<CellRef> {
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let col = (letter as u8 - b'A') as usize;
        let row = row_from_digits(digits)?;
        Some(CellRef::new(row, col))
    }

    /// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell address regex must compile")
    })
}

fn letters_to_col(letters: &str) -> Option<usize> {
    let mut acc = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        let digit = (c - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    acc.checked_sub(1)
}

fn row_from_digits(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok()?.checked_sub(1)
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::from_str(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellRef, SINGLE_LETTER_COLUMNS};
    use proptest::prelude::*;

    #[test]
    fn test_from_str_single_letter_columns() {
        assert_eq!(CellRef::from_str("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_str("B1"), Some(CellRef::new(0, 1)));
        assert_eq!(CellRef::from_str("Z9"), Some(CellRef::new(8, 25)));
    }

    #[test]
    fn test_from_str_multi_letter_and_lowercase() {
        assert_eq!(CellRef::from_str("AA1").map(|c| c.col), Some(26));
        assert_eq!(CellRef::from_str("a10"), Some(CellRef::new(9, 0)));
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_parse_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
        assert!(CellRef::from_token('A', "99999999999999999999999999").is_none());
    }

    #[test]
    fn test_from_token_rejects_lowercase_and_row_zero() {
        assert_eq!(CellRef::from_token('C', "12"), Some(CellRef::new(11, 2)));
        assert!(CellRef::from_token('c', "12").is_none());
        assert!(CellRef::from_token('A', "0").is_none());
    }

    #[test]
    fn test_new_takes_row_before_col() {
        let cell = CellRef::new(2, 1);
        assert_eq!((cell.row, cell.col), (2, 1));
        assert_eq!(cell.to_string(), "B3");
        assert_eq!(CellRef::new(1, 0).to_string(), "A2");
    }

    #[test]
    fn test_display_uses_letters_then_one_based_row() {
        assert_eq!(CellRef::new(0, 0).to_string(), "A1");
        assert_eq!(CellRef::new(9, 1).to_string(), "B10");
        assert_eq!(CellRef::new(0, 26).to_string(), "AA1");
    }

    #[test]
    fn test_fromstr_trait_reports_bad_address() {
        let err = "nope".parse::<CellRef>().unwrap_err();
        assert_eq!(err, "Invalid cell reference: nope");
    }

    proptest! {
        #[test]
        fn prop_address_round_trips(row in 0usize..100_000, col in 0usize..SINGLE_LETTER_COLUMNS) {
            let cell = CellRef::new(row, col);
            prop_assert_eq!(CellRef::from_str(&cell.to_string()), Some(cell));
        }

        #[test]
        fn prop_token_matches_rendered_address(row in 0usize..100_000, col in 0usize..SINGLE_LETTER_COLUMNS) {
            let cell = CellRef::new(row, col);
            let letter = (b'A' + col as u8) as char;
            let digits = (row + 1).to_string();
            prop_assert_eq!(CellRef::from_token(letter, &digits), Some(cell));
            prop_assert_eq!(cell.to_string(), format!("{letter}{digits}"));
        }
    }
}
