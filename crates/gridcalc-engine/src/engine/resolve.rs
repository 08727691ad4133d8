//! Substitution of cell references inside a formula body.
//!
//! A reference is a single uppercase column letter followed by the longest
//! run of digits (`A1`, `C120`). References are replaced left to right with
//! the referenced cell's resolved text; everything else is copied verbatim.
//! References that fall outside the grid degrade to the configured fallback
//! literal (`"0"` by default) instead of failing the formula.

use log::warn;
use regex::Regex;
use std::sync::OnceLock;

use super::eval::Evaluation;
use super::{CellRef, ExpressionEvaluator};
use crate::error::Result;

fn cell_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z][0-9]+").expect("cell token regex must compile"))
}

/// Decode a scanned token such as `B12`.
fn decode_token(token: &str) -> Option<CellRef> {
    let mut chars = token.chars();
    let letter = chars.next()?;
    CellRef::from_token(letter, chars.as_str())
}

impl<E> Evaluation<'_, E>
where
    E: ExpressionEvaluator + ?Sized,
{
    /// Replace every cell reference in `body` with its resolved value,
    /// evaluating referenced formulas first.
    pub(super) fn substitute_references(&mut self, body: &str) -> Result<String> {
        let mut out = String::with_capacity(body.len());
        let mut last = 0;

        for token in cell_token_re().find_iter(body) {
            out.push_str(&body[last..token.start()]);
            let value = match decode_token(token.as_str()) {
                Some(cell) if self.grid.contains(&cell) => self.resolve_cell(cell)?,
                _ => {
                    warn!(
                        "reference {} is outside the grid, using {:?}",
                        token.as_str(),
                        self.options.out_of_range
                    );
                    self.options.out_of_range.clone()
                }
            };
            out.push_str(&value);
            last = token.end();
        }
        out.push_str(&body[last..]);

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EvalOptions, Grid, Value};
    use crate::error::EvaluatorError;

    fn never(_: &str) -> std::result::Result<Value, EvaluatorError> {
        Err("evaluator should not be called".into())
    }

    fn substitute(rows: Vec<Vec<&str>>, body: &str) -> String {
        let mut grid = Grid::from_rows(rows);
        let options = EvalOptions::default();
        let mut run = Evaluation::new(&mut grid, &never, &options);
        run.substitute_references(body).unwrap()
    }

    #[test]
    fn test_decode_token() {
        assert_eq!(decode_token("B12"), Some(CellRef::new(11, 1)));
        assert_eq!(decode_token("A0"), None);
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        let rows = vec![vec!["5", "10"]];
        assert_eq!(substitute(rows.clone(), "A1 + B1"), "5 + 10");
        assert_eq!(substitute(rows.clone(), "(A1*B1)/2"), "(5*10)/2");
        assert_eq!(substitute(rows, "no refs here"), "no refs here");
    }

    #[test]
    fn test_out_of_range_and_malformed_tokens_fall_back_to_zero() {
        let rows = vec![vec!["3", ""]];
        assert_eq!(substitute(rows.clone(), "Z9"), "0");
        assert_eq!(substitute(rows.clone(), "A0+A1"), "0+3");
        assert_eq!(substitute(rows, "A99999999999999999999999"), "0");
    }

    #[test]
    fn test_ragged_rows_bound_each_row_separately() {
        let rows = vec![vec!["1", "2"], vec!["3"]];
        assert_eq!(substitute(rows, "B1+B2"), "2+0");
    }

    #[test]
    fn test_tokens_match_single_letter_and_longest_digit_run() {
        let mut rows = vec![vec![""; 2]; 12];
        rows[11][1] = "x";
        rows[0][0] = "a";
        // "AB12" scans as "A" then the token "B12".
        assert_eq!(substitute(rows.clone(), "AB12"), "Ax");
        assert_eq!(substitute(rows.clone(), "A1B12"), "ax");
        assert_eq!(substitute(rows, "a1"), "a1");
    }

    #[test]
    fn test_empty_cells_substitute_as_empty_text() {
        let rows = vec![vec!["3", ""]];
        assert_eq!(substitute(rows, "[A1,B1]"), "[3,]");
    }

    #[test]
    fn test_custom_fallback_literal() {
        let mut grid = Grid::from_rows(vec![vec!["1"]]);
        let options = EvalOptions {
            out_of_range: "null".to_string(),
            ..EvalOptions::default()
        };
        let mut run = Evaluation::new(&mut grid, &never, &options);
        assert_eq!(run.substitute_references("C3").unwrap(), "null");
    }
}
