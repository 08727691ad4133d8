use serde::{Deserialize, Serialize};

/// Character that marks a cell as a formula.
pub const FORMULA_MARKER: char = '=';

/// Literal substituted for references that fall outside the grid.
pub const OUT_OF_RANGE_LITERAL: &str = "0";

/// Longest dependency chain followed before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Per-run evaluation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub marker: char,
    pub max_depth: usize,
    pub out_of_range: String,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            marker: FORMULA_MARKER,
            max_depth: DEFAULT_MAX_DEPTH,
            out_of_range: OUT_OF_RANGE_LITERAL.to_string(),
        }
    }
}

impl EvalOptions {
    /// Return the formula body (marker stripped) if `text` is a formula.
    pub fn formula_body<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.strip_prefix(self.marker)
    }

    pub fn is_formula(&self, text: &str) -> bool {
        text.starts_with(self.marker)
    }
}
