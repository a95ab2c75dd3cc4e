/*!
 * Eligibility filter: decides whether a text value is worth translating.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Values made only of digits and number formatting characters
static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s,.\-]+$").expect("numeric literal pattern is valid"));

/// Marker that starts a spreadsheet formula
pub const FORMULA_MARKER: char = '=';

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pure decision function over raw cell or shape text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityFilter {
    min_chars: usize,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl EligibilityFilter {
    /// `min_chars` is counted in characters on the whitespace-normalized text
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Whether `raw` should be sent for translation
    ///
    /// Empty or whitespace-only values, numeric literals, formulas and values
    /// shorter than the minimum are not.
    pub fn is_eligible(&self, raw: &str) -> bool {
        let text = clean_text(raw);
        if text.is_empty() || text.chars().count() < self.min_chars {
            return false;
        }
        if NUMERIC_LITERAL.is_match(&text) {
            return false;
        }
        if text.starts_with(FORMULA_MARKER) {
            return false;
        }
        true
    }
}
