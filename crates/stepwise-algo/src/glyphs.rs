//! Character sets for plain-text output.

use crate::coins::DpCell;

/// Symbols used when rendering boards and DP tables as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub queen: char,
    pub empty: char,
    /// Cell currently under test.
    pub probe: char,
    /// Unreachable DP cell.
    pub infinity: &'static str,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        queen: '♛',
        empty: '·',
        probe: '?',
        infinity: "∞",
    };

    pub const ASCII: Glyphs = Glyphs {
        queen: 'Q',
        empty: '.',
        probe: '?',
        infinity: "inf",
    };

    /// Format a DP cell.
    pub fn cell(&self, cell: DpCell) -> String {
        match cell.value() {
            Some(v) => v.to_string(),
            None => self.infinity.to_string(),
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs::UNICODE
    }
}
