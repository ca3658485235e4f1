//! N-Queens backtracking visualizer.
//!
//! The generator performs a depth-first search over one queen per row, trying
//! columns left to right, and stops at the first complete placement. Every
//! safety check, placement, backtrack and row failure is recorded as a
//! [`QueenEvent`] together with a copy of the [`Board`].

mod generator;
mod narrative;
mod result;
mod safety;


pub use generator::{SearchOutcome, generate};
pub use narrative::{format_board, narrate};
pub use result::{QueensResult, is_valid_solution};
pub use safety::{check_safety, is_safe};

use serde::{Deserialize, Serialize};
use stepwise_trace::{Step, StepEvent, Trace};

/// Algorithm name stored in N-Queens traces.
pub const NAME: &str = "n_queens";

/// Pseudocode listing referenced by [`StepEvent::code_line`].
pub const PSEUDOCODE: &[&str] = &[
    "bool solveNQueen(int row) {",
    "    if (row == N) return true;  // all queens placed",
    "",
    "    // try every column of this row",
    "    for (int col = 0; col < N; col++) {",
    "        // column and both upper diagonals must be free",
    "        if (isSafe(row, col)) {",
    "            // place queen",
    "            board[row][col] = 1;",
    "            if (solveNQueen(row + 1))",
    "                return true;",
    "",
    "            // backtrack",
    "            board[row][col] = 0;",
    "        }",
    "    }",
    "    return false;",
    "}",
];

/// Trace of one N-Queens run.
pub type QueenTrace = Trace<QueenEvent, Board>;

/// Step of an N-Queens trace.
pub type QueenStep = Step<QueenEvent, Board>;

/// N×N board; `true` marks a queen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(Vec<Vec<bool>>);

impl Board {
    /// Empty board of the given size.
    pub fn new(size: usize) -> Self {
        Self(vec![vec![false; size]; size])
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Whether a queen sits on `(row, col)`. Out-of-range squares are empty.
    pub fn has_queen(&self, row: usize, col: usize) -> bool {
        self.0
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.0
    }

    pub fn queen_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&q| q).count()
    }

    /// Column of the first queen in each row, skipping empty rows.
    pub fn queen_columns(&self) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(|row| row.iter().position(|&q| q))
            .collect()
    }

    pub(crate) fn place(&mut self, row: usize, col: usize) {
        self.0[row][col] = true;
    }

    pub(crate) fn remove(&mut self, row: usize, col: usize) {
        self.0[row][col] = false;
    }
}

impl From<Vec<Vec<bool>>> for Board {
    fn from(rows: Vec<Vec<bool>>) -> Self {
        Self(rows)
    }
}

/// Outcome of one of the three safety sub-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    Clear,
    /// Nearest queen on the checked line.
    Attacked { row: usize, col: usize },
}

impl CheckResult {
    pub fn is_clear(self) -> bool {
        matches!(self, CheckResult::Clear)
    }

    pub fn attacker(self) -> Option<(usize, usize)> {
        match self {
            CheckResult::Clear => None,
            CheckResult::Attacked { row, col } => Some((row, col)),
        }
    }
}

/// Result of `isSafe(row, col)` broken down by attack line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub column: CheckResult,
    /// Up-left diagonal.
    pub left_diagonal: CheckResult,
    /// Up-right diagonal.
    pub right_diagonal: CheckResult,
}

impl SafetyReport {
    pub fn is_safe(&self) -> bool {
        self.column.is_clear() && self.left_diagonal.is_clear() && self.right_diagonal.is_clear()
    }
}

/// N-Queens step kinds and their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueenEvent {
    /// Empty board created.
    Init { size: usize },
    /// Column loop of `row` begins.
    RowStart { row: usize, queens_placed: usize },
    /// `isSafe(row, col)` evaluated.
    CheckSafe {
        row: usize,
        col: usize,
        safe: bool,
        checks: SafetyReport,
    },
    PlaceQueen { row: usize, col: usize },
    /// Queen removed after the deeper search failed.
    Backtrack { row: usize, col: usize },
    SkipUnsafe {
        row: usize,
        col: usize,
        checks: SafetyReport,
    },
    /// Every column of `row` failed.
    RowFail { row: usize },
    /// Terminal: all queens placed. `queens[r]` is the column in row `r`.
    Success { size: usize, queens: Vec<usize> },
    /// Terminal: the search space was exhausted without a solution.
    Exhausted { size: usize },
}

impl StepEvent for QueenEvent {
    fn kind(&self) -> &'static str {
        match self {
            QueenEvent::Init { .. } => "init",
            QueenEvent::RowStart { .. } => "row_start",
            QueenEvent::CheckSafe { .. } => "check_safe",
            QueenEvent::PlaceQueen { .. } => "place_queen",
            QueenEvent::Backtrack { .. } => "backtrack",
            QueenEvent::SkipUnsafe { .. } => "skip_unsafe",
            QueenEvent::RowFail { .. } => "row_fail",
            QueenEvent::Success { .. } => "success",
            QueenEvent::Exhausted { .. } => "exhausted",
        }
    }

    fn phase(&self) -> String {
        match self {
            QueenEvent::Init { .. } => "INITIALIZATION".to_string(),
            QueenEvent::RowStart { row, .. } => format!("ROW_{}_START", row),
            QueenEvent::CheckSafe { row, col, .. } => format!("CHECK_ROW_{}_COL_{}", row, col),
            QueenEvent::PlaceQueen { row, col } => format!("PLACE_QUEEN_AT_{}_{}", row, col),
            QueenEvent::Backtrack { row, col } => format!("BACKTRACK_FROM_{}_{}", row, col),
            QueenEvent::SkipUnsafe { row, col, .. } => format!("SKIP_UNSAFE_{}_{}", row, col),
            QueenEvent::RowFail { row } => format!("ROW_{}_FAILED", row),
            QueenEvent::Success { .. } => "SUCCESS_ALL_QUEENS_PLACED".to_string(),
            QueenEvent::Exhausted { .. } => "NO_SOLUTION".to_string(),
        }
    }

    fn code_line(&self) -> u32 {
        match self {
            QueenEvent::Init { .. } | QueenEvent::Success { .. } => 2,
            QueenEvent::RowStart { .. } => 5,
            QueenEvent::CheckSafe { .. } | QueenEvent::SkipUnsafe { .. } => 7,
            QueenEvent::PlaceQueen { .. } => 9,
            QueenEvent::Backtrack { .. } => 14,
            QueenEvent::RowFail { .. } | QueenEvent::Exhausted { .. } => 17,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueenEvent::Success { .. } | QueenEvent::Exhausted { .. }
        )
    }
}
