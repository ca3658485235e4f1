//! Attack checks for a candidate square.
//!
//! Rows are filled top to bottom, so only the squares above `row` can hold a
//! queen. Each line is scanned upward from the row directly above and the
//! nearest queen is reported.

use super::{Board, CheckResult, SafetyReport};

/// Check the column and both upper diagonals of `(row, col)`.
pub fn check_safety(board: &Board, row: usize, col: usize) -> SafetyReport {
    let column = scan(board, (0..row).rev().map(|r| (r, col)));
    let left_diagonal = scan(board, (0..row).rev().zip((0..col).rev()));
    let right_diagonal = scan(board, (0..row).rev().zip(col + 1..board.size()));

    SafetyReport {
        column,
        left_diagonal,
        right_diagonal,
    }
}

/// Whether no placed queen attacks `(row, col)`.
pub fn is_safe(board: &Board, row: usize, col: usize) -> bool {
    check_safety(board, row, col).is_safe()
}

fn scan(board: &Board, squares: impl Iterator<Item = (usize, usize)>) -> CheckResult {
    for (row, col) in squares {
        if board.has_queen(row, col) {
            return CheckResult::Attacked { row, col };
        }
    }
    CheckResult::Clear
}
