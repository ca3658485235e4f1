//! Answer extraction from a finished N-Queens trace.

use serde::Serialize;
use stepwise_trace::TraceError;

use super::safety::is_safe;
use super::{Board, QueenEvent, QueenTrace};
use crate::error::Result;

/// Final answer of an N-Queens run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueensResult {
    Solved { board: Board, queens: Vec<usize> },
    Unsolved,
}

impl QueensResult {
    /// Build the result from the terminal step of a trace.
    pub fn from_trace(trace: &QueenTrace) -> Result<Self> {
        let last = trace.last().ok_or(TraceError::Empty)?;
        match &last.event {
            QueenEvent::Success { queens, .. } => Ok(QueensResult::Solved {
                board: last.snapshot.clone(),
                queens: queens.clone(),
            }),
            QueenEvent::Exhausted { .. } => Ok(QueensResult::Unsolved),
            _ => Err(TraceError::MissingTerminal { len: trace.len() }.into()),
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, QueensResult::Solved { .. })
    }
}

/// Whether `board` holds exactly one queen per row and no two queens attack
/// each other.
pub fn is_valid_solution(board: &Board) -> bool {
    let size = board.size();
    if board.rows().iter().any(|row| row.len() != size) {
        return false;
    }

    let mut check = Board::new(size);
    for (row, cells) in board.rows().iter().enumerate() {
        let mut queens = cells.iter().enumerate().filter(|(_, q)| **q);
        let (Some((col, _)), None) = (queens.next(), queens.next()) else {
            return false;
        };
        if !is_safe(&check, row, col) {
            return false;
        }
        check.place(row, col);
    }
    true
}
