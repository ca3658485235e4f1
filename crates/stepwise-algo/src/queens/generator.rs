//! N-Queens trace generator.

use stepwise_trace::TraceRecorder;

use super::safety::check_safety;
use super::{Board, NAME, QueenEvent, QueenTrace};
use crate::error::Result;
use crate::input::QueensProblem;

/// Result of a recursive search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Success,
    Failure,
}

/// Run the backtracking search and record every decision point.
///
/// The search stops at the first complete placement. If the whole search space
/// is exhausted the trace ends with [`QueenEvent::Exhausted`].
pub fn generate(problem: &QueensProblem) -> Result<QueenTrace> {
    search(problem.size())
}

/// Generate a trace for any board size, including ones without a solution.
pub(crate) fn search(size: usize) -> Result<QueenTrace> {
    tracing::debug!(size, "generating n-queens trace");

    let mut recorder = TraceRecorder::new(NAME);
    recorder.add_input("size", size);

    let board = Board::new(size);
    recorder.record(QueenEvent::Init { size }, &board);

    let mut state = Search {
        size,
        board,
        recorder,
    };
    let outcome = state.solve(0);
    tracing::debug!(?outcome, steps = state.recorder.len(), "search finished");

    let Search {
        board,
        mut recorder,
        ..
    } = state;
    if outcome == SearchOutcome::Failure {
        recorder.record(QueenEvent::Exhausted { size }, &board);
    }

    Ok(recorder.finish()?)
}

/// Live state of one generation run.
struct Search {
    size: usize,
    board: Board,
    recorder: TraceRecorder<QueenEvent, Board>,
}

impl Search {
    fn emit(&mut self, event: QueenEvent) {
        self.recorder.record(event, &self.board);
    }

    fn solve(&mut self, row: usize) -> SearchOutcome {
        if row == self.size {
            let queens = self.board.queen_columns();
            self.emit(QueenEvent::Success {
                size: self.size,
                queens,
            });
            return SearchOutcome::Success;
        }

        self.emit(QueenEvent::RowStart {
            row,
            queens_placed: row,
        });

        for col in 0..self.size {
            let checks = check_safety(&self.board, row, col);
            let safe = checks.is_safe();
            self.emit(QueenEvent::CheckSafe {
                row,
                col,
                safe,
                checks,
            });

            if !safe {
                self.emit(QueenEvent::SkipUnsafe { row, col, checks });
                continue;
            }

            self.board.place(row, col);
            self.emit(QueenEvent::PlaceQueen { row, col });

            if self.solve(row + 1) == SearchOutcome::Success {
                return SearchOutcome::Success;
            }

            self.board.remove(row, col);
            self.emit(QueenEvent::Backtrack { row, col });
        }

        self.emit(QueenEvent::RowFail { row });
        SearchOutcome::Failure
    }
}
