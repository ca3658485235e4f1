//! Plain-text explanations of N-Queens steps.

use super::{Board, CheckResult, QueenEvent, QueenStep, SafetyReport};
use crate::glyphs::Glyphs;

/// Explain one step.
pub fn narrate(step: &QueenStep, glyphs: &Glyphs) -> String {
    let board = &step.snapshot;
    let size = board.size();
    let mut lines: Vec<String> = Vec::new();
    let mut drawn = None;

    match &step.event {
        QueenEvent::Init { size } => {
            lines.push("PHASE 1: INITIALIZATION".to_string());
            lines.push(format!("Create an empty {}x{} chessboard.", size, size));
            lines.push(format!(
                "Goal: place {} queens so no two attack each other, one queen per row.",
                size
            ));
            lines.push("Start at row 0 and try each column; on a dead end, backtrack.".to_string());
        }
        QueenEvent::RowStart { row, queens_placed } => {
            lines.push(format!("ROW {}: starting column loop", row));
            lines.push(format!(
                "Queens placed so far: {}, remaining: {}.",
                queens_placed,
                size - queens_placed
            ));
            lines.push(format!(
                "Try columns 0 to {}; a safe square recurses into row {}.",
                size.saturating_sub(1),
                row + 1
            ));
        }
        QueenEvent::CheckSafe {
            row,
            col,
            safe,
            checks,
        } => {
            lines.push(format!("Checking position ({}, {}): isSafe?", row, col));
            lines.extend(describe_checks(*col, checks));
            let verdict = if *safe { "SAFE" } else { "NOT SAFE" };
            lines.push(format!("Position ({}, {}) is {}.", row, col, verdict));
            drawn = Some(format_board(board, Some((*row, *col)), glyphs));
        }
        QueenEvent::PlaceQueen { row, col } => {
            lines.push(format!("SAFE: placing queen at ({}, {})", row, col));
            lines.push(format!("board[{}][{}] = 1", row, col));
            lines.push(format!("Next: solveNQueen({}).", row + 1));
            drawn = Some(format_board(board, None, glyphs));
        }
        QueenEvent::Backtrack { row, col } => {
            lines.push(format!("BACKTRACK: removing queen from ({}, {})", row, col));
            lines.push(format!(
                "No placement for row {} worked with this queen.",
                row + 1
            ));
            lines.push(format!("board[{}][{}] = 0", row, col));
            lines.push(next_column(*row, *col, size));
            drawn = Some(format_board(board, None, glyphs));
        }
        QueenEvent::SkipUnsafe { row, col, checks } => {
            lines.push(format!("UNSAFE: cannot place queen at ({}, {})", row, col));
            lines.extend(describe_checks(*col, checks));
            lines.push(next_column(*row, *col, size));
        }
        QueenEvent::RowFail { row } => {
            lines.push(format!("ROW {} FAILED: no safe column", row));
            if *row == 0 {
                lines.push("Every column of the first row has been tried.".to_string());
            } else {
                lines.push(format!(
                    "Return false; row {} will backtrack and try its next column.",
                    row - 1
                ));
            }
        }
        QueenEvent::Success { size, queens } => {
            let placed = queens
                .iter()
                .enumerate()
                .map(|(r, c)| format!("({}, {})", r, c))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("SUCCESS: all {} queens placed", size));
            lines.push(format!("Base case reached: row == N ({} == {}).", size, size));
            lines.push(format!("Queens: {}", placed));
            lines.push("No two queens share a row, column or diagonal.".to_string());
            drawn = Some(format_board(board, None, glyphs));
        }
        QueenEvent::Exhausted { size } => {
            lines.push(format!("NO SOLUTION: no placement exists for N = {}", size));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    if let Some(drawn) = drawn {
        out.push_str(&drawn);
    }
    out
}

/// Render the board, marking `probe` with the probe glyph if it is empty.
pub fn format_board(board: &Board, probe: Option<(usize, usize)>, glyphs: &Glyphs) -> String {
    board
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let cells = row
                .iter()
                .enumerate()
                .map(|(c, &queen)| {
                    if queen {
                        glyphs.queen
                    } else if probe == Some((r, c)) {
                        glyphs.probe
                    } else {
                        glyphs.empty
                    }
                })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ");
            format!("  {}\n", cells)
        })
        .collect()
}

/// One line per safety check, numbered.
fn describe_checks(col: usize, checks: &SafetyReport) -> Vec<String> {
    let lines = [
        ("Column", format!("column {}", col), checks.column),
        ("Left diagonal", "the left diagonal".to_string(), checks.left_diagonal),
        ("Right diagonal", "the right diagonal".to_string(), checks.right_diagonal),
    ];
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, (label, what, result))| match result {
            CheckResult::Clear => {
                format!("  {}. {} check: no queen on {}. YES", idx + 1, label, what)
            }
            CheckResult::Attacked { row, col } => format!(
                "  {}. {} check: queen at ({}, {}) on {}. NO",
                idx + 1,
                label,
                row,
                col,
                what
            ),
        })
        .collect()
}

fn next_column(row: usize, col: usize, size: usize) -> String {
    if col + 1 < size {
        format!("Next: check position ({}, {}).", row, col + 1)
    } else {
        format!("No more columns in row {}.", row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queens::generator::search;

    #[test]
    fn test_every_step_has_text() {
        for size in [3, 4] {
            let trace = search(size).unwrap();
            for step in &trace {
                let text = narrate(step, &Glyphs::ASCII);
                assert!(!text.trim().is_empty(), "empty narrative at {}", step.sequence);
            }
        }
    }

    #[test]
    fn test_format_board() {
        let mut board = Board::new(4);
        board.place(0, 1);
        assert_eq!(
            format_board(&board, Some((1, 3)), &Glyphs::ASCII),
            "  . Q . .\n  . . . ?\n  . . . .\n  . . . .\n"
        );
    }

    #[test]
    fn test_skip_names_attacker() {
        let trace = search(4).unwrap();
        let skip = trace.steps_of_kind("skip_unsafe").next().unwrap();
        // first skip: (1,0) attacked along column 0 by the queen at (0,0)
        let text = narrate(skip, &Glyphs::ASCII);
        assert!(text.contains("queen at (0, 0) on column 0"), "{}", text);
    }
}
