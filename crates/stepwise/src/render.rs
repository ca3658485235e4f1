//! Plain-text renderer for both visualizers.

use std::io::Write;

use stepwise_algo::coins::{self, CoinResult};
use stepwise_algo::queens::{self, QueensResult};
use stepwise_algo::{Board, CoinEvent, DpTable, Glyphs, QueenEvent};
use stepwise_trace::{Renderer, Step, StepEvent, Trace};

/// Writes each step as a header, the highlighted pseudocode line and a
/// narrative.
pub struct TextRenderer<W> {
    out: W,
    glyphs: Glyphs,
    broken: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, glyphs: Glyphs) -> Self {
        Self {
            out,
            glyphs,
            broken: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn header<E: StepEvent, S>(
        &mut self,
        step: &Step<E, S>,
        position: usize,
        total: usize,
        pseudocode: &[&str],
    ) {
        let phase = step.phase.replace('_', " ");
        let mut text = format!("=== Step {}/{} [{}] ===\n", position, total, phase);
        if let Some(code) = pseudocode.get((step.code_line as usize).saturating_sub(1)) {
            text.push_str(&format!("line {:>2} | {}\n", step.code_line, code.trim()));
        }
        self.emit(&text);
    }

    fn body(&mut self, text: &str) {
        self.emit(&format!("{}\n\n", text.trim_end()));
    }

    /// Write and flush. A closed stdout is logged once and further output dropped.
    fn emit(&mut self, text: &str) {
        if self.broken {
            return;
        }
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write step output: {}", e);
            self.broken = true;
        }
    }
}

impl<W: Write> Renderer<CoinEvent, DpTable> for TextRenderer<W> {
    fn render(&mut self, step: &Step<CoinEvent, DpTable>, position: usize, total: usize) {
        self.header(step, position, total, coins::PSEUDOCODE);
        let text = coins::narrate(step, &self.glyphs);
        self.body(&text);
    }

    fn finished(&mut self, trace: &Trace<CoinEvent, DpTable>) {
        let text = match coin_result(trace) {
            Some(CoinResult::Solved {
                min_coins,
                combination,
            }) => {
                let parts: Vec<String> = combination.iter().map(u32::to_string).collect();
                format!(
                    "RESULT: minimum coins = {}\nExample combination: {}",
                    min_coins,
                    parts.join(" + ")
                )
            }
            Some(CoinResult::Impossible) => {
                "RESULT: impossible, no combination of coins makes the amount (-1)".to_string()
            }
            None => "RESULT: unavailable".to_string(),
        };
        self.body(&text);
    }

    fn cleared(&mut self) {
        self.body("Trace cleared.");
    }
}

impl<W: Write> Renderer<QueenEvent, Board> for TextRenderer<W> {
    fn render(&mut self, step: &Step<QueenEvent, Board>, position: usize, total: usize) {
        self.header(step, position, total, queens::PSEUDOCODE);
        let text = queens::narrate(step, &self.glyphs);
        self.body(&text);
    }

    fn finished(&mut self, trace: &Trace<QueenEvent, Board>) {
        let text = match QueensResult::from_trace(trace) {
            Ok(QueensResult::Solved { board, .. }) => format!(
                "RESULT: solution found, all {} queens placed\n{}",
                board.size(),
                queens::format_board(&board, None, &self.glyphs)
            ),
            Ok(QueensResult::Unsolved) => {
                let size = trace.last().map(|s| s.snapshot.size()).unwrap_or_default();
                format!("RESULT: no solution exists for N = {}", size)
            }
            Err(e) => format!("RESULT: unavailable ({})", e),
        };
        self.body(&text);
    }

    fn cleared(&mut self) {
        self.body("Trace cleared.");
    }
}

/// Result of a coin trace, using the coin list recorded in its `PhaseStart` step.
fn coin_result(trace: &Trace<CoinEvent, DpTable>) -> Option<CoinResult> {
    let coins = trace.iter().find_map(|step| match &step.event {
        CoinEvent::PhaseStart { coins } => Some(coins.clone()),
        _ => None,
    })?;
    CoinResult::from_trace(trace, &coins).ok()
}
