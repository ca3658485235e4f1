//! Plain-text explanations of coin-change steps.
//!
//! Everything here is a pure function of a step's event and snapshot.

use super::{CoinEvent, CoinOutcome, CoinStep, DpTable};
use crate::glyphs::Glyphs;

/// Explain one step.
pub fn narrate(step: &CoinStep, glyphs: &Glyphs) -> String {
    let dp = &step.snapshot;
    let inf = glyphs.infinity;
    let mut lines: Vec<String> = Vec::new();
    let mut table = None;

    match &step.event {
        CoinEvent::Init { amount } => {
            lines.push("PHASE 1: INITIALIZATION".to_string());
            lines.push(format!("Allocate a DP array of size {}.", amount + 1));
            lines.push("Base case: dp[0] = 0, zero coins make amount 0.".to_string());
            lines.push(format!(
                "Every dp[i] for i in 1..={} starts as {} (unreachable) until a combination is found.",
                amount, inf
            ));
            table = Some(format_table(dp, None, glyphs));
        }
        CoinEvent::PhaseStart { coins } => {
            lines.push("PHASE 2: MAIN DP ARRAY FILLING".to_string());
            lines.push(format!("Outer loop: every amount i from 1 to {}.", dp.amount()));
            lines.push(format!("Inner loop: every coin in {}.", join(coins)));
            lines.push("Recurrence: dp[i] = min(dp[i], dp[i - coin] + 1)".to_string());
        }
        CoinEvent::OuterStart { i, current } => {
            lines.push(format!("OUTER LOOP: i = {} (computing dp[{}])", i, i));
            lines.push(format!("Goal: minimum coins to make amount {}.", i));
            lines.push(format!("Current dp[{}] = {}.", i, glyphs.cell(*current)));
        }
        CoinEvent::InnerStart {
            i,
            coin,
            coin_index,
        } => {
            lines.push(format!(
                "INNER LOOP (j = {}): checking coin {}",
                coin_index, coin
            ));
            lines.push(format!(
                "Condition: coins[{}] <= {} && dp[{} - coins[{}]] != {}",
                coin_index, i, i, coin_index, inf
            ));
            lines.push(format!(
                "First check: {} <= {} is {}.",
                coin,
                i,
                verdict(*coin as usize <= *i)
            ));
        }
        CoinEvent::SkipTooLarge { i, coin, .. } => {
            lines.push("CONDITION FAILED: coin value too large".to_string());
            lines.push(format!("{} <= {} is FALSE.", coin, i));
            lines.push(format!(
                "A coin of value {} cannot be used to make amount {}. dp[{}] stays {}.",
                coin,
                i,
                i,
                glyphs.cell(dp[*i])
            ));
        }
        CoinEvent::SkipUnreachable {
            i, coin, sub_index, ..
        } => {
            lines.push("CONDITION FAILED: subproblem unreachable".to_string());
            lines.push(format!(
                "{} <= {} is TRUE, but dp[{}] = {}.",
                coin, i, sub_index, inf
            ));
            lines.push(format!(
                "Using coin {} would leave amount {}, which no combination reaches. dp[{}] stays {}.",
                coin,
                sub_index,
                i,
                glyphs.cell(dp[*i])
            ));
        }
        CoinEvent::ConditionPassed {
            i,
            coin,
            sub_index,
            sub_value,
            candidate,
            current,
            ..
        } => {
            lines.push(format!("CONDITION PASSED: coin {} can be used", coin));
            lines.push(format!(
                "Remaining amount {} - {} = {}, dp[{}] = {}.",
                i, coin, sub_index, sub_index, sub_value
            ));
            lines.push(format!(
                "Candidate: dp[{}] + 1 = {}. Is {} < {}?",
                sub_index,
                candidate,
                candidate,
                glyphs.cell(*current)
            ));
        }
        CoinEvent::Update {
            i,
            coin,
            sub_index,
            old_value,
            new_value,
            ..
        } => {
            let old = glyphs.cell(*old_value);
            lines.push(format!("UPDATE: dp[{}] changed", i));
            lines.push(format!("{} < {} is TRUE.", new_value, old));
            lines.push(format!(
                "dp[{}] = min({}, dp[{}] + 1) = {}",
                i, old, sub_index, new_value
            ));
            lines.push(format!(
                "Amount {} can be made with {} coin(s): coin {} plus the best solution for {}.",
                i, new_value, coin, sub_index
            ));
            lines.push(format!("dp[{}]: {} -> {}", i, old, new_value));
        }
        CoinEvent::NoUpdate {
            i,
            coin,
            candidate,
            current,
            ..
        } => {
            lines.push("NO UPDATE: current value is already minimal".to_string());
            lines.push(format!("{} < {} is FALSE.", candidate, current));
            lines.push(format!(
                "Coin {} needs {} coin(s), dp[{}] = {} is already as good. dp[{}] stays {}.",
                coin, candidate, i, current, i, current
            ));
        }
        CoinEvent::InnerEnd { i, coin, .. } => {
            lines.push(format!("INNER LOOP iteration complete (coin {})", coin));
            table = Some(format_table(dp, Some(*i), glyphs));
        }
        CoinEvent::OuterEnd { i, final_value } => {
            lines.push(format!(
                "OUTER LOOP complete: dp[{}] = {}",
                i,
                glyphs.cell(*final_value)
            ));
            table = Some(format_table(dp, Some(*i), glyphs));
        }
        CoinEvent::FinalResult { amount, result } => {
            lines.push("PHASE 3: FINAL RESULT".to_string());
            lines.push(match result {
                CoinOutcome::MinCoins(n) => {
                    format!("dp[{}] = {}: minimum coins needed is {}.", amount, n, n)
                }
                CoinOutcome::Impossible => format!(
                    "dp[{}] = {}: the amount cannot be made, returning -1.",
                    amount, inf
                ),
            });
            table = Some(format_table(dp, None, glyphs));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    if let Some(table) = table {
        out.push_str(&table);
    }
    out
}

/// Render the table one cell per line, marking `highlight` if given.
pub fn format_table(dp: &DpTable, highlight: Option<usize>, glyphs: &Glyphs) -> String {
    dp.cells()
        .iter()
        .enumerate()
        .map(|(idx, &cell)| {
            let marker = if highlight == Some(idx) { "  <- current" } else { "" };
            format!("  dp[{}] = {}{}\n", idx, glyphs.cell(cell), marker)
        })
        .collect()
}

fn join(coins: &[u32]) -> String {
    coins
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn verdict(ok: bool) -> &'static str {
    if ok { "TRUE" } else { "FALSE" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::generate;
    use crate::input::CoinProblem;

    #[test]
    fn test_every_step_has_text() {
        let trace = generate(&CoinProblem::new([2, 5], 7).unwrap()).unwrap();
        for step in &trace {
            let text = narrate(step, &Glyphs::UNICODE);
            assert!(!text.trim().is_empty(), "empty narrative at {}", step.sequence);
        }
    }

    #[test]
    fn test_update_narrative_mentions_values() {
        let trace = generate(&CoinProblem::new([1], 1).unwrap()).unwrap();
        let update = trace.steps_of_kind("update").next().unwrap();
        let text = narrate(update, &Glyphs::UNICODE);
        assert!(text.contains("dp[1]: ∞ -> 1"), "{}", text);

        let text = narrate(update, &Glyphs::ASCII);
        assert!(text.contains("dp[1]: inf -> 1"), "{}", text);
    }

    #[test]
    fn test_format_table_highlight() {
        let dp = DpTable::new(2);
        let text = format_table(&dp, Some(1), &Glyphs::UNICODE);
        assert_eq!(
            text,
            "  dp[0] = 0\n  dp[1] = ∞  <- current\n  dp[2] = ∞\n"
        );
    }
}
