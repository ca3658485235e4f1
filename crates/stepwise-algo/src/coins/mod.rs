//! Coin-change minimum-coins visualizer.
//!
//! The generator runs the classic unbounded coin-change DP once and records a
//! [`CoinEvent`] after every loop entry, condition check and table mutation.
//! Each step carries a full copy of the [`DpTable`].

mod generator;
mod narrative;
mod result;


pub use generator::generate;
pub use narrative::{format_table, narrate};
pub use result::{CoinResult, find_combination};

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Step, StepEvent, Trace};

/// Algorithm name stored in coin-change traces.
pub const NAME: &str = "coin_change";

/// Pseudocode listing referenced by [`StepEvent::code_line`].
pub const PSEUDOCODE: &[&str] = &[
    "int coinChange(int coins[], int n, int amount) {",
    "    // dp[i] = minimum coins needed to make amount i",
    "    int dp[amount + 1];",
    "",
    "    // base case, every other amount starts unreachable",
    "    dp[0] = 0; for (int i = 1; i <= amount; i++) dp[i] = INT_MAX;",
    "",
    "    sort(coins, coins + n);",
    "",
    "    // fill the table bottom-up",
    "    for (int i = 1; i <= amount; i++) {",
    "        for (int j = 0; j < n; j++) {",
    "            if (coins[j] <= i && dp[i - coins[j]] != INT_MAX) {",
    "                int candidate = dp[i - coins[j]] + 1;",
    "                if (candidate < dp[i])",
    "                    dp[i] = candidate;",
    "            }",
    "        }",
    "    }",
    "",
    "    // still INT_MAX means no combination exists",
    "    if (dp[amount] == INT_MAX)",
    "        return -1;",
    "",
    "    return dp[amount];",
    "}",
];

/// Trace of one coin-change run.
pub type CoinTrace = Trace<CoinEvent, DpTable>;

/// Step of a coin-change trace.
pub type CoinStep = Step<CoinEvent, DpTable>;

/// One cell of the DP table.
///
/// Serialized as a number, or `null` when unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DpCell {
    Reachable(u32),
    Unreachable,
}

impl DpCell {
    pub fn value(self) -> Option<u32> {
        match self {
            DpCell::Reachable(v) => Some(v),
            DpCell::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, DpCell::Reachable(_))
    }
}

impl From<Option<u32>> for DpCell {
    fn from(value: Option<u32>) -> Self {
        value.map_or(DpCell::Unreachable, DpCell::Reachable)
    }
}

impl From<DpCell> for Option<u32> {
    fn from(cell: DpCell) -> Self {
        cell.value()
    }
}

impl fmt::Display for DpCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DpCell::Reachable(v) => write!(f, "{}", v),
            DpCell::Unreachable => write!(f, "∞"),
        }
    }
}

/// The DP array `dp[0..=amount]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DpTable(Vec<DpCell>);

impl DpTable {
    /// Fresh table: `dp[0] = 0`, everything else unreachable.
    pub fn new(amount: usize) -> Self {
        let mut cells = vec![DpCell::Unreachable; amount + 1];
        cells[0] = DpCell::Reachable(0);
        Self(cells)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DpCell> {
        self.0.get(index).copied()
    }

    pub fn cells(&self) -> &[DpCell] {
        &self.0
    }

    /// Highest index in the table.
    pub fn amount(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub(crate) fn set(&mut self, index: usize, value: u32) {
        self.0[index] = DpCell::Reachable(value);
    }
}

impl Index<usize> for DpTable {
    type Output = DpCell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<DpCell>> for DpTable {
    fn from(cells: Vec<DpCell>) -> Self {
        Self(cells)
    }
}

/// Answer carried by the final step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinOutcome {
    MinCoins(u32),
    Impossible,
}

impl CoinOutcome {
    /// The classic return value: the coin count, or -1 when impossible.
    pub fn as_i64(self) -> i64 {
        match self {
            CoinOutcome::MinCoins(n) => i64::from(n),
            CoinOutcome::Impossible => -1,
        }
    }
}

/// Coin-change step kinds and their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoinEvent {
    /// Table allocated and initialised.
    Init { amount: usize },
    /// Main filling phase begins.
    PhaseStart { coins: Vec<u32> },
    /// Outer loop enters amount `i`.
    OuterStart { i: usize, current: DpCell },
    /// Inner loop picks up a coin.
    InnerStart {
        i: usize,
        coin: u32,
        coin_index: usize,
    },
    /// `coin > i`.
    SkipTooLarge {
        i: usize,
        coin: u32,
        coin_index: usize,
    },
    /// `dp[i - coin]` is unreachable.
    SkipUnreachable {
        i: usize,
        coin: u32,
        coin_index: usize,
        sub_index: usize,
    },
    /// Both conditions hold; the candidate is about to be compared.
    ConditionPassed {
        i: usize,
        coin: u32,
        coin_index: usize,
        sub_index: usize,
        sub_value: u32,
        candidate: u32,
        current: DpCell,
    },
    /// `candidate < dp[i]`, so `dp[i]` was overwritten.
    Update {
        i: usize,
        coin: u32,
        coin_index: usize,
        sub_index: usize,
        old_value: DpCell,
        new_value: u32,
    },
    /// `candidate >= dp[i]`; the table is unchanged.
    NoUpdate {
        i: usize,
        coin: u32,
        coin_index: usize,
        sub_index: usize,
        candidate: u32,
        current: u32,
    },
    /// Done with a coin that reached the comparison.
    InnerEnd {
        i: usize,
        coin: u32,
        coin_index: usize,
    },
    /// Done with amount `i`.
    OuterEnd { i: usize, final_value: DpCell },
    /// Terminal step.
    FinalResult { amount: usize, result: CoinOutcome },
}

impl StepEvent for CoinEvent {
    fn kind(&self) -> &'static str {
        match self {
            CoinEvent::Init { .. } => "init",
            CoinEvent::PhaseStart { .. } => "phase_start",
            CoinEvent::OuterStart { .. } => "outer_start",
            CoinEvent::InnerStart { .. } => "inner_start",
            CoinEvent::SkipTooLarge { .. } => "skip_too_large",
            CoinEvent::SkipUnreachable { .. } => "skip_unreachable",
            CoinEvent::ConditionPassed { .. } => "condition_passed",
            CoinEvent::Update { .. } => "update",
            CoinEvent::NoUpdate { .. } => "no_update",
            CoinEvent::InnerEnd { .. } => "inner_end",
            CoinEvent::OuterEnd { .. } => "outer_end",
            CoinEvent::FinalResult { .. } => "final_result",
        }
    }

    fn phase(&self) -> String {
        match self {
            CoinEvent::Init { .. } => "INITIALIZATION".to_string(),
            CoinEvent::PhaseStart { .. } => "MAIN_DP_FILL".to_string(),
            CoinEvent::OuterStart { i, .. } => format!("OUTER_LOOP_i={}", i),
            CoinEvent::InnerStart { i, coin, .. } => format!("INNER_LOOP_i={}_coin={}", i, coin),
            CoinEvent::SkipTooLarge { coin, .. } => format!("SKIP_coin={}_too_large", coin),
            CoinEvent::SkipUnreachable { sub_index, .. } => {
                format!("SKIP_subproblem_dp[{}]_unreachable", sub_index)
            }
            CoinEvent::ConditionPassed { coin, .. } => format!("CONDITION_passed_coin={}", coin),
            CoinEvent::Update {
                i, coin, new_value, ..
            } => format!("UPDATE_dp[{}]={}_using_coin={}", i, new_value, coin),
            CoinEvent::NoUpdate {
                i, coin, current, ..
            } => format!("NO_UPDATE_dp[{}]_stays_{}_coin={}", i, current, coin),
            CoinEvent::InnerEnd { coin, .. } => format!("INNER_LOOP_END_coin={}", coin),
            CoinEvent::OuterEnd { i, final_value } => match final_value.value() {
                Some(v) => format!("OUTER_LOOP_END_dp[{}]={}", i, v),
                None => format!("OUTER_LOOP_END_dp[{}]_unreachable", i),
            },
            CoinEvent::FinalResult { .. } => "FINAL_RESULT".to_string(),
        }
    }

    fn code_line(&self) -> u32 {
        match self {
            CoinEvent::Init { .. } => 6,
            CoinEvent::PhaseStart { .. } | CoinEvent::OuterStart { .. } => 11,
            CoinEvent::OuterEnd { .. } => 11,
            CoinEvent::InnerEnd { .. } => 12,
            CoinEvent::InnerStart { .. }
            | CoinEvent::SkipTooLarge { .. }
            | CoinEvent::SkipUnreachable { .. } => 13,
            CoinEvent::ConditionPassed { .. } => 14,
            CoinEvent::NoUpdate { .. } => 15,
            CoinEvent::Update { .. } => 16,
            CoinEvent::FinalResult {
                result: CoinOutcome::Impossible,
                ..
            } => 23,
            CoinEvent::FinalResult { .. } => 25,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, CoinEvent::FinalResult { .. })
    }
}
