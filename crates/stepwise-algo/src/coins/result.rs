//! Answer extraction from a finished coin-change trace.

use serde::Serialize;
use stepwise_trace::TraceError;

use super::{CoinEvent, CoinOutcome, CoinTrace, DpCell, DpTable};
use crate::error::{AlgoError, Result};

/// Final answer of a coin-change run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoinResult {
    /// The amount is reachable; `combination` is one minimal multiset of coins.
    Solved {
        min_coins: u32,
        combination: Vec<u32>,
    },
    Impossible,
}

impl CoinResult {
    /// Build the result from the terminal step of a trace.
    ///
    /// `coins` must be the sorted coin list the trace was generated from.
    pub fn from_trace(trace: &CoinTrace, coins: &[u32]) -> Result<Self> {
        let last = trace.last().ok_or(TraceError::Empty)?;
        let CoinEvent::FinalResult { amount, result } = &last.event else {
            return Err(TraceError::MissingTerminal { len: trace.len() }.into());
        };

        match result {
            CoinOutcome::Impossible => Ok(CoinResult::Impossible),
            CoinOutcome::MinCoins(min_coins) => Ok(CoinResult::Solved {
                min_coins: *min_coins,
                combination: find_combination(&last.snapshot, coins, *amount)?,
            }),
        }
    }

    pub fn outcome(&self) -> CoinOutcome {
        match self {
            CoinResult::Solved { min_coins, .. } => CoinOutcome::MinCoins(*min_coins),
            CoinResult::Impossible => CoinOutcome::Impossible,
        }
    }
}

/// Reconstruct one minimal combination of coins summing to `amount`.
///
/// Walks down from `amount`, each time taking the first coin (in ascending
/// order) whose sub-amount is exactly one coin cheaper. Fails when `amount` is
/// unreachable instead of looping forever.
pub fn find_combination(dp: &DpTable, coins: &[u32], amount: usize) -> Result<Vec<u32>> {
    let mut combination = Vec::new();
    let mut remaining = amount;

    while remaining > 0 {
        let Some(DpCell::Reachable(needed)) = dp.get(remaining) else {
            return Err(AlgoError::Unreachable { amount });
        };

        let next = coins.iter().copied().find(|&coin| {
            (coin as usize) <= remaining
                && dp[remaining - coin as usize].value().map(|v| v + 1) == Some(needed)
        });
        let Some(coin) = next else {
            return Err(AlgoError::Unreachable { amount });
        };

        combination.push(coin);
        remaining -= coin as usize;
    }

    Ok(combination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::generate;
    use crate::input::CoinProblem;

    fn table(values: &[Option<u32>]) -> DpTable {
        DpTable::from(values.iter().map(|&v| DpCell::from(v)).collect::<Vec<_>>())
    }

    #[test]
    fn test_find_combination_prefers_smallest_coin_first() {
        // coins [1,3,4], amount 6
        let dp = table(&[Some(0), Some(1), Some(2), Some(1), Some(1), Some(2), Some(2)]);
        assert_eq!(find_combination(&dp, &[1, 3, 4], 6).unwrap(), vec![3, 3]);
        assert_eq!(find_combination(&dp, &[1, 3, 4], 5).unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_find_combination_unreachable() {
        let dp = table(&[Some(0), None, Some(1), None]);
        assert_eq!(
            find_combination(&dp, &[2], 3).unwrap_err(),
            AlgoError::Unreachable { amount: 3 }
        );
    }

    #[test]
    fn test_find_combination_amount_zero() {
        let dp = DpTable::new(0);
        assert!(find_combination(&dp, &[1], 0).unwrap().is_empty());
    }

    #[test]
    fn test_result_from_trace() {
        let problem = CoinProblem::new([1, 3, 4], 6).unwrap();
        let trace = generate(&problem).unwrap();
        let result = CoinResult::from_trace(&trace, problem.coins()).unwrap();
        assert_eq!(
            result,
            CoinResult::Solved {
                min_coins: 2,
                combination: vec![3, 3],
            }
        );
        assert_eq!(result.outcome().as_i64(), 2);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "solved");
        assert_eq!(json["min_coins"], 2);
    }

    #[test]
    fn test_impossible_result_from_trace() {
        let problem = CoinProblem::new([2], 3).unwrap();
        let trace = generate(&problem).unwrap();
        let result = CoinResult::from_trace(&trace, problem.coins()).unwrap();
        assert_eq!(result, CoinResult::Impossible);
        assert_eq!(result.outcome().as_i64(), -1);
    }
}
