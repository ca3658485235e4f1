//! Coin-change trace generator.

use stepwise_trace::TraceRecorder;

use super::{CoinEvent, CoinOutcome, CoinTrace, DpCell, DpTable, NAME};
use crate::error::Result;
use crate::input::CoinProblem;

/// Run the minimum-coins DP and record every decision point.
///
/// Coins are tried in ascending order and `dp[i]` is only overwritten by a
/// strictly smaller candidate, so among equal-cost combinations the first one
/// found is kept.
pub fn generate(problem: &CoinProblem) -> Result<CoinTrace> {
    let coins = problem.coins();
    let amount = problem.amount();
    tracing::debug!(?coins, amount, "generating coin-change trace");

    let mut recorder = TraceRecorder::new(NAME);
    recorder.add_input("coins", coins);
    recorder.add_input("amount", amount);

    let mut dp = DpTable::new(amount);
    recorder.record(CoinEvent::Init { amount }, &dp);
    recorder.record(
        CoinEvent::PhaseStart {
            coins: coins.to_vec(),
        },
        &dp,
    );

    for i in 1..=amount {
        recorder.record(CoinEvent::OuterStart { i, current: dp[i] }, &dp);

        for (coin_index, &coin) in coins.iter().enumerate() {
            recorder.record(
                CoinEvent::InnerStart {
                    i,
                    coin,
                    coin_index,
                },
                &dp,
            );

            let Some(sub_index) = i.checked_sub(coin as usize) else {
                recorder.record(
                    CoinEvent::SkipTooLarge {
                        i,
                        coin,
                        coin_index,
                    },
                    &dp,
                );
                continue;
            };

            let DpCell::Reachable(sub_value) = dp[sub_index] else {
                recorder.record(
                    CoinEvent::SkipUnreachable {
                        i,
                        coin,
                        coin_index,
                        sub_index,
                    },
                    &dp,
                );
                continue;
            };

            let candidate = sub_value + 1;
            let current = dp[i];
            recorder.record(
                CoinEvent::ConditionPassed {
                    i,
                    coin,
                    coin_index,
                    sub_index,
                    sub_value,
                    candidate,
                    current,
                },
                &dp,
            );

            match current {
                DpCell::Reachable(existing) if candidate >= existing => {
                    recorder.record(
                        CoinEvent::NoUpdate {
                            i,
                            coin,
                            coin_index,
                            sub_index,
                            candidate,
                            current: existing,
                        },
                        &dp,
                    );
                }
                _ => {
                    dp.set(i, candidate);
                    recorder.record(
                        CoinEvent::Update {
                            i,
                            coin,
                            coin_index,
                            sub_index,
                            old_value: current,
                            new_value: candidate,
                        },
                        &dp,
                    );
                }
            }

            recorder.record(
                CoinEvent::InnerEnd {
                    i,
                    coin,
                    coin_index,
                },
                &dp,
            );
        }

        recorder.record(
            CoinEvent::OuterEnd {
                i,
                final_value: dp[i],
            },
            &dp,
        );
    }

    let result = match dp[amount] {
        DpCell::Reachable(n) => CoinOutcome::MinCoins(n),
        DpCell::Unreachable => CoinOutcome::Impossible,
    };
    recorder.record(CoinEvent::FinalResult { amount, result }, &dp);

    Ok(recorder.finish()?)
}
