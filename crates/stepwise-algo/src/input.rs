//! Input validation for both visualizers.
//!
//! Problems can only be constructed through these validating constructors, so
//! a generator never sees out-of-range input.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{AlgoError, Result};

/// Accepted coin-change target amounts.
pub const AMOUNT_RANGE: RangeInclusive<usize> = 1..=20;

/// Accepted N-Queens board sizes.
pub const BOARD_SIZE_RANGE: RangeInclusive<usize> = 4..=8;

/// A validated coin-change problem.
///
/// Coins are sorted ascending and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinProblem {
    coins: Vec<u32>,
    amount: usize,
}

impl CoinProblem {
    pub fn new(coins: impl IntoIterator<Item = u32>, amount: usize) -> Result<Self> {
        let mut coins: Vec<u32> = coins.into_iter().collect();
        if coins.is_empty() {
            return Err(AlgoError::invalid("coins", "at least one coin is required"));
        }
        if coins.contains(&0) {
            return Err(AlgoError::invalid("coins", "coin values must be positive"));
        }
        if !AMOUNT_RANGE.contains(&amount) {
            return Err(AlgoError::invalid(
                "amount",
                format!(
                    "must be between {} and {}, got {}",
                    AMOUNT_RANGE.start(),
                    AMOUNT_RANGE.end(),
                    amount
                ),
            ));
        }
        coins.sort_unstable();
        coins.dedup();
        Ok(Self { coins, amount })
    }

    /// Parse the raw text fields of the coin-change form.
    pub fn parse(coins: &str, amount: &str) -> Result<Self> {
        Self::new(parse_coins(coins)?, parse_amount(amount)?)
    }

    /// Sorted, distinct coin denominations.
    pub fn coins(&self) -> &[u32] {
        &self.coins
    }

    pub fn amount(&self) -> usize {
        self.amount
    }
}

/// A validated N-Queens problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueensProblem {
    size: usize,
}

impl QueensProblem {
    pub fn new(size: usize) -> Result<Self> {
        if !BOARD_SIZE_RANGE.contains(&size) {
            return Err(AlgoError::invalid(
                "size",
                format!(
                    "must be between {} and {}, got {}",
                    BOARD_SIZE_RANGE.start(),
                    BOARD_SIZE_RANGE.end(),
                    size
                ),
            ));
        }
        Ok(Self { size })
    }

    pub fn parse(size: &str) -> Result<Self> {
        let size = size
            .trim()
            .parse::<usize>()
            .map_err(|_| AlgoError::invalid("size", format!("'{}' is not a number", size.trim())))?;
        Self::new(size)
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Parse a comma-separated list of positive integers.
///
/// Blank entries (e.g. a trailing comma) are skipped; any other entry that is
/// not a positive integer rejects the whole list. The result is sorted and
/// deduplicated.
pub fn parse_coins(input: &str) -> Result<Vec<u32>> {
    let mut coins = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let coin = part
            .parse::<u32>()
            .map_err(|_| AlgoError::invalid("coins", format!("'{}' is not a positive integer", part)))?;
        if coin == 0 {
            return Err(AlgoError::invalid("coins", "coin values must be positive"));
        }
        coins.push(coin);
    }
    if coins.is_empty() {
        return Err(AlgoError::invalid("coins", "at least one coin is required"));
    }
    coins.sort_unstable();
    coins.dedup();
    Ok(coins)
}

/// Parse a target amount.
pub fn parse_amount(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| AlgoError::invalid("amount", format!("'{}' is not a number", input.trim())))
}
