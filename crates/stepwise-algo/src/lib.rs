//! stepwise-algo: trace generators for the stepwise visualizers
//!
//! This crate provides the algorithm half of each visualizer:
//! - Coin-change minimum-coins DP with a full step trace and combination reconstruction
//! - N-Queens backtracking search with per-square safety breakdowns
//! - Input validation shared by the CLI and any other front end
//! - Plain-text narratives and pseudocode listings for renderers

pub mod coins;
pub mod error;
pub mod glyphs;
pub mod input;
pub mod queens;

pub use coins::{CoinEvent, CoinOutcome, CoinResult, CoinStep, CoinTrace, DpCell, DpTable};
pub use error::{AlgoError, Result};
pub use glyphs::Glyphs;
pub use input::{AMOUNT_RANGE, BOARD_SIZE_RANGE, CoinProblem, QueensProblem};
pub use queens::{
    Board, CheckResult, QueenEvent, QueenStep, QueenTrace, QueensResult, SafetyReport,
    SearchOutcome,
};
