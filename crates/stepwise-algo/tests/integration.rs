//! Integration tests for stepwise-algo
//!
//! Tests the public API: input validation, generation and narratives.

use stepwise_algo::coins::{self, CoinResult};
use stepwise_algo::queens::{self, QueensResult};
use stepwise_algo::{
    AMOUNT_RANGE, AlgoError, BOARD_SIZE_RANGE, CoinOutcome, CoinProblem, Glyphs, QueensProblem,
    input,
};

/// Form input is validated before any trace is generated.
#[test]
fn test_coin_form_validation() {
    let problem = CoinProblem::parse(" 5, 1, 2, ", "11").unwrap();
    assert_eq!(problem.coins(), &[1, 2, 5]);
    assert_eq!(problem.amount(), 11);

    for (coins, amount) in [
        ("", "5"),
        (" , ", "5"),
        ("1,a", "5"),
        ("1,-2", "5"),
        ("0", "5"),
        ("1.5", "5"),
        ("1,2", "0"),
        ("1,2", "21"),
        ("1,2", "ten"),
    ] {
        let err = CoinProblem::parse(coins, amount).unwrap_err();
        assert!(
            matches!(err, AlgoError::InvalidInput { .. }),
            "{:?} / {:?} gave {:?}",
            coins,
            amount,
            err
        );
    }
}

#[test]
fn test_range_bounds_are_inclusive() {
    assert!(CoinProblem::new([1], *AMOUNT_RANGE.start()).is_ok());
    assert!(CoinProblem::new([1], *AMOUNT_RANGE.end()).is_ok());
    assert!(QueensProblem::new(*BOARD_SIZE_RANGE.start()).is_ok());
    assert!(QueensProblem::new(*BOARD_SIZE_RANGE.end()).is_ok());
    assert!(QueensProblem::new(3).is_err());
    assert!(QueensProblem::new(9).is_err());
    assert!(QueensProblem::parse("four").is_err());
}

#[test]
fn test_parse_helpers() {
    assert_eq!(input::parse_coins("3,3,1").unwrap(), vec![1, 3]);
    assert_eq!(input::parse_amount(" 7 ").unwrap(), 7);
    assert!(input::parse_amount("").is_err());
}

/// Test the coin answer end to end, including the -1 convention.
#[test]
fn test_coin_results() {
    let problem = CoinProblem::new([1, 2, 5], 11).unwrap();
    let trace = coins::generate(&problem).unwrap();
    let result = CoinResult::from_trace(&trace, problem.coins()).unwrap();
    assert_eq!(result.outcome(), CoinOutcome::MinCoins(3));
    assert_eq!(result.outcome().as_i64(), 3);

    let problem = CoinProblem::new([5, 10], 7).unwrap();
    let trace = coins::generate(&problem).unwrap();
    let result = CoinResult::from_trace(&trace, problem.coins()).unwrap();
    assert_eq!(result, CoinResult::Impossible);
    assert_eq!(result.outcome().as_i64(), -1);
}

#[test]
fn test_queens_results() {
    let trace = queens::generate(&QueensProblem::new(5).unwrap()).unwrap();
    let QueensResult::Solved { queens, .. } = QueensResult::from_trace(&trace).unwrap() else {
        panic!("N=5 has a solution");
    };
    // First solution in row-major search order
    assert_eq!(queens, vec![0, 2, 4, 1, 3]);
}

/// Every step of both visualizers narrates in either glyph set.
#[test]
fn test_narratives_cover_every_step() {
    let coin_trace = coins::generate(&CoinProblem::new([2, 3], 7).unwrap()).unwrap();
    let queen_trace = queens::generate(&QueensProblem::new(6).unwrap()).unwrap();

    for glyphs in [Glyphs::UNICODE, Glyphs::ASCII] {
        for step in &coin_trace {
            assert!(!coins::narrate(step, &glyphs).trim().is_empty());
        }
        for step in &queen_trace {
            assert!(!queens::narrate(step, &glyphs).trim().is_empty());
        }
    }

    let last = queen_trace.last().unwrap();
    let board = queens::format_board(&last.snapshot, None, &Glyphs::ASCII);
    assert_eq!(board.matches('Q').count(), 6);
}
