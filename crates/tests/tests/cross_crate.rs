//! Cross-crate integration and E2E tests
//!
//! These tests run the generators from stepwise-algo through the playback,
//! driver and export machinery in stepwise-trace.

use std::collections::VecDeque;
use std::time::Duration;

use stepwise_algo::coins::{self, CoinResult, find_combination};
use stepwise_algo::queens::{self, QueensResult, is_valid_solution};
use stepwise_algo::{
    Board, CoinEvent, CoinOutcome, CoinProblem, DpCell, DpTable, QueenEvent, QueensProblem,
};
use stepwise_trace::{
    Command, ExportFormat, Playback, PlaybackError, PlaybackState, Renderer, Step, Trace,
    TraceWriter,
};
use tokio::sync::mpsc;

/// Minimum coins by breadth-first search over amounts, independent of the DP.
fn brute_force_min_coins(coins: &[u32], amount: usize) -> Option<u32> {
    let mut seen = vec![false; amount + 1];
    let mut queue = VecDeque::from([(0usize, 0u32)]);
    seen[0] = true;

    while let Some((reached, used)) = queue.pop_front() {
        if reached == amount {
            return Some(used);
        }
        for &coin in coins {
            let next = reached + coin as usize;
            if next <= amount && !seen[next] {
                seen[next] = true;
                queue.push_back((next, used + 1));
            }
        }
    }
    None
}

fn coin_sets() -> Vec<Vec<u32>> {
    vec![
        vec![1],
        vec![2],
        vec![1, 2, 5],
        vec![1, 3, 4],
        vec![2, 5],
        vec![3, 7],
        vec![4, 6, 9],
        vec![5, 10],
        vec![7],
    ]
}

/// E2E Test: the DP answer agrees with an independent search for every input
#[test]
fn test_e2e_coin_change_matches_brute_force() {
    for coin_set in coin_sets() {
        for amount in 1..=20 {
            let problem = CoinProblem::new(coin_set.clone(), amount).unwrap();
            let trace = coins::generate(&problem).unwrap();

            let last = trace.last().unwrap();
            let CoinEvent::FinalResult { result, .. } = last.event else {
                panic!("last step is {:?}", last.event);
            };

            let expected = brute_force_min_coins(problem.coins(), amount);
            match expected {
                Some(n) => assert_eq!(result, CoinOutcome::MinCoins(n), "{:?}/{}", coin_set, amount),
                None => assert_eq!(result, CoinOutcome::Impossible, "{:?}/{}", coin_set, amount),
            }

            match CoinResult::from_trace(&trace, problem.coins()).unwrap() {
                CoinResult::Solved {
                    min_coins,
                    combination,
                } => {
                    assert_eq!(combination.len() as u32, min_coins);
                    assert_eq!(combination.iter().sum::<u32>() as usize, amount);
                    assert!(combination.iter().all(|c| problem.coins().contains(c)));
                }
                CoinResult::Impossible => assert!(expected.is_none()),
            }
        }
    }
}

/// Every table cell matches the search, not just the final one
#[test]
fn test_coin_final_table_is_optimal_everywhere() {
    let problem = CoinProblem::new([4, 6, 9], 20).unwrap();
    let trace = coins::generate(&problem).unwrap();
    let dp = &trace.last().unwrap().snapshot;

    for i in 0..=20 {
        let expected = brute_force_min_coins(problem.coins(), i);
        assert_eq!(dp[i].value(), expected, "dp[{}]", i);
        if expected.is_some() && i > 0 {
            let combo = find_combination(dp, problem.coins(), i).unwrap();
            assert_eq!(combo.iter().sum::<u32>() as usize, i);
        }
    }
}

/// Applying each step's mutation to the previous snapshot yields the next one
#[test]
fn test_coin_snapshots_replay() {
    let problem = CoinProblem::new([1, 2, 5], 11).unwrap();
    let trace = coins::generate(&problem).unwrap();

    let mut replayed: Option<DpTable> = None;
    for step in &trace {
        let Some(mut table) = replayed.take() else {
            replayed = Some(step.snapshot.clone());
            continue;
        };
        if let CoinEvent::Update { i, new_value, .. } = step.event {
            let mut cells = table.cells().to_vec();
            cells[i] = DpCell::Reachable(new_value);
            table = DpTable::from(cells);
        }
        assert_eq!(table, step.snapshot, "step {}", step.sequence);
        replayed = Some(table);
    }
}

/// Placed queens never attack each other at any point of any search
#[test]
fn test_e2e_queens_every_board_is_consistent() {
    for size in 4..=8 {
        let trace = queens::generate(&QueensProblem::new(size).unwrap()).unwrap();

        for step in &trace {
            assert!(
                is_valid_solution_prefix(&step.snapshot),
                "N={} step {} has attacking queens",
                size,
                step.sequence
            );
        }

        match QueensResult::from_trace(&trace).unwrap() {
            QueensResult::Solved { board, queens } => {
                assert!(is_valid_solution(&board));
                assert_eq!(queens.len(), size);
            }
            QueensResult::Unsolved => panic!("N={} has a solution", size),
        }
    }
}

/// No two queens share a column or diagonal (rows are unique by construction).
fn is_valid_solution_prefix(board: &Board) -> bool {
    let placed: Vec<(usize, usize)> = board
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, q)| **q)
                .map(move |(c, _)| (r, c))
        })
        .collect();

    placed.iter().enumerate().all(|(i, &(r1, c1))| {
        placed[i + 1..]
            .iter()
            .all(|&(r2, c2)| r1 != r2 && c1 != c2 && r1.abs_diff(r2) != c1.abs_diff(c2))
    })
}

/// Regenerating gives a byte-identical export
#[test]
fn test_e2e_traces_are_deterministic() {
    let problem = CoinProblem::parse("4,1,3", "6").unwrap();
    let a = serde_json::to_string(&coins::generate(&problem).unwrap()).unwrap();
    let b = serde_json::to_string(&coins::generate(&problem).unwrap()).unwrap();
    assert_eq!(a, b);

    let problem = QueensProblem::parse("6").unwrap();
    let a = queens::generate(&problem).unwrap();
    let b = queens::generate(&problem).unwrap();
    assert_eq!(a, b);
}

/// Reset then load of a regenerated trace shows the same steps
#[test]
fn test_playback_reload_after_reset() {
    let problem = QueensProblem::new(5).unwrap();
    let mut playback = Playback::with_trace(queens::generate(&problem).unwrap());
    playback.seek(10).unwrap();
    let before = playback.current().unwrap().clone();

    playback.reset();
    assert!(playback.trace().is_none());
    assert_eq!(playback.current().unwrap_err(), PlaybackError::NoTraceLoaded);

    playback.load(queens::generate(&problem).unwrap());
    assert_eq!(playback.cursor(), 0);
    playback.seek(10).unwrap();
    assert_eq!(playback.current().unwrap(), &before);
}

/// Cursor stays inside the trace no matter what is asked of it
#[test]
fn test_playback_bounds_on_real_trace() {
    let trace = coins::generate(&CoinProblem::new([2], 3).unwrap()).unwrap();
    let len = trace.len();
    let mut playback = Playback::with_trace(trace);

    assert!(!playback.retreat().unwrap());
    assert!(playback.seek(usize::MAX).unwrap());
    assert_eq!(playback.cursor(), len - 1);
    assert!(!playback.advance().unwrap());
    assert!(playback.current().unwrap().is_terminal());
    assert_eq!(playback.progress().unwrap(), (len, len));

    // Nothing left to play
    playback.play(Duration::from_millis(10)).unwrap();
    assert_eq!(playback.state(), PlaybackState::Scrubbing);
}

/// Renderer that remembers positions of every drawn step.
#[derive(Default)]
struct Collect {
    positions: Vec<usize>,
    finished: usize,
}

impl<E, S> Renderer<E, S> for Collect {
    fn render(&mut self, _step: &Step<E, S>, position: usize, _total: usize) {
        self.positions.push(position);
    }

    fn finished(&mut self, _trace: &Trace<E, S>) {
        self.finished += 1;
    }
}

/// E2E Test: auto-play a full N-Queens trace to its end under paused time
#[tokio::test(start_paused = true)]
async fn test_e2e_driver_autoplays_to_end() {
    let trace = queens::generate(&QueensProblem::new(4).unwrap()).unwrap();
    let len = trace.len();
    let mut playback = Playback::with_trace(trace);
    let mut renderer = Collect::default();
    let (tx, rx) = mpsc::channel(8);

    let sender = tokio::spawn(async move {
        tx.send(Command::Play(Duration::from_millis(100))).await.unwrap();
        // Well past the time needed to reach the end
        tokio::time::sleep(Duration::from_millis(100 * (len as u64 + 5))).await;
        tx.send(Command::Quit).await.unwrap();
    });

    let summary = stepwise_trace::run(&mut playback, &mut renderer, rx).await;
    sender.await.unwrap();

    assert_eq!(summary.ticks, len - 1);
    assert_eq!(renderer.positions, (1..=len).collect::<Vec<_>>());
    assert_eq!(renderer.finished, 1);
    assert!(playback.is_at_end());
    assert!(matches!(
        playback.current().unwrap().event,
        QueenEvent::Success { .. }
    ));
}

/// Stop halts auto-play and manual stepping continues from there
#[tokio::test(start_paused = true)]
async fn test_e2e_driver_stop_then_step() {
    let trace = coins::generate(&CoinProblem::new([1, 3, 4], 6).unwrap()).unwrap();
    let mut playback = Playback::with_trace(trace);
    let mut renderer = Collect::default();
    let (tx, rx) = mpsc::channel(8);

    let sender = tokio::spawn(async move {
        tx.send(Command::Play(Duration::from_millis(100))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(350)).await;
        tx.send(Command::Stop).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(Command::Advance).await.unwrap();
        tx.send(Command::Retreat).await.unwrap();
        tx.send(Command::Quit).await.unwrap();
    });

    let summary = stepwise_trace::run(&mut playback, &mut renderer, rx).await;
    sender.await.unwrap();

    assert_eq!(summary.ticks, 3);
    assert_eq!(renderer.positions, vec![1, 2, 3, 4, 5, 4]);
    assert_eq!(playback.cursor(), 3);
    assert!(!playback.is_playing());
}

/// JSONL export has a header line plus one line per step
#[test]
fn test_e2e_export_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traces").join("coins.jsonl");
    let trace = coins::generate(&CoinProblem::new([1, 3, 4], 6).unwrap()).unwrap();

    let writer = TraceWriter::new(&path).unwrap();
    assert_eq!(writer.format(), ExportFormat::Jsonl);
    let lines = writer.write(&trace).unwrap();
    assert_eq!(lines, trace.len() + 1);

    let content = std::fs::read_to_string(&path).unwrap();
    let mut records = content.lines();

    let header: serde_json::Value = serde_json::from_str(records.next().unwrap()).unwrap();
    assert_eq!(header["name"], "coin_change");
    assert_eq!(header["steps"], trace.len());

    let steps: Vec<Step<CoinEvent, DpTable>> = records
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(steps.as_slice(), trace.steps());
}

/// JSON export round-trips into an identical trace
#[test]
fn test_e2e_export_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queens.json");
    let trace = queens::generate(&QueensProblem::new(6).unwrap()).unwrap();

    let writer = TraceWriter::new(&path).unwrap();
    assert_eq!(writer.format(), ExportFormat::Json);
    writer.write(&trace).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let loaded: Trace<QueenEvent, Board> = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded, trace);
}

/// A JSON trace with a step cut out no longer loads
#[test]
fn test_e2e_tampered_json_is_rejected() {
    let trace = queens::generate(&QueensProblem::new(4).unwrap()).unwrap();
    let mut value = serde_json::to_value(&trace).unwrap();
    value["steps"].as_array_mut().unwrap().remove(5);

    let err = serde_json::from_value::<Trace<QueenEvent, Board>>(value).unwrap_err();
    assert!(err.to_string().contains("position 6"), "{}", err);

    let empty = serde_json::json!({"name": "n_queens", "steps": []});
    assert!(serde_json::from_value::<Trace<QueenEvent, Board>>(empty).is_err());
}
