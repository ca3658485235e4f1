//! Async playback driver.
//!
//! The driver owns a [`Playback`] for its whole lifetime and is the only code
//! that moves its cursor. Timer ticks and user commands are processed one at a
//! time on a single task, so a manual step and an auto-play tick can never
//! interleave. The auto-play interval only exists while the controller is in
//! the auto-playing state; once a `Stop` is handled the interval is dropped and
//! no further tick can fire.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::playback::{Playback, PlaybackState};
use crate::types::{Step, StepEvent, Trace};

/// Consumer of steps during playback.
pub trait Renderer<E, S> {
    /// Draw the step at the cursor. `position` is 1-based.
    fn render(&mut self, step: &Step<E, S>, position: usize, total: usize);

    /// Called whenever the last step of the trace is shown.
    fn finished(&mut self, _trace: &Trace<E, S>) {}

    /// Called after the controller was reset.
    fn cleared(&mut self) {}
}

/// User-issued playback command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    Seek(usize),
    Play(Duration),
    Stop,
    Reset,
    Quit,
}

/// Counters describing one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveSummary {
    /// Steps handed to the renderer.
    pub rendered: usize,
    /// Timer ticks that moved the cursor.
    pub ticks: usize,
    /// Commands received.
    pub commands: usize,
}

enum Input {
    Command(Option<Command>),
    Tick,
}

/// Run playback until `Quit` is received or the command channel closes.
///
/// The step at the cursor is rendered once on entry if a trace is loaded.
pub async fn run<E, S, R>(
    playback: &mut Playback<E, S>,
    renderer: &mut R,
    mut commands: mpsc::Receiver<Command>,
) -> DriveSummary
where
    E: StepEvent,
    R: Renderer<E, S>,
{
    let mut summary = DriveSummary::default();
    let mut ticker: Option<Interval> = None;

    if playback.trace().is_some() {
        show(playback, renderer, &mut summary);
    }

    loop {
        match playback.state() {
            PlaybackState::AutoPlaying { interval } => {
                if ticker.is_none() {
                    ticker = Some(new_ticker(interval));
                }
            }
            _ => ticker = None,
        }

        // Commands win over a simultaneously ready tick so that a queued
        // `Stop` is always honoured before the next advance.
        let input = tokio::select! {
            biased;
            cmd = commands.recv() => Input::Command(cmd),
            _ = next_tick(&mut ticker) => Input::Tick,
        };

        match input {
            Input::Tick => {
                if playback.tick() {
                    summary.ticks += 1;
                    show(playback, renderer, &mut summary);
                }
            }
            Input::Command(None) | Input::Command(Some(Command::Quit)) => {
                tracing::debug!(?summary, "playback driver finished");
                return summary;
            }
            Input::Command(Some(cmd)) => {
                summary.commands += 1;
                handle(cmd, playback, renderer, &mut summary);
            }
        }
    }
}

fn handle<E, S, R>(
    cmd: Command,
    playback: &mut Playback<E, S>,
    renderer: &mut R,
    summary: &mut DriveSummary,
) where
    E: StepEvent,
    R: Renderer<E, S>,
{
    let moved = match cmd {
        Command::Advance => playback.advance(),
        Command::Retreat => playback.retreat(),
        Command::Seek(index) => playback.seek(index),
        Command::Play(interval) => playback.play(interval).map(|_| false),
        Command::Stop => {
            playback.stop();
            Ok(false)
        }
        Command::Reset => {
            playback.reset();
            renderer.cleared();
            Ok(false)
        }
        Command::Quit => Ok(false),
    };

    match moved {
        Ok(true) => show(playback, renderer, summary),
        Ok(false) => {}
        Err(e) => tracing::warn!(?cmd, "ignored playback command: {}", e),
    }
}

fn show<E, S, R>(playback: &Playback<E, S>, renderer: &mut R, summary: &mut DriveSummary)
where
    E: StepEvent,
    R: Renderer<E, S>,
{
    let (Ok(step), Some(trace)) = (playback.current(), playback.trace()) else {
        return;
    };
    renderer.render(step, playback.cursor() + 1, trace.len());
    summary.rendered += 1;
    if playback.is_at_end() {
        renderer.finished(trace);
    }
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
