//! Interactive playback controls read from stdin.

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Result, bail};
use stepwise_trace::Command;
use tokio::sync::mpsc;

pub const HELP: &str = "\
Controls:
  n, next, <enter>   next step
  p, prev            previous step
  g, goto <k>        jump to step k
  first, last        jump to the first or last step
  play [ms]          auto-play, optionally with a custom interval
  stop               stop auto-play
  reset              clear the loaded trace
  q, quit            exit";

/// Parse one line of user input.
pub fn parse_command(line: &str, default_interval: Duration) -> Result<Command> {
    let mut words = line.split_whitespace();
    let cmd = match words.next() {
        None | Some("n") | Some("next") => Command::Advance,
        Some("p") | Some("prev") => Command::Retreat,
        Some("first") => Command::Seek(0),
        Some("last") => Command::Seek(usize::MAX),
        Some("g") | Some("goto") => {
            let Some(arg) = words.next() else {
                bail!("goto needs a step number");
            };
            let step: usize = arg
                .parse()
                .map_err(|_| anyhow::anyhow!("'{}' is not a step number", arg))?;
            Command::Seek(step.saturating_sub(1))
        }
        Some("play") => match words.next() {
            None => Command::Play(default_interval),
            Some(arg) => {
                let ms: u64 = arg
                    .parse()
                    .map_err(|_| anyhow::anyhow!("'{}' is not a number of milliseconds", arg))?;
                if ms == 0 {
                    bail!("interval must be greater than zero");
                }
                Command::Play(Duration::from_millis(ms))
            }
        },
        Some("stop") => Command::Stop,
        Some("reset") => Command::Reset,
        Some("q") | Some("quit") | Some("exit") => Command::Quit,
        Some(other) => bail!("unknown command '{}'", other),
    };
    Ok(cmd)
}

/// Forward stdin lines to the driver on a dedicated thread.
///
/// The channel closes when stdin reaches EOF or after `Quit` was sent.
pub fn spawn_stdin_reader(tx: mpsc::Sender<Command>, default_interval: Duration) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line, default_interval) {
                Ok(cmd) => {
                    if tx.blocking_send(cmd).is_err() || cmd == Command::Quit {
                        break;
                    }
                }
                Err(e) => eprintln!("{}\n{}", e, HELP),
            }
        }
        tracing::debug!("stdin reader finished");
    });
}
