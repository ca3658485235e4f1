//! Step traces for algorithm visualizers.
//!
//! This crate provides the algorithm-independent half of a visualizer:
//!
//! - **Types**: generic `Step` and `Trace` records and the `StepEvent` trait
//! - **Recorder**: explicit, generator-owned collection of steps with owned snapshots
//! - **Playback**: cursor state machine over a loaded trace
//! - **Driver**: async loop feeding playback to a `Renderer`, with timer-driven auto-play
//! - **Writer**: JSON/JSONL export for external renderers
//!
//! # Usage
//!
//! ```rust,ignore
//! use stepwise_trace::{Playback, TraceRecorder};
//!
//! let mut recorder = TraceRecorder::new("my_algorithm");
//! let mut state = vec![0u32; 4];
//! recorder.record(MyEvent::Init, &state);
//! state[1] = 7;
//! recorder.record(MyEvent::Done, &state);
//! let trace = recorder.finish()?;
//!
//! let mut playback = Playback::with_trace(trace);
//! playback.advance()?;
//! let step = playback.current()?;
//! ```

pub mod driver;
pub mod playback;
pub mod recorder;
pub mod types;
pub mod writer;

pub use driver::{Command, DriveSummary, Renderer, run};
pub use playback::{Playback, PlaybackError, PlaybackState};
pub use recorder::{TraceError, TraceRecorder};
pub use types::{Step, StepEvent, Trace};
pub use writer::{ExportFormat, TraceWriter, WriteError, write_to};
