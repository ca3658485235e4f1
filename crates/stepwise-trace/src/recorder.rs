//! Step recorder.
//!
//! A generator owns one [`TraceRecorder`] for the duration of a single run.
//! Every emission takes an owned copy of the live state, so later mutation of
//! that state can never change a step that was already recorded.

use std::collections::BTreeMap;

use crate::types::{Step, StepEvent, Trace};

/// Errors raised when a recorded run does not form a valid trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("trace is empty")]
    Empty,

    #[error("terminal step {sequence} is not the last of {len} steps")]
    TerminalNotLast { sequence: usize, len: usize },

    #[error("trace of {len} steps does not end with a terminal step")]
    MissingTerminal { len: usize },

    #[error("step at position {position} has sequence number {sequence}")]
    OutOfSequence { position: usize, sequence: usize },
}

/// Check the trace invariants: non-empty, sequences numbered `1..=len`, and
/// exactly one terminal step which is the last.
pub(crate) fn check_steps<E: StepEvent, S>(steps: &[Step<E, S>]) -> Result<(), TraceError> {
    let len = steps.len();
    let Some(last) = steps.last() else {
        return Err(TraceError::Empty);
    };
    if let Some((idx, step)) = steps
        .iter()
        .enumerate()
        .find(|(idx, step)| step.sequence != idx + 1)
    {
        return Err(TraceError::OutOfSequence {
            position: idx + 1,
            sequence: step.sequence,
        });
    }
    if let Some(early) = steps[..len - 1].iter().find(|s| s.is_terminal()) {
        return Err(TraceError::TerminalNotLast {
            sequence: early.sequence,
            len,
        });
    }
    if !last.is_terminal() {
        return Err(TraceError::MissingTerminal { len });
    }
    Ok(())
}

/// Collects steps during one generator run.
#[derive(Debug)]
pub struct TraceRecorder<E, S> {
    name: String,
    inputs: BTreeMap<String, serde_json::Value>,
    steps: Vec<Step<E, S>>,
}

impl<E: StepEvent, S: Clone> TraceRecorder<E, S> {
    /// Create a recorder for the named algorithm.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Record an input the trace is generated from.
    pub fn add_input(&mut self, key: impl Into<String>, value: impl serde::Serialize) {
        if let Ok(v) = serde_json::to_value(value) {
            self.inputs.insert(key.into(), v);
        }
    }

    /// Append a step, cloning the current state into its snapshot.
    pub fn record(&mut self, event: E, state: &S) {
        let sequence = self.steps.len() + 1;
        let phase = event.phase();
        let code_line = event.code_line();
        tracing::trace!(sequence, kind = event.kind(), %phase, "step recorded");
        self.steps.push(Step {
            sequence,
            event,
            snapshot: state.clone(),
            phase,
            code_line,
        });
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Finalize the run into a trace.
    ///
    /// Fails unless exactly one terminal step was recorded and it is the last.
    pub fn finish(self) -> Result<Trace<E, S>, TraceError> {
        check_steps(&self.steps)?;

        tracing::debug!(
            name = %self.name,
            steps = self.steps.len(),
            terminal = self.steps.last().map_or("", |s| s.kind()),
            "trace recorded"
        );
        Ok(Trace::from_parts(self.name, self.inputs, self.steps))
    }
}
