//! Generic step and trace data types.
//!
//! These types provide the foundation for recorded algorithm runs. Each
//! visualizer defines its own event enum (the step kind plus its context
//! fields) and snapshot type, and plugs them into [`Step`] and [`Trace`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::recorder::{TraceError, check_steps};

/// Behaviour shared by every per-algorithm event enum.
///
/// An event is the tagged variant of a step: its discriminant is the step
/// kind, its fields are the context needed to explain the step.
pub trait StepEvent {
    /// Stable snake_case name of the step kind (e.g. `"update"`).
    fn kind(&self) -> &'static str;

    /// Short label for a phase indicator (e.g. `"OUTER_LOOP_i=3"`).
    fn phase(&self) -> String;

    /// 1-based line in the algorithm's pseudocode listing.
    fn code_line(&self) -> u32;

    /// Whether this event ends a trace.
    fn is_terminal(&self) -> bool;
}

/// One immutable record of a single decision or mutation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<E, S> {
    /// 1-based position of the step in its trace.
    pub sequence: usize,

    /// The step kind and its context fields.
    pub event: E,

    /// Owned copy of the algorithm state at the moment the step was emitted.
    pub snapshot: S,

    /// Phase label derived from the event.
    pub phase: String,

    /// Pseudocode line this step corresponds to.
    pub code_line: u32,
}

impl<E: StepEvent, S> Step<E, S> {
    /// Kind name of the underlying event.
    pub fn kind(&self) -> &'static str {
        self.event.kind()
    }

    /// Whether this is the terminal step of its trace.
    pub fn is_terminal(&self) -> bool {
        self.event.is_terminal()
    }
}

/// A complete, fully materialized run of one generator.
///
/// Traces carry no timestamps or random identifiers: identical inputs always
/// produce identical (and identically serialized) traces. Deserialized traces
/// are checked the same way the recorder checks a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawTrace<E, S>",
    bound(deserialize = "E: StepEvent + Deserialize<'de>, S: Deserialize<'de>")
)]
pub struct Trace<E, S> {
    /// Algorithm name (e.g. `"coin_change"`).
    pub name: String,

    /// Inputs the trace was generated from.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, serde_json::Value>,

    steps: Vec<Step<E, S>>,
}

/// Unchecked wire form of a [`Trace`].
#[derive(Deserialize)]
struct RawTrace<E, S> {
    name: String,
    #[serde(default)]
    inputs: BTreeMap<String, serde_json::Value>,
    steps: Vec<Step<E, S>>,
}

impl<E: StepEvent, S> TryFrom<RawTrace<E, S>> for Trace<E, S> {
    type Error = TraceError;

    fn try_from(raw: RawTrace<E, S>) -> Result<Self, Self::Error> {
        check_steps(&raw.steps)?;
        Ok(Self::from_parts(raw.name, raw.inputs, raw.steps))
    }
}

impl<E, S> Trace<E, S> {
    /// Build a trace from steps already checked by the recorder.
    pub(crate) fn from_parts(
        name: String,
        inputs: BTreeMap<String, serde_json::Value>,
        steps: Vec<Step<E, S>>,
    ) -> Self {
        Self {
            name,
            inputs,
            steps,
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for traces produced by a recorder.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at a 0-based index.
    pub fn get(&self, index: usize) -> Option<&Step<E, S>> {
        self.steps.get(index)
    }

    /// All steps in emission order.
    pub fn steps(&self) -> &[Step<E, S>] {
        &self.steps
    }

    /// The first step.
    pub fn first(&self) -> Option<&Step<E, S>> {
        self.steps.first()
    }

    /// The last (terminal) step.
    pub fn last(&self) -> Option<&Step<E, S>> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<E, S>> {
        self.steps.iter()
    }
}

impl<E: StepEvent, S> Trace<E, S> {
    /// Count the steps of a given kind.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }

    /// Iterate over the steps of a given kind.
    pub fn steps_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Step<E, S>> {
        self.steps.iter().filter(move |s| s.kind() == kind)
    }
}

impl<'a, E, S> IntoIterator for &'a Trace<E, S> {
    type Item = &'a Step<E, S>;
    type IntoIter = std::slice::Iter<'a, Step<E, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal event used by the tests in this crate.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum Counter {
        Start,
        Bump { by: u32 },
        Done,
    }

    impl StepEvent for Counter {
        fn kind(&self) -> &'static str {
            match self {
                Counter::Start => "start",
                Counter::Bump { .. } => "bump",
                Counter::Done => "done",
            }
        }

        fn phase(&self) -> String {
            self.kind().to_uppercase()
        }

        fn code_line(&self) -> u32 {
            match self {
                Counter::Start => 1,
                Counter::Bump { .. } => 2,
                Counter::Done => 3,
            }
        }

        fn is_terminal(&self) -> bool {
            matches!(self, Counter::Done)
        }
    }

    pub fn counter_trace(bumps: u32) -> Trace<Counter, u32> {
        let mut recorder = crate::TraceRecorder::new("counter");
        let mut value = 0;
        recorder.record(Counter::Start, &value);
        for _ in 0..bumps {
            value += 1;
            recorder.record(Counter::Bump { by: 1 }, &value);
        }
        recorder.record(Counter::Done, &value);
        recorder.finish().unwrap()
    }

    #[test]
    fn test_step_accessors() {
        let trace = counter_trace(2);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.first().unwrap().kind(), "start");
        assert!(trace.last().unwrap().is_terminal());
        assert_eq!(trace.count_kind("bump"), 2);
        assert_eq!(trace.get(2).unwrap().snapshot, 2);
        assert!(trace.get(4).is_none());
    }

    #[test]
    fn test_trace_serialization() {
        let trace = counter_trace(1);
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains(r#""kind":"bump""#));
        assert!(json.contains(r#""name":"counter""#));

        let back: Trace<Counter, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }

    fn parse(value: serde_json::Value) -> Result<Trace<Counter, u32>, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_deserialize_rejects_empty_trace() {
        let err = parse(serde_json::json!({"name": "x", "steps": []})).unwrap_err();
        assert!(err.to_string().contains("trace is empty"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_bad_sequence() {
        let mut value = serde_json::to_value(counter_trace(1)).unwrap();
        value["steps"][0]["sequence"] = serde_json::json!(7);
        let err = parse(value).unwrap_err();
        assert!(
            err.to_string()
                .contains("step at position 1 has sequence number 7"),
            "{}",
            err
        );

        // Dropping a step leaves a gap
        let mut value = serde_json::to_value(counter_trace(2)).unwrap();
        value["steps"].as_array_mut().unwrap().remove(1);
        assert!(parse(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_misplaced_terminal() {
        let mut value = serde_json::to_value(counter_trace(1)).unwrap();
        value["steps"][0]["event"] = serde_json::json!({"kind": "done"});
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("terminal step 1"), "{}", err);

        let mut value = serde_json::to_value(counter_trace(1)).unwrap();
        value["steps"][2]["event"] = serde_json::json!({"kind": "start"});
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("does not end with a terminal"), "{}", err);
    }
}
