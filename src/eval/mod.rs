//! Scoring of externally proposed action sequences.
//!
//! The evaluator replays a sequence through any `RulesEngine` on a copy of
//! the state and returns an explicit report. Aggregation across many
//! sequences is the caller's `EvaluationSummary`; nothing here keeps
//! shared state between calls.

pub mod sequence;

pub use sequence::{evaluate_sequence, EvaluationSummary, SequenceReport};
