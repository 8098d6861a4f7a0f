use crate::core::observations::{Observation, Title};
use crate::stats::AccumulatorKind;
use thiserror::Error;

/// Precondition failures raised by accumulators.
///
/// Every variant is returned before the target accumulator is mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatError {
    #[error("title mismatch: expected {expected}, found {found}")]
    TitleMismatch { expected: Title, found: Title },

    #[error("incompatible observation {observation} for title {title}")]
    IncompatibleObservation {
        title: Title,
        observation: Observation,
    },

    #[error("cannot merge a {found} into a {target}")]
    BadMergeType {
        target: AccumulatorKind,
        found: AccumulatorKind,
    },

    #[error("invalid weight: {weight}")]
    InvalidWeight { weight: f64 },

    #[error("split requires a pair title, got {title}")]
    NotAPair { title: Title },
}
