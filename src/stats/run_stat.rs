use crate::core::StatError;
use crate::core::observations::{Observation, Title};
use crate::stats::Accumulator;

/// Online accumulator over weighted observations.
///
/// Implementations ingest observations through [`add`](RunStat::add) and can
/// absorb a same-titled peer through [`merge`](RunStat::merge); the result is
/// the same as if every observation of both had been added to one instance.
pub trait RunStat {
    fn title(&self) -> &Title;

    /// Incorporates `observation` with multiplicity `weight`.
    fn add<O: Into<Observation>>(&mut self, observation: O, weight: f64) -> Result<(), StatError>;

    #[inline]
    fn add_one<O: Into<Observation>>(&mut self, observation: O) -> Result<(), StatError> {
        self.add(observation, 1.0)
    }

    /// Total weight of every observation passed to `add`, including the ones
    /// that were not usable.
    fn num(&self) -> f64;

    fn merge(&mut self, other: &Accumulator) -> Result<(), StatError>;

    /// Shared merge precondition: both sides measure the same thing.
    fn check_title(&self, other: &Title) -> Result<(), StatError> {
        if self.title() == other {
            return Ok(());
        }
        log::debug!("rejecting merge of {other} into {}", self.title());
        Err(StatError::TitleMismatch {
            expected: self.title().clone(),
            found: other.clone(),
        })
    }
}

/// Weights are multiplicities: finite and non-negative.
#[inline]
pub(crate) fn check_weight(weight: f64) -> Result<(), StatError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(StatError::InvalidWeight { weight })
    }
}
