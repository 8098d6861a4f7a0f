//! Mergeable online accumulators.
//!
//! [`stats::Counter`] keeps a frequency table over arbitrary observations and
//! [`stats::NumStat`] a running numeric summary. Same-titled accumulators built
//! independently can be merged exactly, so a stream can be partitioned across
//! workers and reduced afterwards.

pub mod core;
pub mod stats;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
