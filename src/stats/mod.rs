mod accumulator;
mod counter;
mod fields;
mod num_stat;
mod run_stat;
mod summary;

pub use accumulator::{Accumulator, AccumulatorKind};
pub use counter::Counter;
pub use fields::NumStatFields;
pub use num_stat::NumStat;
pub use run_stat::RunStat;
pub use summary::SummaryFormat;
