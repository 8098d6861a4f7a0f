pub mod error;
pub mod observations;

pub use error::StatError;
