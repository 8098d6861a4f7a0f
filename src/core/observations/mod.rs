mod observation;
mod title;

pub use observation::Observation;
pub use title::Title;
