pub mod dummies;
pub mod streams;
