pub mod frequency;
pub mod matching;

pub use frequency::analyze;
pub use matching::{evaluate, Candidate};
