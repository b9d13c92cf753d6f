pub mod analysis;
pub mod display;
pub mod error;
pub mod parse;
