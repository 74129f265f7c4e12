pub mod day_log;

pub use day_log::*;
