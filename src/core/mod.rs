//! Core grid types, tuning constants, and injected randomness/time sources.

pub mod constants;
pub mod providers;
pub mod types;

pub use providers::{ManualClock, RandomSource, RngSource, SystemClock, TimeSource};
pub use types::{Difficulty, Direction, Point};
