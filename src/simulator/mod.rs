//! Headless balance simulator.
//!
//! Plays every level many times with a greedy autopilot to see how often
//! each goal is reachable and how long it takes. Sessions drive the real
//! `GameEngine` in the same tick order as an interactive game, so results
//! match what a player would see.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::choose_direction;
pub use config::SimConfig;
pub use report::{LevelReport, SimReport};
pub use runner::{run_simulation, run_simulation_with, simulate_single_run, RunStats};
