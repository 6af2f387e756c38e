//! Serpent - Snake Game Simulation Library
//!
//! This module exposes the simulation core for front-ends, tools and tests:
//! the tick-driven engine, obstacles, victory goals, levels and progression.

pub mod collections;
pub mod core;
pub mod engine;
pub mod high_score;
pub mod levels;
pub mod obstacles;
pub mod simulator;
pub mod utils;
pub mod victory;
