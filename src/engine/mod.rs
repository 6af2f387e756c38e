//! The game engine and the state it drives.

mod logic;
mod state;

pub use logic::GameEngine;
pub use state::GameState;
