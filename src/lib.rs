//! Simulation core for a fixed shooter: a player at the bottom, a marching
//! formation of invaders at the top, and the rules that move them.
//!
//! The model owns all state and reports every change through per-channel
//! listeners (`events`). A frontend drives it through a `GameController`.

pub mod config;
pub mod controller;
pub mod coord;
pub mod entities;
pub mod events;
pub mod model;

pub use config::GameConfig;
pub use controller::{GameController, GameView};
pub use coord::Coord;
pub use entities::{GameOverCause, GameState, GameStatus, MarchDirection};
pub use events::{Channel, ModelEvents};
pub use model::{GameModel, Simulation};
