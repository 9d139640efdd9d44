//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The shell drives it by calling [`GameEngine::tick`] on a timer and
//! [`GameEngine::steer`] on key presses.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{FoodPlacement, GameConfig};
pub use engine::{GameEngine, TickResult};
pub use error::ConfigError;
pub use state::{CollisionType, GameState, Phase, Position, Snake};
