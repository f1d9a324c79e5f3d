//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod session;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{EngineError, GridEngine, MoveEngine, MoveResult, move_snake};
pub use food::spawn_food;
pub use session::{Phase, Session, TickOutcome};
pub use speed::Speed;
pub use state::{CollisionType, GridBounds, Position, Snake};
