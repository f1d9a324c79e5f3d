//! Grid Snake - the classic Snake game in a terminal
//!
//! This library provides:
//! - Core game logic: movement engine and game session (game module)
//! - High score persistence (persistence module)
//! - Drawing surface and TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod persistence;
pub mod render;
