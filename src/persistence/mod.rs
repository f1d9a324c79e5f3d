//! High score persistence

pub mod high_score;
pub mod store;

pub use high_score::HighScoreKeeper;
pub use store::{HighScoreRecord, JsonFileStore, MemoryStore, ScoreStore};
