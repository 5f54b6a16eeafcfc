//! Settings and leaderboard persistence behind a key-value `Store` port.
//!
//! Read failures never reach the game: they fall back to defaults and are
//! logged. Write failures are returned so the caller can log them.

pub mod leaderboard;
pub mod settings;
pub mod store;

pub use leaderboard::{Leaderboard, ScoreEntry};
pub use settings::Settings;
pub use store::{FileStore, MemoryStore, Store};
