//! Snake Arcade - a single-player snake game with a menu shell
//!
//! This library provides:
//! - Core game logic (game module): snake, food, special food, particles
//!   and the fixed-rate session driver
//! - Persistence of settings and the leaderboard (persistence module)
//!
//! The window shell in `main.rs` drives the session with macroquad.

pub mod error;
pub mod game;
pub mod persistence;

pub use error::GameError;
