//! Core game logic
//!
//! Everything here is free of window, input and audio dependencies; the
//! shell talks to it through `Intent`, `Canvas` and `AudioSink`.

pub mod audio;
pub mod clock;
pub mod direction;
pub mod food;
pub mod grid;
pub mod particle;
pub mod render;
pub mod session;
pub mod snake;
pub mod special_food;

// Re-export commonly used types
pub use audio::{AudioSink, Cue};
pub use clock::TickRate;
pub use direction::Direction;
pub use food::Food;
pub use grid::{Cell, Grid, Rect};
pub use particle::{Particle, ParticleBurst};
pub use render::Canvas;
pub use session::{DeathCause, GameOver, Intent, Phase, Session};
pub use snake::Snake;
pub use special_food::{SpecialFood, SpecialFoodSlot, SpecialFoodState};
