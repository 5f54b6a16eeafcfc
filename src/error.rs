use thiserror::Error;

/// Errors raised by the game core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Free-cell sampling gave up; the grid is too small for its exclusion zones.
    #[error("no free cell found after {attempts} attempts (grid too small?)")]
    NoFreeCell { attempts: u32 },
}
