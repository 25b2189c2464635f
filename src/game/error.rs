use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the grid is covered by the snake, food has nowhere to go
    #[error("no free cell left for food on a {width}x{height} grid")]
    EmptyBoard { width: i32, height: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
