//! Core game logic module for Snake
//!
//! This module contains the simulation without any I/O or rendering dependencies. Hosts
//! drive it through the [`FrameScheduler`] seam and observe it through [`GameEvent`]s.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod food;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, Turn};
pub use config::{GameConfig, GridGeometry};
pub use engine::{Game, TickInfo, INITIAL_DIRECTION};
pub use error::GameError;
pub use events::{EventBus, GameEvent};
pub use food::place_food;
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use state::{Coordinate, GameState, Snake};
