//! Wrap Snake - Snake on a toroidal grid
//!
//! This library provides:
//! - The simulation core (game module): snake movement with wrap-around, food placement,
//!   collision detection and a frame-gated tick loop behind an injected scheduler
//! - A terminal host built on it (input, render, metrics and modes modules)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
