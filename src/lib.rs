//! Chyrralon - a two-player mutation and evolution card game engine
//!
//! Players summon creatures, graft mutation cards onto them, and watch them
//! evolve once the right mutations come together. [`GameEngine`] owns every
//! active game, advances them phase by phase, validates player actions, and
//! keeps one JSON document per game on disk.

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod game;
pub mod loader;
pub mod store;

pub use config::{EngineConfig, GameRules};
pub use engine::GameEngine;
pub use error::{GameError, Result};
