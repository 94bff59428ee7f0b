//! Core game state and turn structure

pub mod actions;
pub mod evolution;
pub mod game_loop;
pub mod logger;
pub mod phase;
pub mod state;

pub use actions::GameAction;
pub use evolution::{EvolutionTrait, POISON_ABILITY, POISON_CHANCE};
pub use game_loop::GameLoop;
pub use logger::{GameLogger, LogEntry, LogGuard, OutputFormat, OutputMode, VerbosityLevel};
pub use phase::Phase;
pub use state::{Battlefield, GameState};
