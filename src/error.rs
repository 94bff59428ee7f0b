//! Error types for the Chyrralon engine

use crate::core::{CardType, GameId, Position};
use crate::game::Phase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Cannot {action} during {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("Card not found in hand: {0}")]
    CardNotFound(String),

    #[error("Invalid card type: expected {expected}, found {found}")]
    InvalidCardType { expected: CardType, found: CardType },

    #[error("Not enough {resource}. Required: {required}, Available: {available}")]
    InsufficientResources {
        resource: &'static str,
        required: u32,
        available: u32,
    },

    #[error("Invalid position: ({}, {})", .0.x, .0.y)]
    InvalidPosition(Position),

    #[error("Cannot place creature too close to existing creature {0}")]
    PositionConflict(String),

    #[error("Target creature not found: {0}")]
    CreatureNotFound(String),

    #[error("Creature does not have compatible DNA slot: {0}")]
    IncompatibleSlot(String),

    #[error("Creature has reached maximum mutations ({0})")]
    MutationLimitReached(u32),

    #[error("Creature already has mutation type: {0}")]
    DuplicateMutationType(String),

    #[error("Invalid game id: {0:?}")]
    InvalidGameId(String),

    #[error("No entity ids left in game {0}")]
    IdsExhausted(GameId),

    #[error("Invalid card catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GameError {
    /// Business-rule rejection of a player request (never transient)
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            GameError::NotYourTurn
                | GameError::WrongPhase { .. }
                | GameError::CardNotFound(_)
                | GameError::InvalidCardType { .. }
                | GameError::InsufficientResources { .. }
                | GameError::InvalidPosition(_)
                | GameError::PositionConflict(_)
                | GameError::CreatureNotFound(_)
                | GameError::IncompatibleSlot(_)
                | GameError::MutationLimitReached(_)
                | GameError::DuplicateMutationType(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GameError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
