//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a turn, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Main,
    Mutation,
    Combat,
    End,
}

impl Phase {
    /// The phase that follows this one (End wraps to Main)
    pub fn next(&self) -> Phase {
        match self {
            Phase::Main => Phase::Mutation,
            Phase::Mutation => Phase::Combat,
            Phase::Combat => Phase::End,
            Phase::End => Phase::Main,
        }
    }

    /// Leaving this phase starts a new turn
    pub fn ends_turn(&self) -> bool {
        matches!(self, Phase::End)
    }

    pub fn allows_summon(&self) -> bool {
        matches!(self, Phase::Main)
    }

    pub fn allows_mutation(&self) -> bool {
        matches!(self, Phase::Main | Phase::Mutation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Main => "main",
            Phase::Mutation => "mutation",
            Phase::Combat => "combat",
            Phase::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
