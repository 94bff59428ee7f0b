//! Identifiers for games, players and creatures
//!
//! Every id is a plain string on disk so the persisted documents stay readable,
//! but each kind gets its own newtype so a player id can't be passed where a
//! creature id is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Caller-assigned game identifier, also the storage file stem
    GameId
);

string_id!(
    /// Player identifier (`player1`, `player2`)
    PlayerId
);

string_id!(
    /// Creature instance identifier, unique within one game
    CreatureId
);

impl GameId {
    /// Game ids become file names, so only `[A-Za-z0-9_-]` is accepted
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }
}

/// Trailing numeric suffix of a minted id (`creature_12` -> 12)
pub(crate) fn numeric_suffix(id: &str) -> Option<u32> {
    id.rsplit('_').next().and_then(|tail| tail.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_validation() {
        assert!(GameId::new("g1").is_valid());
        assert!(GameId::new("game_5f3a-b").is_valid());
        assert!(!GameId::new("").is_valid());
        assert!(!GameId::new("../etc/passwd").is_valid());
        assert!(!GameId::new("a b").is_valid());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = CreatureId::new("creature_3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"creature_3\"");
        let back: CreatureId = serde_json::from_str("\"creature_3\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(back, "creature_3");
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("creature_12"), Some(12));
        assert_eq!(numeric_suffix("enhanced_0"), Some(0));
        assert_eq!(numeric_suffix("test_creature"), None);
    }
}
