//! Main game state structure

use crate::core::entity::numeric_suffix;
use crate::core::{Card, CreatureId, GameId, Player, ProceduralModifier};
use crate::game::Phase;
use crate::{GameError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Shared board state; no rule reads it yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    #[serde(default)]
    pub environment: Option<Card>,
    #[serde(default)]
    pub effects: Vec<ProceduralModifier>,
}

/// Complete state of one game
///
/// This is exactly what gets persisted: the JSON document of a game is this
/// struct with camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: GameId,

    /// Fixed seating order; index 0 acts first
    pub players: [Player; 2],

    pub current_player_index: usize,

    /// Starts at 1, +1 per full phase cycle
    pub turn: u32,

    pub phase: Phase,

    #[serde(default)]
    pub battlefield: Battlefield,

    /// Counter behind creature and trait ids
    #[serde(default)]
    next_entity_id: u32,
}

impl GameState {
    pub fn new(id: GameId, players: [Player; 2]) -> Self {
        GameState {
            id,
            players,
            current_player_index: 0,
            turn: 1,
            phase: Phase::Main,
            battlefield: Battlefield::default(),
            next_entity_id: 0,
        }
    }

    /// Parse a persisted document
    ///
    /// Documents written before the id counter existed get it bumped past
    /// every id already in use. Documents that break creature invariants, or
    /// whose id counter has no room left, are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut game: GameState = serde_json::from_str(json)?;
        if game.current_player_index > 1 {
            return Err(invalid_document(format!(
                "currentPlayerIndex {} out of range in game {}",
                game.current_player_index, game.id
            )));
        }

        for player in &game.players {
            for creature in &player.creatures {
                if let Err(err) = creature.validate_mutations(&creature.applied_mutations) {
                    return Err(invalid_document(format!(
                        "creature {} of {} in game {}: {err}",
                        creature.id, player.id, game.id
                    )));
                }
            }
        }

        game.sync_entity_counter();
        if game.next_entity_id == u32::MAX {
            return Err(invalid_document(format!(
                "entity id counter exhausted in game {}",
                game.id
            )));
        }
        Ok(game)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player_index]
    }

    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// For 2-player games, the index of the player not currently acting
    pub fn other_player_idx(&self) -> usize {
        1 - self.current_player_index
    }

    /// Hand the turn to the other player
    pub fn next_turn(&mut self) {
        self.current_player_index = self.other_player_idx();
        self.turn += 1;
    }

    fn next_id(&mut self) -> Result<u32> {
        let id = self.next_entity_id;
        self.next_entity_id = id
            .checked_add(1)
            .ok_or_else(|| GameError::IdsExhausted(self.id.clone()))?;
        Ok(id)
    }

    pub fn next_creature_id(&mut self) -> Result<CreatureId> {
        Ok(CreatureId::new(format!("creature_{}", self.next_id()?)))
    }

    /// Fresh id for a procedural trait, e.g. `enhanced_4`
    pub fn next_trait_id(&mut self, prefix: &str) -> Result<String> {
        Ok(format!("{prefix}_{}", self.next_id()?))
    }

    fn sync_entity_counter(&mut self) {
        let highest = self
            .players
            .iter()
            .flat_map(|p| p.creatures.iter())
            .flat_map(|c| {
                std::iter::once(c.id.as_str())
                    .chain(c.procedural_traits.iter().map(|t| t.id.as_str()))
            })
            .filter_map(numeric_suffix)
            .max();
        if let Some(highest) = highest {
            let after = highest.checked_add(1).unwrap_or(u32::MAX);
            self.next_entity_id = self.next_entity_id.max(after);
        }
    }
}

fn invalid_document(message: String) -> GameError {
    serde_json::Error::custom(message).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CreatureInstance, Position};
    use crate::loader::sample_cards;

    fn two_players() -> [Player; 2] {
        [
            Player::new("player1", "Player 1", 20, 3, 3),
            Player::new("player2", "Player 2", 20, 3, 3),
        ]
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new(GameId::new("g1"), two_players());
        assert_eq!(game.turn, 1);
        assert_eq!(game.phase, Phase::Main);
        assert_eq!(game.current_player().id, "player1");
        assert_eq!(game.other_player_idx(), 1);
    }

    #[test]
    fn test_next_turn_swaps_players() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        game.next_turn();
        assert_eq!(game.turn, 2);
        assert_eq!(game.current_player().id, "player2");
        game.next_turn();
        assert_eq!(game.turn, 3);
        assert_eq!(game.current_player().id, "player1");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        let a = game.next_creature_id().unwrap();
        let b = game.next_creature_id().unwrap();
        let t = game.next_trait_id("enhanced").unwrap();
        assert_eq!(a, "creature_0");
        assert_eq!(b, "creature_1");
        assert_eq!(t, "enhanced_2");
    }

    #[test]
    fn test_document_shape() {
        let game = GameState::new(GameId::new("g1"), two_players());
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["currentPlayerIndex"], 0);
        assert_eq!(json["phase"], "main");
        assert_eq!(json["players"][1]["dnaPoints"], 3);
        assert!(json["battlefield"]["environment"].is_null());
    }

    #[test]
    fn test_counter_recovered_from_legacy_document() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        let creature = CreatureInstance::summon(
            CreatureId::new("creature_41"),
            &sample_cards::grub(),
            Some(Position::new(10.0, 10.0)),
        )
        .unwrap();
        game.players[1].creatures.push(creature);

        let mut json = serde_json::to_value(&game).unwrap();
        json.as_object_mut().unwrap().remove("nextEntityId");
        let mut loaded = GameState::from_json(&json.to_string()).unwrap();
        assert_eq!(loaded.next_creature_id().unwrap(), "creature_42");
    }

    #[test]
    fn test_counter_without_room_rejected() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        let creature = CreatureInstance::summon(
            CreatureId::new("creature_4294967295"),
            &sample_cards::grub(),
            Some(Position::new(10.0, 10.0)),
        )
        .unwrap();
        game.players[0].creatures.push(creature);

        let mut json = serde_json::to_value(&game).unwrap();
        json.as_object_mut().unwrap().remove("nextEntityId");
        let err = GameState::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, GameError::SerializationError(_)));

        let fresh = GameState::new(GameId::new("g2"), two_players());
        let mut json = serde_json::to_value(&fresh).unwrap();
        json["nextEntityId"] = u32::MAX.into();
        let err = GameState::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, GameError::SerializationError(_)));
    }

    #[test]
    fn test_last_id_is_an_error_not_a_panic() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        game.next_entity_id = u32::MAX - 1;
        assert_eq!(game.next_creature_id().unwrap(), "creature_4294967294");
        let err = game.next_trait_id("adaptive").unwrap_err();
        assert!(matches!(err, GameError::IdsExhausted(_)));
        assert_eq!(game.next_entity_id, u32::MAX);
    }

    #[test]
    fn test_creature_invariants_checked_on_load() {
        let mut game = GameState::new(GameId::new("g1"), two_players());
        let mut creature = CreatureInstance::summon(
            CreatureId::new("creature_0"),
            &sample_cards::spore(),
            Some(Position::new(10.0, 10.0)),
        )
        .unwrap();
        // Spore has no attack slot for spikes
        creature.applied_mutations.push(sample_cards::spikes());
        game.players[1].creatures.push(creature);

        let json = serde_json::to_string(&game).unwrap();
        let err = GameState::from_json(&json).unwrap_err();
        assert!(matches!(err, GameError::SerializationError(_)));
        assert!(err.to_string().contains("creature_0"));

        let mut grub =
            CreatureInstance::summon(CreatureId::new("creature_1"), &sample_cards::grub(), None)
                .unwrap();
        grub.applied_mutations = vec![sample_cards::spikes(), sample_cards::spikes()];
        game.players[1].creatures = vec![grub];
        let json = serde_json::to_string(&game).unwrap();
        assert!(GameState::from_json(&json).is_err());
    }

    #[test]
    fn test_bad_player_index_rejected() {
        let game = GameState::new(GameId::new("g1"), two_players());
        let mut json = serde_json::to_value(&game).unwrap();
        json["currentPlayerIndex"] = 2.into();
        let err = GameState::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, GameError::SerializationError(_)));
    }
}
