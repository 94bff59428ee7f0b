//! Player actions: summoning creatures and applying mutations
//!
//! Every action validates completely before touching state, so a rejected
//! action leaves the game exactly as it was.

use crate::config::GameRules;
use crate::core::{CardType, CreatureId, CreatureInstance, CreatureUpdate, PlayerId, Position};
use crate::game::GameState;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Requests a player (or the phase clock) can make against a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GameAction {
    /// Resolve the current phase and move to the next
    AdvancePhase,

    /// Summon a base creature from hand onto the board
    #[serde(rename_all = "camelCase")]
    Summon {
        player_id: PlayerId,
        card_id: String,
        position: Position,
    },

    /// Apply a mutation card from hand to one of the player's creatures
    #[serde(rename_all = "camelCase")]
    Mutate {
        player_id: PlayerId,
        creature_id: CreatureId,
        mutation_card_id: String,
    },
}

impl GameState {
    fn check_turn(&self, player_id: &str) -> Result<()> {
        if self.current_player().id != player_id {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Summon a creature from the acting player's hand
    ///
    /// Checks, in order: turn, phase, card in hand, card type, energy,
    /// board bounds, spacing from the player's other creatures.
    pub fn summon_creature(
        &mut self,
        player_id: &str,
        card_id: &str,
        position: Position,
        rules: &GameRules,
    ) -> Result<CreatureId> {
        self.check_turn(player_id)?;

        if !self.phase.allows_summon() {
            return Err(GameError::WrongPhase {
                action: "summon creatures",
                phase: self.phase,
            });
        }

        let player = self.current_player();
        let hand_idx = player
            .find_in_hand(card_id)
            .ok_or_else(|| GameError::CardNotFound(card_id.to_string()))?;
        let card = &player.hand[hand_idx];

        if !card.is_type(CardType::BaseCreature) {
            return Err(GameError::InvalidCardType {
                expected: CardType::BaseCreature,
                found: card.card_type(),
            });
        }

        if player.energy < card.cost {
            return Err(GameError::InsufficientResources {
                resource: "energy",
                required: card.cost,
                available: player.energy,
            });
        }

        let in_bounds = (0.0..=rules.board_width).contains(&position.x)
            && (0.0..=rules.board_height).contains(&position.y);
        if !in_bounds {
            return Err(GameError::InvalidPosition(position));
        }

        if let Some(neighbor) = player.creatures.iter().find(|existing| {
            existing
                .position
                .is_some_and(|p| p.distance_to(&position) < rules.min_creature_distance)
        }) {
            return Err(GameError::PositionConflict(neighbor.id.to_string()));
        }

        // Validation done; commit
        let creature_id = self.next_creature_id()?;
        let player = self.current_player_mut();
        let card = player.hand.remove(hand_idx);
        player.energy -= card.cost;
        let creature = CreatureInstance::summon(creature_id.clone(), &card, Some(position))
            .ok_or(GameError::InvalidCardType {
                expected: CardType::BaseCreature,
                found: card.card_type(),
            })?;
        player.creatures.push(creature);

        Ok(creature_id)
    }

    /// Apply a mutation card from the acting player's hand to a creature
    ///
    /// Checks, in order: turn, phase, card in hand, card type, DNA points,
    /// target creature, DNA slot, mutation limit, duplicate mutation type.
    pub fn apply_mutation(
        &mut self,
        player_id: &str,
        creature_id: &str,
        mutation_card_id: &str,
    ) -> Result<()> {
        self.check_turn(player_id)?;

        if !self.phase.allows_mutation() {
            return Err(GameError::WrongPhase {
                action: "apply mutations",
                phase: self.phase,
            });
        }

        let player = self.current_player();
        let hand_idx = player
            .find_in_hand(mutation_card_id)
            .ok_or_else(|| GameError::CardNotFound(mutation_card_id.to_string()))?;
        let card = &player.hand[hand_idx];

        let mutation = card.as_mutation().ok_or(GameError::InvalidCardType {
            expected: CardType::Mutation,
            found: card.card_type(),
        })?;

        if player.dna_points < card.cost {
            return Err(GameError::InsufficientResources {
                resource: "DNA points",
                required: card.cost,
                available: player.dna_points,
            });
        }

        let creature = player
            .creature(creature_id)
            .ok_or_else(|| GameError::CreatureNotFound(creature_id.to_string()))?;
        let template = creature
            .template()
            .ok_or_else(|| GameError::IncompatibleSlot(mutation.target_slot.clone()))?;

        if !template.has_slot(&mutation.target_slot) {
            return Err(GameError::IncompatibleSlot(mutation.target_slot.clone()));
        }

        if creature.applied_mutations.len() >= template.max_mutations as usize {
            return Err(GameError::MutationLimitReached(template.max_mutations));
        }

        if creature.has_mutation_type(&mutation.mutation_type) {
            return Err(GameError::DuplicateMutationType(
                mutation.mutation_type.clone(),
            ));
        }

        // Validation done; commit
        let player = self.current_player_mut();
        let card = player.hand.remove(hand_idx);
        player.dna_points -= card.cost;
        let creature = player
            .creature_mut(creature_id)
            .ok_or_else(|| GameError::CreatureNotFound(creature_id.to_string()))?;
        if let Some(mutation) = card.as_mutation() {
            creature
                .current_stats
                .apply_changes(&mutation.primary_effect.stat_changes);
            creature
                .active_abilities
                .extend(mutation.primary_effect.abilities.iter().cloned());
        }
        creature.applied_mutations.push(card);

        Ok(())
    }

    /// Merge fields into an existing creature (debug tooling)
    ///
    /// Ignores turn and phase. A replacement mutation list must still respect
    /// the creature's slots, limit and type uniqueness, and an evolved
    /// creature stays evolved.
    pub fn update_creature(
        &mut self,
        player_id: &str,
        creature_id: &str,
        update: CreatureUpdate,
    ) -> Result<()> {
        let game_id = self.id.clone();
        let player = self
            .get_player_mut(player_id)
            .ok_or_else(|| GameError::NotFound(format!("player {player_id} in game {game_id}")))?;
        let creature = player.creature_mut(creature_id).ok_or_else(|| {
            GameError::NotFound(format!("creature {creature_id} of player {player_id}"))
        })?;

        if let Some(mutations) = &update.applied_mutations {
            creature.validate_mutations(mutations)?;
        }

        let CreatureUpdate {
            current_stats,
            applied_mutations,
            evolution_history,
            active_abilities,
            procedural_traits,
            is_evolved,
            position,
        } = update;

        if let Some(stats) = current_stats {
            creature.current_stats = stats;
        }
        if let Some(mutations) = applied_mutations {
            creature.applied_mutations = mutations;
        }
        if let Some(history) = evolution_history {
            creature.evolution_history = history;
        }
        if let Some(abilities) = active_abilities {
            creature.active_abilities = abilities;
        }
        if let Some(traits) = procedural_traits {
            creature.procedural_traits = traits;
        }
        if let Some(evolved) = is_evolved {
            creature.is_evolved |= evolved;
        }
        if let Some(position) = position {
            creature.position = Some(position);
        }

        Ok(())
    }
}
