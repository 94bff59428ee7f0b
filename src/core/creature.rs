//! Creature instances on the board

use crate::core::{BaseStats, Card, CardType, CreatureCard, CreatureId, ProceduralModifier};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Board coordinates of a summoned creature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A summoned creature
///
/// `base_card` is a copy of the card it was summoned from. Applied mutations,
/// evolution history, abilities and traits only ever grow; `is_evolved` flips
/// to true at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureInstance {
    pub id: CreatureId,
    pub base_card: Card,
    pub current_stats: BaseStats,
    #[serde(default)]
    pub applied_mutations: Vec<Card>,
    #[serde(default)]
    pub evolution_history: Vec<Card>,
    #[serde(default)]
    pub active_abilities: Vec<String>,
    #[serde(default)]
    pub procedural_traits: Vec<ProceduralModifier>,
    #[serde(default)]
    pub is_evolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl CreatureInstance {
    /// Instantiate a creature from a base creature card
    ///
    /// Returns `None` if the card is not a base creature.
    pub fn summon(id: CreatureId, card: &Card, position: Option<Position>) -> Option<Self> {
        let template = card.as_creature()?;
        Some(CreatureInstance {
            id,
            base_card: card.clone(),
            current_stats: template.stats,
            applied_mutations: Vec::new(),
            evolution_history: Vec::new(),
            active_abilities: Vec::new(),
            procedural_traits: Vec::new(),
            is_evolved: false,
            position,
        })
    }

    /// Creature template of the embedded base card
    pub fn template(&self) -> Option<&CreatureCard> {
        self.base_card.as_creature()
    }

    /// Mutation types applied so far, in application order
    pub fn mutation_types(&self) -> impl Iterator<Item = &str> {
        self.applied_mutations
            .iter()
            .filter_map(|card| card.as_mutation())
            .map(|mutation| mutation.mutation_type.as_str())
    }

    pub fn has_mutation_type(&self, mutation_type: &str) -> bool {
        self.mutation_types().any(|t| t == mutation_type)
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.active_abilities.iter().any(|a| a == ability)
    }

    /// Check a full mutation list against this creature's template
    ///
    /// Every card must be a mutation whose slot the template has, mutation
    /// types must be unique, and the list must fit `maxMutations`.
    pub fn validate_mutations(&self, mutations: &[Card]) -> Result<()> {
        let Some(template) = self.template() else {
            return Err(GameError::InvalidCardType {
                expected: CardType::BaseCreature,
                found: self.base_card.card_type(),
            });
        };

        if mutations.len() > template.max_mutations as usize {
            return Err(GameError::MutationLimitReached(template.max_mutations));
        }

        let mut seen = HashSet::new();
        for card in mutations {
            let mutation = card.as_mutation().ok_or(GameError::InvalidCardType {
                expected: CardType::Mutation,
                found: card.card_type(),
            })?;
            if !template.has_slot(&mutation.target_slot) {
                return Err(GameError::IncompatibleSlot(mutation.target_slot.clone()));
            }
            if !seen.insert(mutation.mutation_type.as_str()) {
                return Err(GameError::DuplicateMutationType(
                    mutation.mutation_type.clone(),
                ));
            }
        }
        Ok(())
    }
}

/// Partial creature fields merged by debug tooling
///
/// Every field is optional; only the ones present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stats: Option<BaseStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_mutations: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution_history: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_abilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedural_traits: Option<Vec<ProceduralModifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_evolved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}
