//! Player representation

use crate::core::{Card, CreatureInstance, PlayerId};
use serde::{Deserialize, Serialize};

/// Represents a player in the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    /// Display name
    pub name: String,

    pub health: i32,

    /// Spent to summon creatures
    pub energy: u32,

    /// Spent to apply mutations
    pub dna_points: u32,

    pub hand: Vec<Card>,

    /// Draw pile; the last card is the top
    pub deck: Vec<Card>,

    pub creatures: Vec<CreatureInstance>,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        health: i32,
        energy: u32,
        dna_points: u32,
    ) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            health,
            energy,
            dna_points,
            hand: Vec::new(),
            deck: Vec::new(),
            creatures: Vec::new(),
        }
    }

    /// Move the top card of the deck into the hand
    pub fn draw(&mut self) -> Option<&Card> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        self.hand.last()
    }

    /// Index of the first hand card with this id
    pub fn find_in_hand(&self, card_id: &str) -> Option<usize> {
        self.hand.iter().position(|card| card.id == card_id)
    }

    pub fn creature(&self, id: &str) -> Option<&CreatureInstance> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: &str) -> Option<&mut CreatureInstance> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    /// Regain energy and DNA points, never exceeding `cap`
    pub fn regenerate(&mut self, amount: u32, cap: u32) {
        self.energy = self.energy.saturating_add(amount).min(cap);
        self.dna_points = self.dna_points.saturating_add(amount).min(cap);
    }
}
