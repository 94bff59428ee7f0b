//! Card catalog for looking up card definitions
//!
//! The catalog is fixed for the lifetime of an engine. Iteration order is the
//! order cards were listed in, which also decides which evolution wins when
//! several match.

use crate::core::{Card, CardType, EvolutionCard};
use crate::loader::sample_cards;
use crate::{GameError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk catalog: either a bare list or `{"cards": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Listing { cards: Vec<Card> },
    Bare(Vec<Card>),
}

#[derive(Serialize)]
struct CatalogListing<'a> {
    cards: &'a [Card],
}

#[derive(Debug, Clone)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_id: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Build a catalog; card ids must be unique
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        let mut by_id = FxHashMap::default();
        for (idx, card) in cards.iter().enumerate() {
            if by_id.insert(card.id.clone(), idx).is_some() {
                return Err(GameError::InvalidCatalog(format!(
                    "duplicate card id '{}'",
                    card.id
                )));
            }
        }
        Ok(CardCatalog { cards, by_id })
    }

    /// The built-in sample set
    pub fn sample() -> Self {
        let cards = sample_cards::all();
        let by_id = cards
            .iter()
            .enumerate()
            .map(|(idx, card)| (card.id.clone(), idx))
            .collect();
        CardCatalog { cards, by_id }
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cards = match serde_json::from_str(json)? {
            CatalogFile::Listing { cards } => cards,
            CatalogFile::Bare(cards) => cards,
        };
        if cards.is_empty() {
            return Err(GameError::InvalidCatalog("catalog has no cards".into()));
        }
        Self::new(cards)
    }

    /// Serialize as `{"cards": [...]}`
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&CatalogListing {
            cards: &self.cards,
        })?)
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.by_id.get(id).map(|&idx| &self.cards[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn of_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |card| card.is_type(card_type))
    }

    /// Evolution cards in catalog order
    pub fn evolutions(&self) -> impl Iterator<Item = (&Card, &EvolutionCard)> {
        self.cards
            .iter()
            .filter_map(|card| card.as_evolution().map(|evolution| (card, evolution)))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::sample()
    }
}
