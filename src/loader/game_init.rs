//! Game initialization from the card catalog
//!
//! Deals opening hands and builds decks for a fresh two-player game.

use crate::config::GameRules;
use crate::core::{Card, GameId, Player, RandomSource};
use crate::game::GameState;
use crate::loader::CardCatalog;

/// Game builder that deals from a catalog
pub struct GameInitializer<'a> {
    catalog: &'a CardCatalog,
    rules: &'a GameRules,
}

impl<'a> GameInitializer<'a> {
    pub fn new(catalog: &'a CardCatalog, rules: &'a GameRules) -> Self {
        GameInitializer { catalog, rules }
    }

    /// Create a two-player game at turn 1, main phase, player 1 to act
    pub fn init_game(&self, id: GameId, rng: &mut dyn RandomSource) -> GameState {
        let players = [
            self.init_player("player1", "Player 1", rng),
            self.init_player("player2", "Player 2", rng),
        ];
        GameState::new(id, players)
    }

    fn init_player(&self, id: &str, name: &str, rng: &mut dyn RandomSource) -> Player {
        let mut player = Player::new(
            id,
            name,
            self.rules.starting_health,
            self.rules.starting_energy,
            self.rules.starting_dna_points,
        );
        player.hand = self.opening_hand(rng);
        player.deck = self.shuffled_deck(rng);
        player
    }

    /// One random card per entry of the hand pattern
    ///
    /// Entries with no card of their type in the catalog are skipped, so the
    /// hand can come out short.
    pub fn opening_hand(&self, rng: &mut dyn RandomSource) -> Vec<Card> {
        let mut hand = Vec::with_capacity(self.rules.opening_hand.len());
        for &card_type in &self.rules.opening_hand {
            let candidates: Vec<&Card> = self.catalog.of_type(card_type).collect();
            if candidates.is_empty() {
                continue;
            }
            hand.push(candidates[rng.index(candidates.len())].clone());
        }
        hand
    }

    /// The whole catalog shuffled, minus the first `deck_discard` cards
    ///
    /// The dropped cards stand in for the opening hand; they are not the
    /// same cards that were dealt.
    pub fn shuffled_deck(&self, rng: &mut dyn RandomSource) -> Vec<Card> {
        let mut deck = self.catalog.cards().to_vec();
        rng.shuffle_cards(&mut deck);
        deck.split_off(self.rules.deck_discard.min(deck.len()))
    }
}
