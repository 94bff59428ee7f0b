//! Phase progression
//!
//! A game moves one phase per call to [`GameLoop::advance`]. Each phase's
//! effects apply to the player at `currentPlayerIndex` before the turn swap.

use crate::config::GameRules;
use crate::core::RandomSource;
use crate::game::evolution::{
    evolve, find_evolution, roll_evolution_trait, roll_procedural_modifiers,
};
use crate::game::{GameLogger, GameState, Phase};
use crate::loader::CardCatalog;

/// Drives a borrowed game through its phases
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    catalog: &'a CardCatalog,
    rules: &'a GameRules,
    rng: &'a mut dyn RandomSource,
    logger: &'a GameLogger,
}

impl<'a> GameLoop<'a> {
    pub fn new(
        game: &'a mut GameState,
        catalog: &'a CardCatalog,
        rules: &'a GameRules,
        rng: &'a mut dyn RandomSource,
        logger: &'a GameLogger,
    ) -> Self {
        GameLoop {
            game,
            catalog,
            rules,
            rng,
            logger,
        }
    }

    /// Resolve the current phase and move to the next one
    ///
    /// Returns the phase the game is in afterwards.
    pub fn advance(&mut self) -> Phase {
        let from = self.game.phase;
        match from {
            Phase::Main => self.resolve_main(),
            Phase::Mutation => self.resolve_mutation(),
            Phase::Combat => self.resolve_combat(),
            Phase::End => self.resolve_end(),
        }

        self.game.phase = from.next();
        if from.ends_turn() {
            self.game.next_turn();
        }

        self.logger.normal(
            "phase",
            &format!(
                "{}: {} -> {} (turn {}, {} to act)",
                self.game.id,
                from,
                self.game.phase,
                self.game.turn,
                self.game.current_player().id
            ),
        );
        self.game.phase
    }

    /// Advance `times` phases, returning the final phase
    pub fn advance_by(&mut self, times: usize) -> Phase {
        for _ in 0..times {
            self.advance();
        }
        self.game.phase
    }

    fn resolve_main(&mut self) {
        if self.game.turn <= 1 {
            return;
        }
        let player = self.game.current_player_mut();
        let player_id = player.id.clone();
        if let Some(card) = player.draw() {
            self.logger
                .normal("draw", &format!("{player_id} draws {}", card.name));
        }
    }

    fn resolve_mutation(&mut self) {
        let idx = self.game.current_player_index;
        for slot in 0..self.game.players[idx].creatures.len() {
            self.check_evolution(idx, slot);

            let creature = &mut self.game.players[idx].creatures[slot];
            if roll_procedural_modifiers(creature, &mut *self.rng) {
                self.logger
                    .normal("procedural", &format!("{} gained poison", creature.id));
            }
        }
    }

    fn check_evolution(&mut self, player_idx: usize, slot: usize) {
        let creature = &mut self.game.players[player_idx].creatures[slot];
        let Some((card, evolution)) = find_evolution(creature, self.catalog) else {
            return;
        };
        evolve(creature, card, evolution);
        self.logger.minimal(
            "evolution",
            &format!("{} evolved into {}", creature.id, card.name),
        );

        let chance = self.rules.evolution_trait_chance;
        let Some(granted) = roll_evolution_trait(&mut *self.rng, chance) else {
            return;
        };
        let trait_id = match self.game.next_trait_id(granted.id_prefix()) {
            Ok(id) => id,
            Err(err) => {
                self.logger.minimal("evolution", &format!("trait not granted: {err}"));
                return;
            }
        };
        let modifier = granted.into_modifier(trait_id);
        let creature = &mut self.game.players[player_idx].creatures[slot];
        self.logger.normal(
            "evolution",
            &format!("{} gained trait {}", creature.id, modifier.name),
        );
        creature.procedural_traits.push(modifier);
    }

    fn resolve_combat(&mut self) {
        let id = &self.game.id;
        self.logger
            .verbose("phase", &format!("{id}: combat is not resolved"));
    }

    fn resolve_end(&mut self) {
        let (regen, cap) = (self.rules.resource_regen, self.rules.resource_cap);
        self.game.current_player_mut().regenerate(regen, cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BaseStats, CardKind, CreatureId, CreatureInstance, GameId, GameRng, Player, Position,
    };
    use crate::loader::sample_cards;

    fn fresh_game() -> GameState {
        GameState::new(
            GameId::new("g1"),
            [
                Player::new("player1", "Player 1", 20, 3, 3),
                Player::new("player2", "Player 2", 20, 3, 3),
            ],
        )
    }

    fn run(game: &mut GameState, times: usize, seed: u64) {
        let catalog = CardCatalog::sample();
        let rules = GameRules::default();
        let logger = GameLogger::with_verbosity(crate::game::VerbosityLevel::Silent);
        let mut rng = GameRng::with_seed(seed);
        GameLoop::new(game, &catalog, &rules, &mut rng, &logger).advance_by(times);
    }

    #[test]
    fn test_full_cycle() {
        let mut game = fresh_game();
        let catalog = CardCatalog::sample();
        let rules = GameRules::default();
        let logger = GameLogger::new();
        let mut rng = GameRng::with_seed(1);
        let mut game_loop = GameLoop::new(&mut game, &catalog, &rules, &mut rng, &logger);

        assert_eq!(game_loop.advance(), Phase::Mutation);
        assert_eq!(game_loop.advance(), Phase::Combat);
        assert_eq!(game_loop.advance(), Phase::End);
        assert_eq!(game_loop.game.turn, 1);
        assert_eq!(game_loop.advance(), Phase::Main);
        assert_eq!(game_loop.game.turn, 2);
        assert_eq!(game_loop.game.current_player_index, 1);
    }

    #[test]
    fn test_end_regenerates_acting_player_only() {
        let mut game = fresh_game();
        run(&mut game, 4, 1);
        assert_eq!(game.players[0].energy, 4);
        assert_eq!(game.players[0].dna_points, 4);
        assert_eq!(game.players[1].energy, 3);
    }

    #[test]
    fn test_resources_capped() {
        let mut game = fresh_game();
        game.players[0].energy = 10;
        game.players[0].dna_points = 9;
        run(&mut game, 4, 1);
        assert_eq!(game.players[0].energy, 10);
        assert_eq!(game.players[0].dna_points, 10);
    }

    #[test]
    fn test_draw_skipped_on_first_turn() {
        let mut game = fresh_game();
        game.players[0].deck = vec![sample_cards::grub()];
        run(&mut game, 1, 1);
        assert!(game.players[0].hand.is_empty());
        assert_eq!(game.players[0].deck.len(), 1);
    }

    #[test]
    fn test_draw_from_back_of_deck() {
        let mut game = fresh_game();
        game.players[1].deck = vec![sample_cards::grub(), sample_cards::spikes()];
        // Turn 2 belongs to player2
        run(&mut game, 5, 1);
        assert_eq!(game.players[1].hand.len(), 1);
        assert_eq!(game.players[1].hand[0].id, "spikes_001");
        assert_eq!(game.players[1].deck.len(), 1);
    }

    #[test]
    fn test_evolution_on_mutation_phase() {
        let mut game = fresh_game();
        let mut grub = CreatureInstance::summon(
            CreatureId::new("creature_0"),
            &sample_cards::grub(),
            Some(Position::new(100.0, 100.0)),
        )
        .unwrap();
        grub.applied_mutations = vec![sample_cards::spikes(), sample_cards::carapace()];
        game.players[0].creatures.push(grub);
        game.phase = Phase::Mutation;

        run(&mut game, 1, 7);

        let creature = &game.players[0].creatures[0];
        assert!(creature.is_evolved);
        assert_eq!(creature.current_stats.attack, 5);
        assert_eq!(creature.current_stats.health, 6);
        assert_eq!(creature.current_stats.armor, 2);
        assert_eq!(creature.evolution_history[0].id, "beetle_warrior_001");
        assert!(creature.procedural_traits.len() <= 1);
        assert_eq!(game.phase, Phase::Combat);
    }

    #[test]
    fn test_other_players_creatures_not_resolved() {
        let mut game = fresh_game();
        let mut grub =
            CreatureInstance::summon(CreatureId::new("creature_0"), &sample_cards::grub(), None)
                .unwrap();
        grub.applied_mutations = vec![sample_cards::spikes(), sample_cards::carapace()];
        game.players[1].creatures.push(grub);
        game.phase = Phase::Mutation;

        run(&mut game, 1, 7);
        assert!(!game.players[1].creatures[0].is_evolved);
    }

    #[test]
    fn test_earliest_catalog_evolution_applied_once() {
        let mut spiked = sample_cards::beetle_warrior();
        spiked.id = "spiked_grub_001".into();
        if let CardKind::Evolution(evolution) = &mut spiked.kind {
            evolution.required_mutations = vec!["spikes".into()];
            evolution.evolved_stats = BaseStats::new(3, 4, 1);
        }
        let mut cards = sample_cards::all();
        cards.insert(4, spiked);
        let catalog = CardCatalog::new(cards).unwrap();

        let mut game = fresh_game();
        let mut grub =
            CreatureInstance::summon(CreatureId::new("creature_0"), &sample_cards::grub(), None)
                .unwrap();
        grub.applied_mutations = vec![sample_cards::spikes(), sample_cards::carapace()];
        game.players[0].creatures.push(grub);
        game.phase = Phase::Mutation;

        let rules = GameRules::default();
        let logger = GameLogger::with_verbosity(crate::game::VerbosityLevel::Silent);
        let mut rng = GameRng::with_seed(3);
        let mut game_loop = GameLoop::new(&mut game, &catalog, &rules, &mut rng, &logger);
        // Three of player1's mutation phases
        game_loop.advance();
        game_loop.advance_by(16);
        assert_eq!(game_loop.game.turn, 5);
        assert_eq!(game_loop.game.phase, Phase::Combat);

        let creature = &game.players[0].creatures[0];
        assert_eq!(creature.evolution_history.len(), 1);
        assert_eq!(creature.evolution_history[0].id, "spiked_grub_001");
        assert_eq!(creature.current_stats, BaseStats::new(3, 4, 1));
    }
}
