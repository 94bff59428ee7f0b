//! The game engine service
//!
//! One [`GameEngine`] is built at process start and shared by reference (or
//! `Arc`) with every request handler. It owns the card catalog, the rules,
//! the random source, the logger and the table of active games.
//!
//! Every mutating operation works on a copy of the game: validate, apply,
//! save to disk, and only then replace the in-memory state. A failure at any
//! step leaves both memory and disk untouched.
//!
//! Games are locked individually. Requests for different games run in
//! parallel; requests for the same game are applied one at a time.

use crate::config::EngineConfig;
use crate::core::{CreatureUpdate, GameId, GameRng, Position, RandomSource};
use crate::game::{GameAction, GameLogger, GameLoop, GameState};
use crate::loader::{CardCatalog, GameInitializer};
use crate::store::GameStore;
use crate::{GameError, Result};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

type GameSlot = Arc<Mutex<GameState>>;

pub struct GameEngine {
    config: EngineConfig,
    catalog: CardCatalog,
    store: GameStore,
    games: RwLock<FxHashMap<GameId, GameSlot>>,
    rng: Mutex<Box<dyn RandomSource>>,
    logger: GameLogger,
}

impl GameEngine {
    /// Build an engine and load every saved game from the storage directory
    ///
    /// Documents that fail to parse are skipped with a warning.
    pub fn open(config: EngineConfig) -> Result<Self> {
        let mut logger = GameLogger::with_verbosity(config.verbosity);
        logger.set_output_mode(config.output_mode);
        logger.set_output_format(config.output_format);

        let catalog = match &config.catalog_path {
            Some(path) => CardCatalog::load_from_file(path)?,
            None => CardCatalog::sample(),
        };
        let store = GameStore::open(&config.storage_dir)?;

        let report = store.load_all()?;
        for (path, err) in &report.skipped {
            logger.minimal(
                "store",
                &format!("skipping unreadable game file {}: {err}", path.display()),
            );
        }
        let games: FxHashMap<GameId, GameSlot> = report
            .games
            .into_iter()
            .map(|game| (game.id.clone(), Arc::new(Mutex::new(game))))
            .collect();
        logger.normal(
            "store",
            &format!(
                "loaded {} game(s) from {}",
                games.len(),
                store.dir().display()
            ),
        );

        let rng: Box<dyn RandomSource> = Box::new(GameRng::from_seed_option(config.seed));
        Ok(GameEngine {
            config,
            catalog,
            store,
            games: RwLock::new(games),
            rng: Mutex::new(rng),
            logger,
        })
    }

    /// Replace the random source (scripted sources in tests)
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    /// Ids of the games currently held in memory, sorted
    pub fn game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games_read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Start a fresh game, replacing any game with the same id
    pub fn create_game(&self, game_id: &str) -> Result<GameState> {
        let id = validate_id(game_id)?;
        let game = {
            let mut rng = self.rng();
            GameInitializer::new(&self.catalog, &self.config.rules)
                .init_game(id.clone(), &mut **rng)
        };

        // The slot is locked before the write so a concurrent request on the
        // same id cannot interleave between disk and memory
        let mut games = self.games_write();
        let (slot, inserted) = match games.get(&id) {
            Some(slot) => (Arc::clone(slot), false),
            None => {
                let slot = Arc::new(Mutex::new(game.clone()));
                games.insert(id.clone(), Arc::clone(&slot));
                (slot, true)
            }
        };
        // A fresh slot is uncontended, so it is taken before the table is released
        let mut current = if inserted {
            let current = lock_game(&slot);
            drop(games);
            current
        } else {
            drop(games);
            lock_game(&slot)
        };
        if let Err(err) = self.store.save(&game) {
            drop(current);
            if inserted {
                let mut games = self.games_write();
                if games.get(&id).is_some_and(|held| Arc::ptr_eq(held, &slot)) {
                    games.remove(&id);
                }
            }
            return Err(err);
        }
        *current = game.clone();
        drop(current);

        self.logger.minimal(
            "game",
            &format!(
                "created {id}: {} and {} dealt {} and {} cards",
                game.players[0].id,
                game.players[1].id,
                game.players[0].hand.len(),
                game.players[1].hand.len()
            ),
        );
        Ok(game)
    }

    /// Current state of a game, loading it from disk if needed
    pub fn get_game(&self, game_id: &str) -> Result<GameState> {
        let slot = self.slot(game_id)?;
        let game = lock_game(&slot).clone();
        Ok(game)
    }

    /// Resolve the current phase and move the game to the next one
    pub fn advance_phase(&self, game_id: &str) -> Result<GameState> {
        self.update(game_id, |game| {
            let mut rng = self.rng();
            GameLoop::new(
                game,
                &self.catalog,
                &self.config.rules,
                &mut **rng,
                &self.logger,
            )
            .advance();
            Ok(())
        })
    }

    pub fn summon_creature(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: &str,
        position: Position,
    ) -> Result<GameState> {
        self.update(game_id, |game| {
            let creature_id =
                game.summon_creature(player_id, card_id, position, &self.config.rules)?;
            self.logger.normal(
                "summon",
                &format!(
                    "{player_id} summoned {card_id} as {creature_id} at ({}, {})",
                    position.x, position.y
                ),
            );
            Ok(())
        })
    }

    pub fn apply_mutation(
        &self,
        game_id: &str,
        player_id: &str,
        creature_id: &str,
        mutation_card_id: &str,
    ) -> Result<GameState> {
        self.update(game_id, |game| {
            game.apply_mutation(player_id, creature_id, mutation_card_id)?;
            self.logger.normal(
                "mutation",
                &format!("{player_id} applied {mutation_card_id} to {creature_id}"),
            );
            Ok(())
        })
    }

    /// Overwrite creature fields, ignoring turn and phase
    pub fn update_creature(
        &self,
        game_id: &str,
        player_id: &str,
        creature_id: &str,
        update: CreatureUpdate,
    ) -> Result<GameState> {
        self.update(game_id, |game| {
            game.update_creature(player_id, creature_id, update)?;
            self.logger
                .verbose("mutation", &format!("updated {creature_id} of {player_id}"));
            Ok(())
        })
    }

    /// Dispatch a request in its wire form
    pub fn execute(&self, game_id: &str, action: GameAction) -> Result<GameState> {
        match action {
            GameAction::AdvancePhase => self.advance_phase(game_id),
            GameAction::Summon {
                player_id,
                card_id,
                position,
            } => self.summon_creature(game_id, player_id.as_str(), &card_id, position),
            GameAction::Mutate {
                player_id,
                creature_id,
                mutation_card_id,
            } => self.apply_mutation(
                game_id,
                player_id.as_str(),
                creature_id.as_str(),
                &mutation_card_id,
            ),
        }
    }

    /// Apply `f` to a working copy, persist it, then publish it
    fn update<F>(&self, game_id: &str, f: F) -> Result<GameState>
    where
        F: FnOnce(&mut GameState) -> Result<()>,
    {
        let slot = self.slot(game_id)?;
        let mut current = lock_game(&slot);
        let mut working = current.clone();
        f(&mut working)?;
        self.store.save(&working)?;
        self.logger
            .verbose("store", &format!("saved {}", working.id));
        *current = working.clone();
        Ok(working)
    }

    fn slot(&self, game_id: &str) -> Result<GameSlot> {
        let id = validate_id(game_id)?;
        if let Some(slot) = self.games_read().get(&id) {
            return Ok(Arc::clone(slot));
        }

        let game = self
            .store
            .load(&id)?
            .ok_or_else(|| GameError::NotFound(format!("game {id}")))?;
        self.logger
            .verbose("store", &format!("loaded {id} from disk"));

        // Another request may have loaded it meanwhile; keep whichever came first
        let mut games = self.games_write();
        let slot = games
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(game)));
        Ok(Arc::clone(slot))
    }

    fn games_read(&self) -> std::sync::RwLockReadGuard<'_, FxHashMap<GameId, GameSlot>> {
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn games_write(&self) -> std::sync::RwLockWriteGuard<'_, FxHashMap<GameId, GameSlot>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("storage_dir", &self.config.storage_dir)
            .field("cards", &self.catalog.len())
            .field("games", &self.games_read().len())
            .finish()
    }
}

// State is only published after a full successful update, so a poisoned
// lock still guards a consistent game
fn lock_game(slot: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn validate_id(game_id: &str) -> Result<GameId> {
    let id = GameId::new(game_id);
    if !id.is_valid() {
        return Err(GameError::InvalidGameId(game_id.to_string()));
    }
    Ok(id)
}
