//! Engine configuration

use crate::core::CardType;
use crate::game::{OutputFormat, OutputMode, VerbosityLevel};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunable game rules
///
/// Defaults reproduce the standard game. Every field may be omitted from a
/// rules file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRules {
    pub starting_health: i32,
    pub starting_energy: u32,
    pub starting_dna_points: u32,
    /// Upper bound for energy and DNA points
    pub resource_cap: u32,
    /// Energy and DNA regained at the end phase
    pub resource_regen: u32,
    pub board_width: f64,
    pub board_height: f64,
    /// Minimum distance between two creatures of the same player
    pub min_creature_distance: f64,
    /// One card of each listed type is dealt into the opening hand
    pub opening_hand: Vec<CardType>,
    /// Cards dropped from the shuffled catalog when building a deck
    pub deck_discard: usize,
    /// Percent chance that an evolution also grants a procedural trait
    pub evolution_trait_chance: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            starting_health: 20,
            starting_energy: 3,
            starting_dna_points: 3,
            resource_cap: 10,
            resource_regen: 1,
            board_width: 800.0,
            board_height: 200.0,
            min_creature_distance: 100.0,
            opening_hand: vec![
                CardType::BaseCreature,
                CardType::Mutation,
                CardType::BaseCreature,
                CardType::Mutation,
                CardType::BaseCreature,
            ],
            deck_discard: 5,
            evolution_trait_chance: 30,
        }
    }
}

impl GameRules {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Everything needed to open a [`GameEngine`](crate::GameEngine)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding one `<game_id>.json` per game
    pub storage_dir: PathBuf,
    /// Seed for the random source; `None` means OS entropy
    pub seed: Option<u64>,
    /// Alternative card catalog (JSON); the sample set otherwise
    pub catalog_path: Option<PathBuf>,
    pub rules: GameRules,
    pub verbosity: VerbosityLevel,
    pub output_mode: OutputMode,
    pub output_format: OutputFormat,
}

impl EngineConfig {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        EngineConfig {
            storage_dir: storage_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            storage_dir: PathBuf::from("storage/games"),
            seed: None,
            catalog_path: None,
            rules: GameRules::default(),
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            output_format: OutputFormat::default(),
        }
    }
}
