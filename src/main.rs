//! Chyrralon - command line driver
//!
//! Every subcommand opens the engine on a storage directory, performs one
//! request, and prints the resulting JSON to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use chyrralon::{
    core::Position,
    game::{GameState, OutputFormat, VerbosityLevel},
    EngineConfig, GameEngine, GameRules,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verbosity level for log output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl From<LogFormat> for OutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => OutputFormat::Text,
            LogFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "chyrralon")]
#[command(about = "Chyrralon - mutation and evolution card game engine", long_about = None)]
struct Cli {
    /// Directory holding one JSON document per game
    #[arg(long, global = true, default_value = "storage/games")]
    storage_dir: PathBuf,

    /// Set random seed for deterministic play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Card catalog JSON file (default: built-in sample set)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Game rules JSON file (default: standard rules)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Verbosity level for log output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', global = true, default_value = "normal")]
    verbosity: VerbosityArg,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game (replaces an existing game with the same id)
    Create { game_id: String },

    /// Print the current state of a game
    Show { game_id: String },

    /// Advance a game by one or more phases
    Advance {
        game_id: String,

        /// Number of phases to advance
        #[arg(long, default_value_t = 1)]
        times: usize,
    },

    /// Summon a creature from the acting player's hand
    Summon {
        game_id: String,
        #[arg(long)]
        player: String,
        #[arg(long)]
        card: String,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },

    /// Apply a mutation card to one of the acting player's creatures
    Mutate {
        game_id: String,
        #[arg(long)]
        player: String,
        #[arg(long)]
        creature: String,
        #[arg(long)]
        card: String,
    },

    /// List the card catalog
    Cards,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine = open_engine(&cli)?;

    match cli.command {
        Commands::Create { game_id } => {
            print_game(&engine.create_game(&game_id).context("failed to create game")?)?
        }
        Commands::Show { game_id } => {
            print_game(&engine.get_game(&game_id).context("failed to load game")?)?
        }
        Commands::Advance { game_id, times } => {
            let mut state = engine.get_game(&game_id).context("failed to load game")?;
            for _ in 0..times {
                state = engine
                    .advance_phase(&game_id)
                    .context("failed to advance phase")?;
            }
            print_game(&state)?
        }
        Commands::Summon {
            game_id,
            player,
            card,
            x,
            y,
        } => print_game(
            &engine
                .summon_creature(&game_id, &player, &card, Position::new(x, y))
                .context("summon rejected")?,
        )?,
        Commands::Mutate {
            game_id,
            player,
            creature,
            card,
        } => print_game(
            &engine
                .apply_mutation(&game_id, &player, &creature, &card)
                .context("mutation rejected")?,
        )?,
        Commands::Cards => println!("{}", engine.catalog().to_json_pretty()?),
    }

    Ok(())
}

fn open_engine(cli: &Cli) -> Result<GameEngine> {
    let mut config = EngineConfig::new(&cli.storage_dir)
        .with_verbosity(cli.verbosity.0)
        .with_output_format(cli.log_format.into());
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(path) = &cli.catalog {
        config = config.with_catalog(path);
    }
    if let Some(path) = &cli.rules {
        let rules = GameRules::load_from_file(path)
            .with_context(|| format!("failed to read rules from {}", path.display()))?;
        config = config.with_rules(rules);
    }

    GameEngine::open(config).with_context(|| {
        format!(
            "failed to open game storage at {}",
            cli.storage_dir.display()
        )
    })
}

fn print_game(game: &GameState) -> Result<()> {
    println!("{}", game.to_json_pretty()?);
    Ok(())
}
