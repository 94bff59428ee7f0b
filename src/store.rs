//! On-disk game documents
//!
//! Each game lives in `<dir>/<game_id>.json` as a pretty-printed document,
//! rewritten whole on every save.

use crate::core::GameId;
use crate::game::GameState;
use crate::{GameError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Result of scanning the storage directory at startup
#[derive(Debug, Default)]
pub struct LoadReport {
    pub games: Vec<GameState>,
    /// Files that could not be read back, with the reason
    pub skipped: Vec<(PathBuf, GameError)>,
}

#[derive(Debug, Clone)]
pub struct GameStore {
    dir: PathBuf,
}

impl GameStore {
    /// Open (creating if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(GameStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &GameId) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }

    pub fn save(&self, game: &GameState) -> Result<()> {
        let json = game.to_json_pretty()?;
        std::fs::write(self.path_for(&game.id), json)?;
        Ok(())
    }

    /// Read one game; `None` when no document exists for it
    pub fn load(&self, id: &GameId) -> Result<Option<GameState>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }
        load_document(&path).map(Some)
    }

    /// Parse every game document in the directory, in parallel
    pub fn load_all(&self) -> Result<LoadReport> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let results: Vec<(PathBuf, Result<GameState>)> = paths
            .into_par_iter()
            .map(|path| {
                let loaded = load_document(&path);
                (path, loaded)
            })
            .collect();

        let mut report = LoadReport::default();
        for (path, loaded) in results {
            match loaded {
                Ok(game) => report.games.push(game),
                Err(err) => report.skipped.push((path, err)),
            }
        }
        Ok(report)
    }
}

/// The file name is the key: the document must carry the same id
fn load_document(path: &Path) -> Result<GameState> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let json = std::fs::read_to_string(path)?;
    let game = GameState::from_json(&json)?;
    if game.id != stem.as_str() {
        return Err(GameError::InvalidGameId(format!(
            "{} stored in {}",
            game.id,
            path.display()
        )));
    }
    Ok(game)
}
