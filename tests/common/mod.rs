//! Shared helpers for integration tests

#![allow(dead_code)]

use chyrralon::core::{Card, RandomSource};
use chyrralon::game::{OutputMode, VerbosityLevel};
use chyrralon::{EngineConfig, GameEngine, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Storage directory under the system temp dir, removed on drop
pub struct TempStorage {
    path: PathBuf,
}

impl TempStorage {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "chyrralon_{label}_{}_{}",
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&path);
        TempStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig::new(&self.path)
            .with_verbosity(VerbosityLevel::Verbose)
            .with_output_mode(OutputMode::Memory)
    }
}

impl Drop for TempStorage {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Random source that replays queued values
///
/// Clones share one queue, so a test can keep a handle and queue rolls after
/// the engine owns the source. An empty queue answers the top of the
/// requested range for `range_inclusive` (a percentile roll of 100, which
/// never triggers anything) and 0 for `index`. Shuffles leave cards in
/// catalog order.
#[derive(Clone, Default)]
pub struct ScriptedRng {
    queue: Arc<Mutex<VecDeque<i64>>>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, values: &[i64]) {
        self.queue.lock().unwrap().extend(values.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    fn pop(&self) -> Option<i64> {
        self.queue.lock().unwrap().pop_front()
    }
}

impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.pop().map_or(high, |v| v.clamp(low, high))
    }

    fn index(&mut self, len: usize) -> usize {
        self.pop().map_or(0, |v| (v.max(0) as usize).min(len - 1))
    }

    fn shuffle_cards(&mut self, _cards: &mut [Card]) {}
}

/// Engine driven by a scripted random source
pub fn scripted_engine(storage: &TempStorage) -> Result<(GameEngine, ScriptedRng)> {
    let rng = ScriptedRng::new();
    let engine = GameEngine::open(storage.config())?.with_random_source(rng.clone());
    Ok((engine, rng))
}

/// Hand-pattern picks giving player 1 grub, spikes, grub, carapace, grub
pub const PLAYER1_WITH_CARAPACE: [i64; 5] = [0, 0, 0, 1, 0];
