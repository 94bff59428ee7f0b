//! Random source used for dealing, evolution traits and procedural rolls
//!
//! The engine only talks to [`RandomSource`], so tests can substitute a
//! scripted source and get exact outcomes.

use crate::core::Card;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub trait RandomSource: Send {
    /// Uniform integer in `low..=high`
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;

    /// Shuffle cards in place
    fn shuffle_cards(&mut self, cards: &mut [Card]);

    /// Percentile roll in `1..=100`
    fn roll_percent(&mut self) -> u32 {
        self.range_inclusive(1, 100) as u32
    }
}

/// Default random source backed by a `rand` generator
pub struct GameRng {
    rng: Box<dyn RngCore + Send>,
}

impl GameRng {
    /// Non-deterministic generator seeded from the OS
    pub fn from_entropy() -> Self {
        GameRng {
            rng: Box::new(rand::rngs::StdRng::from_entropy()),
        }
    }

    /// Seeded generator (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        GameRng {
            rng: Box::new(ChaCha12Rng::seed_from_u64(seed)),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng::with_seed(seed),
            None => GameRng::from_entropy(),
        }
    }
}

impl RandomSource for GameRng {
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRng").finish_non_exhaustive()
    }
}
