//! Injectable random sources for the opponent.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical opponent behavior
//! - **Injectable**: Strategies are generic over `RandomSource`
//! - **Scriptable**: `ScriptedRng` replays fixed draws in tests
//!
//! ## Usage
//!
//! ```
//! use nine_game::core::{GameRng, RandomSource};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! assert_eq!(rng1.gen_index(9), rng2.gen_index(9));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the two kinds of randomness the opponent needs:
/// uniform picks and weighted coin flips.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is always non-zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn gen_bool(&mut self, probability: f64) -> bool;

    /// Choose a uniformly random element from a slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.gen_index(items.len());
        items.get(index)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn gen_index(&mut self, len: usize) -> usize {
        (**self).gen_index(len)
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        (**self).gen_bool(probability)
    }
}

/// Deterministic seedable RNG.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is kept so a surprising match can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Fixed-sequence random source for tests.
///
/// Each `gen_index` call consumes the next scripted index (reduced modulo
/// `len`); each `gen_bool` call consumes the next scripted roll in
/// `[0, 1)` and succeeds when the roll is below the probability.
///
/// An exhausted index script yields 0. An exhausted roll script never
/// succeeds.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    indices: VecDeque<usize>,
    rolls: VecDeque<f64>,
}

impl ScriptedRng {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue index draws.
    #[must_use]
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Queue coin-flip rolls.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Number of index draws not yet consumed.
    #[must_use]
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }

    /// Number of rolls not yet consumed.
    #[must_use]
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map_or(0, |i| i % len.max(1))
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        self.rolls.pop_front().is_some_and(|roll| roll < probability)
    }
}
