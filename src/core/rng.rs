//! Seedable random number generation for the simulation.
//!
//! Every random decision in a run (action choice, chance rolls, target and
//! message selection) draws from one `GameRng`, so a fixed seed reproduces a
//! whole game.
//!
//! ```
//! use battle_royale::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
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

    /// Create an RNG with a seed drawn from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll against a chance in `[0, 1]`.
    ///
    /// A chance of 0 never succeeds and a chance of 1 always does.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.inner.gen::<f64>() < chance
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given inclusive range.
    pub fn gen_range_inclusive(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Choose `amount` distinct elements, in selection order.
    ///
    /// Returns fewer than `amount` when the slice is shorter.
    pub fn choose_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        let amount = amount.min(slice.len());
        rand::seq::index::sample(&mut self.inner, slice.len(), amount)
            .into_iter()
            .map(|i| slice[i].clone())
            .collect()
    }
}
