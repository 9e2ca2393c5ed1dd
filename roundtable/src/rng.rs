//! Randomness used by a table: deck shuffles and the colors AI seats pick for
//! their wilds. Everything random goes through [`RandomSource`] so a game can
//! be replayed from a seed, or driven by a scripted source in tests.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::Card;

pub trait RandomSource {
    /// Put `cards` in a uniformly random order.
    fn shuffle(&mut self, cards: &mut [Card]);

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Seedable ChaCha8 generator. Same seed, same game.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Leaves every shuffle untouched and always picks the first option, so draws
/// come off the deck in reverse build order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unshuffled;

impl RandomSource for Unshuffled {
    fn shuffle(&mut self, _cards: &mut [Card]) {}

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}
