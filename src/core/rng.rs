//! The match's only source of randomness.
//!
//! Every random event (mother nature's start, the setup bag, sack draws,
//! character selection) pulls from one [`GameRng`] stored in the table.
//! Two matches with the same seed and the same commands are identical, and
//! two RNGs compare equal exactly when they would draw the same sequence.
//!
//! ```
//! use archipelago::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut replay = rng.clone();
//! assert_eq!(rng.choose_weighted(&[2, 0, 5]), replay.choose_weighted(&[2, 0, 5]));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream owned by the table.
///
/// Serializes as [`GameRngState`], so a snapshot restores the exact draw
/// position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
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

    /// Uniform index in `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle in place (used to deal the character cards).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Index drawn with probability proportional to its weight; a sack
    /// draw passes its per-color counts. `None` when every weight is zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut roll = self.inner.gen_range(0..total);
        weights.iter().position(|&weight| {
            if roll < weight {
                true
            } else {
                roll -= weight;
                false
            }
        })
    }

    /// Seed and stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Rebuild the stream at a saved position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Persisted form of [`GameRng`]: constant size however many draws were
/// made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.gen_range_usize(0..12)).collect()
    }

    #[test]
    fn test_same_seed_same_islands() {
        let (mut a, mut b) = (GameRng::new(42), GameRng::new(42));
        assert_eq!(draws(&mut a, 50), draws(&mut b, 50));
        assert_ne!(draws(&mut GameRng::new(1), 20), draws(&mut GameRng::new(2), 20));
    }

    #[test]
    fn test_weighted_draw_skips_empty_colors() {
        let mut rng = GameRng::new(3);
        let sack = [0, 0, 4, 0, 0];
        assert!((0..20).all(|_| rng.choose_weighted(&sack) == Some(2)));
        assert_eq!(rng.choose_weighted(&[0; 5]), None);
    }

    #[test]
    fn test_equality_follows_stream_position() {
        let mut a = GameRng::new(7);
        let b = GameRng::new(7);
        assert_eq!(a, b);

        a.choose_weighted(&[1, 1]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_restored_state_continues_stream() {
        let mut rng = GameRng::new(9);
        draws(&mut rng, 30);

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, rng);
        assert_eq!(draws(&mut restored, 10), draws(&mut rng, 10));

        let mut from_state = GameRng::from_state(&rng.state());
        assert_eq!(draws(&mut from_state, 5), draws(&mut rng, 5));
    }
}
