use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bot::ROW_LEN;

/// Rolls the d8 that picks a bot's choice index.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 0-based index, uniform over all eight slots.
    pub fn roll_choice(&mut self) -> usize {
        self.rng.gen_range(0..ROW_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = Dice::from_seed(42);
        let mut b = Dice::from_seed(42);
        let ra: Vec<usize> = (0..20).map(|_| a.roll_choice()).collect();
        let rb: Vec<usize> = (0..20).map(|_| b.roll_choice()).collect();
        assert_eq!(ra, rb);
        assert!(ra.iter().all(|&i| i < ROW_LEN));
    }

    #[test]
    fn every_slot_is_reachable() {
        let mut dice = Dice::from_seed(7);
        let mut seen = [false; ROW_LEN];
        for _ in 0..500 {
            seen[dice.roll_choice()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
