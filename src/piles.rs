use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised by direct pile access. Both indicate a bug in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PileError {
    #[error("pile index {index} out of range (have {len} piles)")]
    Index { index: usize, len: usize },
    #[error("cannot take {amount} from pile {index} holding {available}")]
    IllegalMove {
        index: usize,
        amount: u32,
        available: u32,
    },
}

/// Source of starting pile values.
pub trait PileGenerator: Send {
    /// Returns a value in `1..=max_coins`. Out-of-range values are clamped by the caller.
    fn next_value(&mut self, max_coins: u32) -> u32;
}

/// Uniform random piles from a seedable PRNG.
#[derive(Debug, Clone)]
pub struct RandomPiles {
    rng: SmallRng,
}

impl RandomPiles {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PileGenerator for RandomPiles {
    fn next_value(&mut self, max_coins: u32) -> u32 {
        self.rng.random_range(1..=max_coins.max(1))
    }
}

/// Replays a fixed sequence of values, cycling when it runs out.
#[derive(Debug, Clone, Default)]
pub struct FixedPiles {
    values: Vec<u32>,
    cursor: usize,
}

impl FixedPiles {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl PileGenerator for FixedPiles {
    fn next_value(&mut self, max_coins: u32) -> u32 {
        if self.values.is_empty() {
            return max_coins;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// The coin piles on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileBank {
    piles: Vec<u32>,
}

impl PileBank {
    /// Deals `count` piles, each holding between 1 and `max_coins` coins.
    pub fn initialize(count: usize, max_coins: u32, generator: &mut dyn PileGenerator) -> Self {
        let max_coins = max_coins.max(1);
        let piles = (0..count)
            .map(|_| generator.next_value(max_coins).clamp(1, max_coins))
            .collect();
        Self { piles }
    }

    /// Restores an arbitrary position, zeros included.
    pub fn from_values(values: impl Into<Vec<u32>>) -> Self {
        Self {
            piles: values.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    pub fn value_at(&self, index: usize) -> Result<u32, PileError> {
        self.piles.get(index).copied().ok_or(PileError::Index {
            index,
            len: self.piles.len(),
        })
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.piles.get(index).copied()
    }

    pub fn values(&self) -> &[u32] {
        &self.piles
    }

    /// Takes `amount` coins from a pile and returns what is left.
    /// The pile is left untouched when `amount` exceeds its value.
    pub fn subtract(&mut self, index: usize, amount: u32) -> Result<u32, PileError> {
        let len = self.piles.len();
        let pile = self
            .piles
            .get_mut(index)
            .ok_or(PileError::Index { index, len })?;
        let rest = pile.checked_sub(amount).ok_or(PileError::IllegalMove {
            index,
            amount,
            available: *pile,
        })?;
        *pile = rest;
        Ok(rest)
    }

    /// Win condition: every pile is empty.
    pub fn all_zero(&self) -> bool {
        self.piles.iter().all(|&coins| coins == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_uses_generator_values_in_order() {
        let mut generator = FixedPiles::new([4, 6, 8]);
        let bank = PileBank::initialize(3, 20, &mut generator);

        assert_eq!(bank.values(), &[4, 6, 8]);
        assert!(!bank.all_zero());
    }

    #[test]
    fn initialize_clamps_generated_values_into_range() {
        let mut generator = FixedPiles::new([0, 25, 7]);
        let bank = PileBank::initialize(4, 10, &mut generator);

        assert_eq!(bank.values(), &[1, 10, 7, 1]);
    }

    #[test]
    fn random_piles_stay_within_bounds() {
        let mut generator = RandomPiles::new(7);
        for _ in 0..50 {
            let bank = PileBank::initialize(3, 5, &mut generator);
            assert!(bank.values().iter().all(|&coins| (1..=5).contains(&coins)));
        }
    }

    #[test]
    fn random_piles_are_deterministic_per_seed() {
        let first = PileBank::initialize(5, 20, &mut RandomPiles::new(42));
        let second = PileBank::initialize(5, 20, &mut RandomPiles::new(42));

        assert_eq!(first, second);
    }

    #[test]
    fn value_at_out_of_range_is_index_error() {
        let bank = PileBank::from_values([1, 2]);

        assert_eq!(bank.value_at(1), Ok(2));
        assert_eq!(bank.value_at(2), Err(PileError::Index { index: 2, len: 2 }));
    }

    #[test]
    fn subtract_down_to_zero_is_allowed() {
        let mut bank = PileBank::from_values([5, 0]);

        assert_eq!(bank.subtract(0, 5), Ok(0));
        assert!(bank.all_zero());
    }

    #[test]
    fn subtract_more_than_available_leaves_pile_unchanged() {
        let mut bank = PileBank::from_values([3, 9]);
        let err = bank.subtract(0, 5).unwrap_err();

        assert_eq!(
            err,
            PileError::IllegalMove {
                index: 0,
                amount: 5,
                available: 3
            }
        );
        assert_eq!(bank.values(), &[3, 9]);
        assert_eq!(
            bank.subtract(4, 1),
            Err(PileError::Index { index: 4, len: 2 })
        );
    }
}
