//! Injected randomness for the arena.
//!
//! Every component that rolls dice, stocks a pool, or draws items receives a
//! `&mut impl RandomSource` at the call site; nothing reaches for ambient
//! randomness. Any [`rand::Rng`] works as a production source through the
//! blanket impl, while [`FixedSource`] and [`ScriptedSource`] give tests
//! full control over every draw.

use rand::Rng;

/// Capability contract for all randomness the battle consumes.
pub trait RandomSource {
    /// Uniform integer in `[lower, upper]`, both bounds inclusive.
    fn next_int(&mut self, lower: i32, upper: i32) -> i32;

    /// `count` distinct indices drawn from `[lower, upper)`.
    ///
    /// Used for the equipment bag's batch draw. Implementations must return
    /// distinct in-range values; the bag validates the result and rejects a
    /// malformed draw rather than corrupting the pool.
    fn unique_indices(&mut self, count: usize, lower: usize, upper: usize) -> Vec<usize>;

    /// `count` indices cycling deterministically through `[lower, upper)`.
    ///
    /// Only used to spread belt sizes across a freshly stocked bag. The
    /// repeating cycle is part of the contract, so a default implementation
    /// is provided.
    fn cyclic_indices(&mut self, count: usize, lower: usize, upper: usize) -> Vec<usize> {
        let span = upper.saturating_sub(lower).max(1);
        (0..count).map(|i| lower + i % span).collect()
    }
}

/// Any `rand` generator is a production source.
impl<R: Rng> RandomSource for R {
    fn next_int(&mut self, lower: i32, upper: i32) -> i32 {
        self.gen_range(lower..=upper)
    }

    fn unique_indices(&mut self, count: usize, lower: usize, upper: usize) -> Vec<usize> {
        let span = upper.saturating_sub(lower);
        let amount = count.min(span);
        rand::seq::index::sample(self, span, amount)
            .into_iter()
            .map(|i| i + lower)
            .collect()
    }
}

/// Test double that answers every `next_int` with one configured value.
///
/// `unique_indices` hands back the first `count` indices in order, which
/// makes pool draws fully predictable.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub i32);

impl RandomSource for FixedSource {
    fn next_int(&mut self, _lower: i32, _upper: i32) -> i32 {
        self.0
    }

    fn unique_indices(&mut self, count: usize, lower: usize, _upper: usize) -> Vec<usize> {
        (lower..lower + count).collect()
    }
}

/// Test double that replays a scripted sequence of values, cycling when the
/// script runs out. An optional index script overrides `unique_indices`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<i32>,
    cursor: usize,
    indices: Option<Vec<usize>>,
}

impl ScriptedSource {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            cursor: 0,
            indices: None,
        }
    }

    /// Script both the integer draws and the batch-draw index list.
    pub fn with_indices(values: Vec<i32>, indices: Vec<usize>) -> Self {
        Self {
            values,
            cursor: 0,
            indices: Some(indices),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_int(&mut self, _lower: i32, _upper: i32) -> i32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn unique_indices(&mut self, count: usize, lower: usize, _upper: usize) -> Vec<usize> {
        match &self.indices {
            Some(list) => list.clone(),
            None => (lower..lower + count).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_prng_next_int_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let value = rng.next_int(1, 6);
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn test_prng_unique_indices_are_distinct_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let indices = rng.unique_indices(20, 0, 48);
        assert_eq!(indices.len(), 20);
        let mut seen = indices.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 20, "indices must be distinct");
        assert!(indices.iter().all(|&i| i < 48));
    }

    #[test]
    fn test_cyclic_indices_repeat_the_range() {
        let mut rng = FixedSource(0);
        let cycle = rng.cyclic_indices(7, 0, 3);
        assert_eq!(cycle, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_fixed_source_always_answers_the_same() {
        let mut src = FixedSource(4);
        assert_eq!(src.next_int(0, 100), 4);
        assert_eq!(src.next_int(-5, 5), 4);
        assert_eq!(src.unique_indices(3, 2, 10), vec![2, 3, 4]);
    }

    #[test]
    fn test_scripted_source_cycles_its_script() {
        let mut src = ScriptedSource::new(vec![3, 1, 4]);
        let drawn: Vec<i32> = (0..5).map(|_| src.next_int(0, 10)).collect();
        assert_eq!(drawn, vec![3, 1, 4, 3, 1]);
    }
}
