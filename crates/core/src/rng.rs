//! RNG module - deterministic placement randomness
//!
//! Obstacle layout, item placement and the arena size all draw from one
//! seeded LCG so a session is fully reproducible from its seed.

use crate::types::GridCoord;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle quickly; the high half is better distributed.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniform interior cell of an `n x n` grid, i.e. in `[1, n - 2]` on both axes.
    pub fn interior_cell(&mut self, n: u16) -> GridCoord {
        let span = (n as u32).saturating_sub(2);
        let row = 1 + self.next_range(span) as i16;
        let col = 1 + self.next_range(span) as i16;
        GridCoord::new(row, col)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state, usable as the seed of an identical generator.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Arena size derived from a roll number and one random draw.
///
/// Always lands in `[10, 24]`. A roll ending in zero has no usable divisor and
/// falls back to the low bucket.
pub fn grid_size_from_roll(roll: u32, rng: &mut SimpleRng) -> u16 {
    let draw = 10 + rng.next_range(90);
    let divisor = draw * (roll % 10);
    let ratio = if divisor == 0 {
        0
    } else {
        (roll as f32 / divisor as f32) as u32
    };
    let size = ratio % 25;
    if size < 10 {
        (size + 15) as u16
    } else {
        size as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(10) < 10);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_interior_cell_never_on_boundary() {
        let mut rng = SimpleRng::new(99);
        for n in [4u16, 10, 12, 24] {
            for _ in 0..500 {
                let cell = rng.interior_cell(n);
                assert!(cell.is_interior(n), "{cell:?} not interior of {n}");
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(3);
        let mut values: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_grid_size_from_roll_range() {
        let mut rng = SimpleRng::new(2024);
        for roll in [0u32, 0o615, 10, 123, 987_654] {
            for _ in 0..50 {
                let n = grid_size_from_roll(roll, &mut rng);
                assert!((10..=24).contains(&n), "roll {roll} gave {n}");
            }
        }
    }
}
