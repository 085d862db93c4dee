//! Random index sources consumed by the planner, plus deterministic seed mixing.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Picks an index in `[0, n)`. Callers never pass `n == 0`.
pub trait IndexSource {
    fn next_index(&mut self, n: usize) -> usize;
}

impl<T: IndexSource + ?Sized> IndexSource for &mut T {
    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}

/// Uniform source backed by a seeded `ChaCha8Rng`.
pub struct ChaChaIndexSource {
    rng: ChaCha8Rng,
}

impl ChaChaIndexSource {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl IndexSource for ChaChaIndexSource {
    fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        if n <= 1 {
            return 0;
        }
        let range = n as u64;
        // Values below `threshold` would over-represent the low indices.
        let threshold = range.wrapping_neg() % range;
        loop {
            let value = self.rng.next_u64();
            if value >= threshold {
                return (value % range) as usize;
            }
        }
    }
}

/// Always picks the first candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl IndexSource for FirstCandidate {
    fn next_index(&mut self, _n: usize) -> usize {
        0
    }
}

/// Replays a fixed list of picks, clamped into range; falls back to `0` once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIndexSource {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedIndexSource {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self { picks: picks.into(), cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl IndexSource for ScriptedIndexSource {
    fn next_index(&mut self, n: usize) -> usize {
        let pick = self.picks.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        pick.min(n.saturating_sub(1))
    }
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub fn derive_level_seed(run_seed: u64, level_index: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level_index).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mix_seed_stream(mixed ^ (mixed >> 31), u64::from(level_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chacha_source_stays_inside_requested_bounds() {
        let mut source = ChaChaIndexSource::seed_from_u64(12_345);
        for n in 1..200 {
            let value = source.next_index(n);
            assert!(value < n, "index {value} escaped [0, {n})");
        }
    }

    #[test]
    fn chacha_source_reaches_every_index_of_a_small_range() {
        let mut source = ChaChaIndexSource::seed_from_u64(7);
        let mut seen = [0_u32; 5];
        for _ in 0..2_000 {
            seen[source.next_index(5)] += 1;
        }
        for (index, hits) in seen.iter().enumerate() {
            assert!(*hits > 300, "index {index} looked starved: {seen:?}");
        }
    }

    #[test]
    fn same_seed_replays_the_same_indices() {
        let mut a = ChaChaIndexSource::seed_from_u64(99);
        let mut b = ChaChaIndexSource::seed_from_u64(99);
        let left: Vec<usize> = (0..32).map(|_| a.next_index(17)).collect();
        let right: Vec<usize> = (0..32).map(|_| b.next_index(17)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn scripted_source_clamps_and_falls_back_to_zero() {
        let mut source = ScriptedIndexSource::new(vec![2, 9]);
        assert_eq!(source.next_index(4), 2);
        assert_eq!(source.next_index(4), 3);
        assert_eq!(source.next_index(4), 0);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn level_seed_changes_when_inputs_change() {
        let baseline = derive_level_seed(99, 2);
        assert_ne!(baseline, derive_level_seed(98, 2));
        assert_ne!(baseline, derive_level_seed(99, 3));
        assert_eq!(baseline, derive_level_seed(99, 2));
    }
}
