//! The three random primitives layout generation draws on.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    /// A uniform integer in `low..=high`. Returns `low` when the range is
    /// empty or a single value.
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64;

    fn coin_flip(&mut self) -> bool {
        self.range_inclusive(0, 1) == 1
    }

    /// A uniform index below `len`; 0 when `len` is 0.
    fn choose_index(&mut self, len: usize) -> usize {
        self.range_inclusive(0, len as i64 - 1).max(0) as usize
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.choose_index(items.len()))
    }
}

impl RandomSource for ChaCha8Rng {
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let draw = match high.abs_diff(low).checked_add(1) {
            Some(span) => self.next_u64() % span,
            None => self.next_u64(),
        };
        low.wrapping_add(draw as i64)
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Replays a fixed list of draws, for reproducing one particular layout.
/// Each scripted value is clamped into the requested range; once the script
/// runs out every draw returns the low end.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<i64>,
}

impl ScriptedRandom {
    pub fn new<I: IntoIterator<Item = i64>>(draws: I) -> Self {
        Self { draws: draws.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        let draw = self.draws.pop_front().unwrap_or(low);
        draw.clamp(low, high.max(low))
    }
}
