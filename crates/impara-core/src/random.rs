//! Injectable randomness.
//!
//! Everything that shuffles or picks goes through [`RandomSource`] so tests
//! can replay fixed sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of floats uniformly distributed in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Process-wide thread RNG. Used for interactive sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Reproducible RNG seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.gen()
    }
}

/// Replays a fixed sequence, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`; an empty sequence always yields `0.0`.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    values: Vec<f64>,
    next: usize,
}

impl FixedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Index in `0..len` drawn from `rng`. `len` must be non-zero.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    let index = (rng.next_f64() * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = pick_index(rng, i + 1);
        items.swap(i, j);
    }
}
