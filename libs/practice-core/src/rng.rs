//! Xorshift32 pseudo-random number generator.

use crate::seed::{hash_seed, ZERO_SEED_REPLACEMENT};

/// Small, reproducible PRNG. Not suitable for anything security related.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from a raw seed.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Create a generator seeded from a string (usually a lesson id).
    pub fn from_seed(input: &str) -> Self {
        Self::new(hash_seed(input))
    }

    /// Advance the generator and return the new state.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[lo, hi]` (bounds are swapped if reversed).
    pub fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span).floor() as i64
    }

    /// Pick one element. Does not consume a draw for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range(0, items.len() as i64 - 1) as usize;
        items.get(idx)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_from_one() {
        let mut rng = XorShift32::new(1);
        // 1 ^ (1 << 13) = 0x2001; ^ (>> 17) unchanged; ^ (<< 5) = 0x42021
        assert_eq!(rng.next_u32(), 0x0004_2021);
    }

    #[test]
    fn zero_seed_is_replaced() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift32::from_seed("addition-easy");
        let mut b = XorShift32::from_seed("addition-easy");
        let xs: Vec<u32> = (0..32).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..32).map(|_| b.next_u32()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = XorShift32::from_seed("bounds");
        for _ in 0..1000 {
            let v = rng.range(-3, 7);
            assert!((-3..=7).contains(&v));
        }
        for _ in 0..100 {
            let v = rng.range(10, 2);
            assert!((2..=10).contains(&v));
        }
        assert_eq!(rng.range(5, 5), 5);
    }

    #[test]
    fn range_hits_both_ends() {
        let mut rng = XorShift32::from_seed("ends");
        let draws: Vec<i64> = (0..500).map(|_| rng.range(1, 4)).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&4));
    }

    #[test]
    fn next_f64_is_unit_interval() {
        let mut rng = XorShift32::from_seed("unit");
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn pick_on_empty_does_not_advance() {
        let mut rng = XorShift32::from_seed("pick");
        let before = rng.clone();
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng, before);
        assert!(rng.pick(&[1, 2, 3]).is_some());
    }
}
