//! Seedable pseudo-random number generator (xorshift64).
//! Fast and allocation-free; used for every random draw a field rebuild makes.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [lo, hi). Returns `lo` for an empty range.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform float in [-span/2, span/2).
    pub fn symmetric(&mut self, span: f32) -> f32 {
        (self.next_f32() - 0.5) * span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_f32(), rng2.next_f32());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let v = rng.next_f32();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn range_stays_inside_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range(0.8, 2.0);
            assert!(v >= 0.8 && v < 2.0, "out of range: {}", v);
        }
    }

    #[test]
    fn symmetric_is_centered() {
        let mut rng = Rng::new(99);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let v = rng.symmetric(0.25);
            assert!(v >= -0.125 && v < 0.125);
            sum += v;
        }
        assert!((sum / 10_000.0).abs() < 0.01);
    }

    #[test]
    fn empty_range_returns_lower_bound() {
        let mut rng = Rng::new(3);
        assert_eq!(rng.range(5.0, 5.0), 5.0);
    }
}
