//! Seeded xorshift64* generator for initial node placement.
//!
//! Initial placement is the only nondeterminism in the layout. Keeping the
//! generator injectable through `LayoutParams::random_seed` lets tests fix the
//! seed and assert byte-identical output across runs.

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        // The all-zero state is a fixed point of xorshift.
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform draw from [0, 1) with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::XorShift64Star;

    #[test]
    fn unit_draws_match_the_pinned_baseline_for_seed_one() {
        let mut rng = XorShift64Star::new(1);
        let expected = [
            0.28083505005035947,
            0.6711372530266764,
            0.7258461452833668,
            0.303529299965799,
            0.056176763098259475,
        ];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.next_f64_unit();
            assert!(
                (v - e).abs() < 1e-15,
                "unexpected value at draw {i}: got {v}, expected {e}"
            );
        }
    }

    #[test]
    fn zero_seed_is_remapped_and_still_produces_draws() {
        let mut a = XorShift64Star::new(0);
        let mut b = XorShift64Star::new(1);
        assert_eq!(a.next_f64_unit(), b.next_f64_unit());
    }
}
