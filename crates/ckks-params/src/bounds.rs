//! CKKS bound calculator
//!
//! Pure numeric functions relating the security level λ, the ring dimension N and the
//! secret-key Hamming weight h to the admissible modulus sizes:
//!
//! - security: `log2(Q) < 7.2·N / (λ + 110) + log2(σ)`
//! - clean noise: `B_clean = 8·σ·N·√2 + 6·√N + 16·√(h·N)`
//! - correctness: `log2(delta) ≥ log2(N + 2·B_clean)`
use std::f64::consts::SQRT_2;

use shared::constants::FIXED_LOG2_Q0;
use shared::{Bound, BoundError, SearchSpaceConfig};

/// Bound calculator for a fixed σ and per-level modulus ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundCalculator {
    sigma: f64,
    log2_qi_upper: u32,
}

/// Largest depth reachable for a fixed delta with a 60-bit base modulus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthLimit {
    pub depth: u64,
    pub log2_q: u64,
    pub log2_p: f64,
    pub log2_total: f64,
    pub log2_delta: u32,
    pub precision: u32,
}

impl BoundCalculator {
    pub fn new(sigma: f64, log2_qi_upper: u32) -> Self {
        Self {
            sigma,
            log2_qi_upper,
        }
    }

    pub fn from_config(config: &SearchSpaceConfig) -> Self {
        Self::new(config.sigma, config.log2_qi_upper)
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn log2_qi_upper(&self) -> u32 {
        self.log2_qi_upper
    }

    /// Upper bound on the ciphertext modulus size log2(Q), exclusive.
    ///
    /// `floor(7.2·N / (λ + 110) + log2(σ))`
    pub fn upper_bound_q(&self, security_level: u32, ring_dim: u64) -> u64 {
        let bound = (7.2 * ring_dim as f64) / (security_level as f64 + 110.0) + self.sigma.log2();
        bound.floor().max(0.0) as u64
    }

    /// Clean noise bound `B_clean` of a fresh encryption.
    pub fn clean_noise_bound(&self, ring_dim: u64, hamming_weight: u64) -> f64 {
        let n = ring_dim as f64;
        let h = hamming_weight as f64;
        8.0 * self.sigma * n * SQRT_2 + 6.0 * n.sqrt() + 16.0 * (h * n).sqrt()
    }

    /// Lower bound on log2(delta), `ceil(log2(N + 2·B_clean))`.
    ///
    /// Returns [`BoundError::DeltaAboveCeiling`] when the bound exceeds the per-level
    /// modulus ceiling, in which case no tuple exists for this (N, h).
    pub fn lower_bound_delta(&self, ring_dim: u64, hamming_weight: u64) -> Result<u32, BoundError> {
        let b_clean = self.clean_noise_bound(ring_dim, hamming_weight);
        let min_log2_delta = (ring_dim as f64 + 2.0 * b_clean).log2().ceil() as u32;

        if min_log2_delta > self.log2_qi_upper {
            return Err(BoundError::DeltaAboveCeiling {
                ring_dim,
                hamming_weight,
                min_log2_delta,
                ceiling: self.log2_qi_upper,
            });
        }
        Ok(min_log2_delta)
    }

    /// Bits of precision left by a scaling factor: `floor(log2(delta) - log2(B_clean))`.
    pub fn precision(&self, log2_delta: u32, b_clean: f64) -> u32 {
        (log2_delta as f64 - b_clean.log2()).floor().max(0.0) as u32
    }

    /// Bound row for one (λ, log2 N, h) combination.
    pub fn bound(
        &self,
        security_level: u32,
        log2_ring_dim: u32,
        hamming_weight: u64,
    ) -> Result<Bound, BoundError> {
        let ring_dim = 1u64 << log2_ring_dim;
        let min_log2_delta = self.lower_bound_delta(ring_dim, hamming_weight)?;

        Ok(Bound {
            security_level,
            log2_ring_dim,
            hamming_weight,
            max_log2_q: self.upper_bound_q(security_level, ring_dim),
            min_log2_delta,
        })
    }

    /// Largest depth L for a fixed log2(delta), using a 60-bit base modulus.
    ///
    /// L is the largest depth with `(λ + 110)·(log2(Q) - log2(σ)) / 7.2 < N`. It is
    /// estimated in closed form and then corrected against the exact inequality.
    /// Returns `None` when not even depth 1 satisfies the security bound.
    pub fn max_depth_for_delta(
        &self,
        security_level: u32,
        ring_dim: u64,
        log2_delta: u32,
        hamming_weight: u64,
    ) -> Option<DepthLimit> {
        if log2_delta == 0 {
            return None;
        }

        let total = |depth: u64| -> (u64, f64, f64) {
            let log2_q = FIXED_LOG2_Q0 as u64 + depth * log2_delta as u64;
            let log2_p = log2_q as f64 / 4.0;
            (log2_q, log2_p, log2_q as f64 + log2_p)
        };
        let exceeds = |depth: u64| {
            (security_level as f64 + 110.0) * (total(depth).2 - self.sigma.log2()) / 7.2
                >= ring_dim as f64
        };

        // log2(Q) = 1.25·log2(q) must stay below 7.2·N / (λ + 110) + log2(σ)
        let max_log2_q = (7.2 * ring_dim as f64 / (security_level as f64 + 110.0)
            + self.sigma.log2())
            / 1.25;
        let estimate = ((max_log2_q - FIXED_LOG2_Q0 as f64) / log2_delta as f64).floor();
        // negative and NaN estimates saturate to 0
        let mut depth = estimate as u64;
        while depth > 0 && exceeds(depth) {
            depth -= 1;
        }
        while !exceeds(depth + 1) {
            depth += 1;
        }
        if depth == 0 {
            return None;
        }

        let (log2_q, log2_p, log2_total) = total(depth);
        let b_clean = self.clean_noise_bound(ring_dim, hamming_weight);
        Some(DepthLimit {
            depth,
            log2_q,
            log2_p,
            log2_total,
            log2_delta,
            precision: self.precision(log2_delta, b_clean),
        })
    }
}

/// Split a ciphertext modulus size log2(Q), with Q = P·q, into `(log2(q), log2(P))`.
///
/// `log2(q) = floor(4·log2(Q) / 5)` and `log2(P) = floor(log2(Q) / 5)`.
pub fn split_log_q(log2_total: u64) -> (u64, u64) {
    ((4 * log2_total) / 5, log2_total / 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::constants::{LOG2_QI_UPPER, SIGMA};

    fn calculator() -> BoundCalculator {
        BoundCalculator::new(SIGMA, LOG2_QI_UPPER)
    }

    #[test]
    fn test_upper_bound_q_reference_values() {
        let calc = calculator();
        // 7.2 * 32768 / 238 = 991.29..., log2(3.19) = 1.67...
        assert_eq!(calc.upper_bound_q(128, 1 << 15), 992);
        // 7.2 * 16384 / 238 = 495.64...
        assert_eq!(calc.upper_bound_q(128, 1 << 14), 497);
    }

    #[test]
    fn test_upper_bound_q_monotonic() {
        let calc = calculator();
        for level in [80, 128, 196, 256] {
            let mut previous = 0;
            for log2_n in 10..=20 {
                let bound = calc.upper_bound_q(level, 1 << log2_n);
                assert!(bound >= previous);
                previous = bound;
            }
        }
        for log2_n in 10..=20 {
            let mut previous = u64::MAX;
            for level in [80, 128, 160, 196, 256, 512] {
                let bound = calc.upper_bound_q(level, 1 << log2_n);
                assert!(bound <= previous);
                previous = bound;
            }
        }
        assert!(calc.upper_bound_q(128, 1 << 16) > calc.upper_bound_q(128, 1 << 15));
        assert!(calc.upper_bound_q(256, 1 << 15) < calc.upper_bound_q(128, 1 << 15));
    }

    #[test]
    fn test_clean_noise_bound_monotonic() {
        let calc = calculator();
        let mut previous = 0.0;
        for log2_n in 1..=30 {
            let b = calc.clean_noise_bound(1 << log2_n, 256);
            assert!(b > previous);
            previous = b;
        }
        let mut previous = 0.0;
        for h in [1, 2, 64, 128, 192, 256, 1024] {
            let b = calc.clean_noise_bound(1 << 15, h);
            assert!(b > previous);
            previous = b;
        }
    }

    #[test]
    fn test_lower_bound_delta() {
        let calc = calculator();
        // N + 2·B_clean ≈ 2.49e6 for N = 2^15, h = 256
        assert_eq!(calc.lower_bound_delta(1 << 15, 256), Ok(22));
        // N + 2·B_clean ≈ 73.2·N, so log2 ≈ n + 6.19
        assert_eq!(calc.lower_bound_delta(1 << 51, 256), Ok(58));
    }

    #[test]
    fn test_lower_bound_delta_above_ceiling_is_not_clamped() {
        let calc = calculator();
        assert_eq!(
            calc.lower_bound_delta(1 << 52, 256),
            Err(BoundError::DeltaAboveCeiling {
                ring_dim: 1 << 52,
                hamming_weight: 256,
                min_log2_delta: 59,
                ceiling: 58,
            })
        );
        assert!(calc.bound(128, 52, 256).is_err());
    }

    #[test]
    fn test_precision() {
        let calc = calculator();
        let b_clean = calc.clean_noise_bound(1 << 15, 256);
        // log2(B_clean) ≈ 20.23
        assert_eq!(calc.precision(22, b_clean), 1);
        assert_eq!(calc.precision(40, b_clean), 19);
        assert_eq!(calc.precision(1, b_clean), 0);
    }

    #[test]
    fn test_bound_row() {
        let bound = calculator().bound(128, 15, 256).unwrap();
        assert_eq!(bound.ring_dim(), 32768);
        assert_eq!(bound.max_log2_q, 992);
        assert_eq!(bound.min_log2_delta, 22);
    }

    #[test]
    fn test_max_depth_for_delta() {
        let calc = calculator();
        let limit = calc.max_depth_for_delta(128, 1 << 15, 40, 256).unwrap();
        // 1.25 * (60 + 40 L) must stay below ~993.3
        assert_eq!(limit.depth, 18);
        assert_eq!(limit.log2_q, 780);
        assert_eq!(limit.log2_p, 195.0);
        assert_eq!(limit.log2_total, 975.0);
        assert_eq!(limit.precision, 19);

        assert!(calc.max_depth_for_delta(128, 1 << 10, 40, 256).is_none());
        assert!(calc.max_depth_for_delta(128, 1 << 15, 0, 256).is_none());
    }

    #[test]
    fn test_max_depth_for_delta_matches_stepwise_search() {
        let calc = calculator();
        let cases: [(u32, u32, u32); 4] =
            [(128, 14, 30), (128, 16, 45), (196, 17, 58), (256, 15, 22)];
        for (level, log2_n, log2_delta) in cases {
            let ring_dim = 1u64 << log2_n;
            let exceeds = |depth: u64| {
                let log2_q = 60 + depth * log2_delta as u64;
                (level as f64 + 110.0) * (1.25 * log2_q as f64 - SIGMA.log2()) / 7.2
                    >= ring_dim as f64
            };
            let mut expected = 1;
            while !exceeds(expected) {
                expected += 1;
            }
            let limit = calc.max_depth_for_delta(level, ring_dim, log2_delta, 256).unwrap();
            assert_eq!(limit.depth, expected - 1, "λ={level} log2(N)={log2_n}");
        }
    }

    #[test]
    fn test_max_depth_for_delta_large_ring() {
        let calc = calculator();
        let bound = calc.bound(128, 45, 256).unwrap();
        assert_eq!(bound.min_log2_delta, 52);

        let limit = calc
            .max_depth_for_delta(128, bound.ring_dim(), bound.min_log2_delta, 256)
            .unwrap();
        // about 1.6e10 levels, beyond u32
        assert!(limit.depth > u32::MAX as u64);
        assert_eq!(limit.log2_q, 60 + limit.depth * 52);
        let security = |log2_total: f64| 238.0 * (log2_total - SIGMA.log2()) / 7.2;
        assert!(security(limit.log2_total) < bound.ring_dim() as f64);
        let next = (limit.log2_q + 52) as f64 * 1.25;
        assert!(security(next) >= bound.ring_dim() as f64);

        let widest = calc.bound(128, 51, 256).unwrap();
        assert!(
            calc.max_depth_for_delta(128, widest.ring_dim(), widest.min_log2_delta, 256)
                .is_some()
        );
    }

    #[test]
    fn test_split_log_q() {
        assert_eq!(split_log_q(992), (793, 198));
        assert_eq!(split_log_q(5), (4, 1));
    }
}
