//! CKKS parameter table generation
//!
//! Exhaustively enumerates every (λ, log2 N, delta, q0, L) tuple whose total modulus
//! stays under the security bound, for the cross-product of security levels, ring
//! dimensions and Hamming weights in a [`SearchSpaceConfig`].
//!
//! Combinations are independent, so they are enumerated in parallel and concatenated
//! in configuration order. A combination whose delta lower bound exceeds the ceiling
//! is reported in [`GenerationReport::skipped`] and does not stop the run.
use rayon::prelude::*;

use shared::{
    Bound, BoundError, BoundTable, CkksParamsResult, ParameterTable, ParameterTuple,
    SearchSpaceConfig, TableMetadata,
};

use crate::bounds::BoundCalculator;

/// A (λ, log2 N, h) combination skipped because no delta can satisfy its bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleCombination {
    pub security_level: u32,
    pub log2_ring_dim: u32,
    pub hamming_weight: u64,
    pub reason: BoundError,
}

/// Enumeration outcome of a single combination
#[derive(Debug, Clone, PartialEq)]
pub enum CombinationOutcome {
    Feasible {
        bound: Bound,
        tuples: Vec<ParameterTuple>,
    },
    Infeasible(InfeasibleCombination),
}

/// Everything produced by a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub table: ParameterTable,
    pub bounds: BoundTable,
    pub skipped: Vec<InfeasibleCombination>,
}

/// Table generator over an explicit search space
#[derive(Debug, Clone)]
pub struct TableGenerator {
    config: SearchSpaceConfig,
    calculator: BoundCalculator,
}

impl TableGenerator {
    /// Create a generator, validating the search space first.
    pub fn new(config: SearchSpaceConfig) -> CkksParamsResult<Self> {
        config.validate()?;
        let calculator = BoundCalculator::from_config(&config);
        Ok(Self { config, calculator })
    }

    pub fn config(&self) -> &SearchSpaceConfig {
        &self.config
    }

    pub fn calculator(&self) -> &BoundCalculator {
        &self.calculator
    }

    /// All (λ, log2 N, h) combinations in enumeration order.
    pub fn combinations(&self) -> Vec<(u32, u32, u64)> {
        let mut combinations = Vec::with_capacity(self.config.combination_count());
        for &security_level in &self.config.security_levels {
            for &log2_ring_dim in &self.config.log2_ring_dims {
                for &hamming_weight in &self.config.hamming_weights {
                    combinations.push((security_level, log2_ring_dim, hamming_weight));
                }
            }
        }
        combinations
    }

    /// Compute the bounds of one combination and enumerate its tuples.
    pub fn enumerate_combination(
        &self,
        security_level: u32,
        log2_ring_dim: u32,
        hamming_weight: u64,
    ) -> CombinationOutcome {
        let bound = match self
            .calculator
            .bound(security_level, log2_ring_dim, hamming_weight)
        {
            Ok(bound) => bound,
            Err(reason) => {
                return CombinationOutcome::Infeasible(InfeasibleCombination {
                    security_level,
                    log2_ring_dim,
                    hamming_weight,
                    reason,
                });
            }
        };

        let tuples = self.enumerate_tuples(&bound);
        log::debug!(
            "λ={security_level} log2(N)={log2_ring_dim} h={hamming_weight}: max log2(Q)={} min log2(delta)={} -> {} tuples",
            bound.max_log2_q,
            bound.min_log2_delta,
            tuples.len()
        );
        CombinationOutcome::Feasible { bound, tuples }
    }

    /// Enumerate the tuples admitted by a bound row.
    ///
    /// For each delta in `[min log2(delta), ceiling]` and each q0 in
    /// `[delta + 2, min(2·delta - 1, q0 ceiling)]`, depth grows from 1 while
    /// `log2(Q) = log2(q) + log2(q)/4` stays strictly below the bound. log2(Q) is
    /// increasing in depth, so the first violation ends the depth loop.
    pub fn enumerate_tuples(&self, bound: &Bound) -> Vec<ParameterTuple> {
        let ceiling = self.config.log2_qi_upper;
        let b_clean = self
            .calculator
            .clean_noise_bound(bound.ring_dim(), bound.hamming_weight);

        let mut tuples = Vec::new();
        for log2_delta in bound.min_log2_delta.min(ceiling)..=ceiling {
            let precision = self.calculator.precision(log2_delta, b_clean);
            let q0_max = (2 * log2_delta)
                .saturating_sub(1)
                .min(self.config.log2_q0_upper);

            for q0 in (log2_delta + 2)..=q0_max {
                for depth in 1..=self.config.max_depth {
                    let tuple = ParameterTuple {
                        security_level: bound.security_level,
                        log2_ring_dim: bound.log2_ring_dim,
                        log2_delta,
                        q0,
                        depth,
                        precision,
                        achieved_precision: None,
                    };
                    if tuple.log2_total_modulus() >= bound.max_log2_q as f64 {
                        break;
                    }
                    tuples.push(tuple);
                }
            }
        }
        tuples
    }

    /// Enumerate every combination of the search space.
    pub fn generate(&self) -> GenerationReport {
        let outcomes: Vec<CombinationOutcome> = self
            .combinations()
            .par_iter()
            .map(|&(security_level, log2_ring_dim, hamming_weight)| {
                self.enumerate_combination(security_level, log2_ring_dim, hamming_weight)
            })
            .collect();

        let mut rows = Vec::new();
        let mut bounds = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                CombinationOutcome::Feasible { bound, tuples } => {
                    bounds.push(bound);
                    rows.extend(tuples);
                }
                CombinationOutcome::Infeasible(infeasible) => {
                    log::warn!(
                        "skipping λ={} log2(N)={} h={}: {}",
                        infeasible.security_level,
                        infeasible.log2_ring_dim,
                        infeasible.hamming_weight,
                        infeasible.reason
                    );
                    skipped.push(infeasible);
                }
            }
        }

        log::info!(
            "generated {} tuples from {} feasible combinations ({} skipped)",
            rows.len(),
            bounds.len(),
            skipped.len()
        );

        let metadata = TableMetadata::new(self.config.clone());
        GenerationReport {
            table: ParameterTable::new(metadata.clone(), rows),
            bounds: BoundTable {
                metadata,
                rows: bounds,
            },
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(levels: Vec<u32>, log2_ring_dims: Vec<u32>) -> TableGenerator {
        TableGenerator::new(SearchSpaceConfig {
            security_levels: levels,
            log2_ring_dims,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SearchSpaceConfig {
            log2_ring_dims: vec![],
            ..Default::default()
        };
        assert!(TableGenerator::new(config).is_err());
    }

    #[test]
    fn test_combinations_order() {
        let generator = TableGenerator::new(SearchSpaceConfig {
            security_levels: vec![128, 256],
            log2_ring_dims: vec![14, 15],
            hamming_weights: vec![64, 256],
            ..Default::default()
        })
        .unwrap();

        let combinations = generator.combinations();
        assert_eq!(combinations.len(), 8);
        assert_eq!(combinations[0], (128, 14, 64));
        assert_eq!(combinations[1], (128, 14, 256));
        assert_eq!(combinations[2], (128, 15, 64));
        assert_eq!(combinations[7], (256, 15, 256));
    }

    #[test]
    fn test_tuples_respect_invariants() {
        let generator = generator(vec![128], vec![15]);
        let bound = generator.calculator().bound(128, 15, 256).unwrap();
        let tuples = generator.enumerate_tuples(&bound);

        assert!(!tuples.is_empty());
        for tuple in &tuples {
            assert!(tuple.satisfies(&bound, 60), "{tuple:?}");
            assert!(tuple.log2_delta >= 22 && tuple.log2_delta <= 58);
            assert!(tuple.depth >= 1 && tuple.depth <= 32);
        }
    }

    #[test]
    fn test_depth_stops_at_first_violation() {
        let generator = generator(vec![128], vec![15]);
        let bound = generator.calculator().bound(128, 15, 256).unwrap();
        let tuples = generator.enumerate_tuples(&bound);

        // delta = 40, q0 = 42: 1.25 * (42 + 40 L) < 992 holds up to L = 18
        let depths: Vec<u32> = tuples
            .iter()
            .filter(|t| t.log2_delta == 40 && t.q0 == 42)
            .map(|t| t.depth)
            .collect();
        assert_eq!(depths, (1..=18).collect::<Vec<_>>());
    }

    #[test]
    fn test_depth_capped_by_config() {
        let generator = generator(vec![128], vec![15]);
        let bound = generator.calculator().bound(128, 15, 256).unwrap();
        let tuples = generator.enumerate_tuples(&bound);

        // delta = 22, q0 = 24 would admit L = 34 without the cap
        let max_depth = tuples
            .iter()
            .filter(|t| t.log2_delta == 22 && t.q0 == 24)
            .map(|t| t.depth)
            .max();
        assert_eq!(max_depth, Some(32));
    }

    #[test]
    fn test_strict_bound_excludes_equality() {
        let generator = generator(vec![128], vec![15]);
        let bound = Bound {
            security_level: 128,
            log2_ring_dim: 15,
            hamming_weight: 256,
            // delta = 58, q0 = 60, L = 1: log2(Q) = 1.25 * 118 = 147.5
            max_log2_q: 148,
            min_log2_delta: 58,
        };
        let tuples = generator.enumerate_tuples(&bound);
        assert_eq!(tuples.len(), 1);
        assert_eq!((tuples[0].q0, tuples[0].depth), (60, 1));

        // q0 = 60, delta = 56 gives log2(Q) = 1.25 * 116 = 145 exactly
        let tight = Bound {
            max_log2_q: 145,
            min_log2_delta: 56,
            ..bound
        };
        let tuples = generator.enumerate_tuples(&tight);
        assert!(
            tuples
                .iter()
                .all(|t| !(t.log2_delta == 56 && t.q0 == 60))
        );
        assert!(tuples.iter().any(|t| t.log2_delta == 56 && t.q0 == 59));
    }

    #[test]
    fn test_q0_range() {
        let generator = generator(vec![128], vec![17]);
        let bound = generator.calculator().bound(128, 17, 256).unwrap();
        let tuples = generator.enumerate_tuples(&bound);

        let q0s: Vec<u32> = tuples
            .iter()
            .filter(|t| t.log2_delta == 30 && t.depth == 1)
            .map(|t| t.q0)
            .collect();
        assert_eq!(q0s, (32..=59).collect::<Vec<_>>());

        let q0s: Vec<u32> = tuples
            .iter()
            .filter(|t| t.log2_delta == 58 && t.depth == 1)
            .map(|t| t.q0)
            .collect();
        assert_eq!(q0s, vec![60]);
    }

    #[test]
    fn test_infeasible_combination_is_skipped() {
        let generator = generator(vec![128], vec![15, 52]);
        let report = generator.generate();

        assert_eq!(report.skipped.len(), 1);
        let skipped = &report.skipped[0];
        assert_eq!(skipped.log2_ring_dim, 52);
        assert!(matches!(
            skipped.reason,
            BoundError::DeltaAboveCeiling {
                min_log2_delta: 59,
                ..
            }
        ));

        assert_eq!(report.bounds.rows.len(), 1);
        assert!(report.table.rows.iter().all(|t| t.log2_ring_dim == 15));
        assert!(!report.table.is_empty());
    }

    #[test]
    fn test_generation_order() {
        let report = generator(vec![128, 256], vec![14, 15]).generate();
        let keys: Vec<_> = report
            .table
            .rows
            .iter()
            .map(|t| (t.security_level, t.log2_ring_dim, t.log2_delta, t.q0, t.depth))
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(report.bounds.rows.len(), 4);
    }
}
