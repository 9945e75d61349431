//! Optimal tuple selection.
//!
//! Smaller moduli mean smaller ciphertexts: within a ring dimension the best tuple
//! has the lexicographically smallest (delta, q0), and across ring dimensions the
//! smallest ring dimension wins.
use std::collections::BTreeMap;

use shared::{ParameterTuple, QueryResult};

/// Per-ring-dimension optima and the single global optimum of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalSelection {
    pub per_ring_dim: Vec<ParameterTuple>,
    pub optimum: Option<ParameterTuple>,
}

fn modulus_cost(tuple: &ParameterTuple) -> (u32, u32) {
    (tuple.log2_delta, tuple.q0)
}

/// The tuple with minimal (delta, q0) for each ring dimension, by ascending ring dimension.
pub fn per_ring_dim(rows: &[ParameterTuple]) -> Vec<ParameterTuple> {
    let mut best: BTreeMap<u32, ParameterTuple> = BTreeMap::new();
    for row in rows {
        best.entry(row.log2_ring_dim)
            .and_modify(|current| {
                if modulus_cost(row) < modulus_cost(current) {
                    *current = *row;
                }
            })
            .or_insert(*row);
    }
    best.into_values().collect()
}

/// The tuple with the smallest ring dimension, then minimal (delta, q0).
///
/// Returns `None` for an empty input.
pub fn select_optimal(rows: &[ParameterTuple]) -> Option<ParameterTuple> {
    per_ring_dim(rows)
        .into_iter()
        .min_by_key(|row| (row.log2_ring_dim, row.log2_delta, row.q0))
}

/// Reduce a query result to its per-ring-dimension optima and global optimum.
pub fn select_from_result(result: &QueryResult) -> OptimalSelection {
    let per_ring_dim = per_ring_dim(&result.rows);
    let optimum = per_ring_dim.first().copied();
    OptimalSelection {
        per_ring_dim,
        optimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(log2_ring_dim: u32, log2_delta: u32, q0: u32) -> ParameterTuple {
        ParameterTuple {
            security_level: 128,
            log2_ring_dim,
            log2_delta,
            q0,
            depth: 5,
            precision: 10,
            achieved_precision: None,
        }
    }

    #[test]
    fn test_minimal_delta_wins_regardless_of_q0() {
        let rows = vec![tuple(15, 40, 42), tuple(15, 38, 78)];
        assert_eq!(per_ring_dim(&rows), vec![tuple(15, 38, 78)]);
        assert_eq!(select_optimal(&rows), Some(tuple(15, 38, 78)));
    }

    #[test]
    fn test_q0_breaks_delta_ties() {
        let rows = vec![tuple(15, 38, 50), tuple(15, 38, 40), tuple(15, 39, 41)];
        assert_eq!(per_ring_dim(&rows), vec![tuple(15, 38, 40)]);
    }

    #[test]
    fn test_one_row_per_ring_dim() {
        let rows = vec![
            tuple(16, 30, 40),
            tuple(15, 45, 50),
            tuple(16, 28, 45),
            tuple(17, 25, 30),
            tuple(15, 44, 60),
        ];
        let reduced = per_ring_dim(&rows);
        assert_eq!(
            reduced,
            vec![tuple(15, 44, 60), tuple(16, 28, 45), tuple(17, 25, 30)]
        );
    }

    #[test]
    fn test_smallest_ring_dim_is_optimal() {
        let rows = vec![tuple(16, 25, 30), tuple(15, 45, 50)];
        assert_eq!(select_optimal(&rows), Some(tuple(15, 45, 50)));
    }

    #[test]
    fn test_empty_input() {
        assert!(per_ring_dim(&[]).is_empty());
        assert_eq!(select_optimal(&[]), None);

        let selection = select_from_result(&QueryResult::no_match());
        assert!(selection.per_ring_dim.is_empty());
        assert_eq!(selection.optimum, None);
    }

    #[test]
    fn test_select_from_result() {
        let result = QueryResult::matched(vec![tuple(16, 30, 40), tuple(14, 40, 42)], 5, 10);
        let selection = select_from_result(&result);
        assert_eq!(selection.per_ring_dim.len(), 2);
        assert_eq!(selection.optimum, Some(tuple(14, 40, 42)));
        assert_eq!(selection.optimum, select_optimal(&result.rows));
    }
}
