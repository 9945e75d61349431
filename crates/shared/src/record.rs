//! Record types for bounds, parameter tuples and queries.
//!
//! Field names follow Rust conventions; the serde attributes map them onto the
//! column names of the persisted tables (`securityLevel`, `log2RingDim`, `delta`,
//! `q0`, `depth`, `precision`, `achievedPrecision`).

use serde::{Deserialize, Serialize};

/// Derived bounds for one (security level, ring dimension, Hamming weight) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bound {
    pub security_level: u32,
    pub log2_ring_dim: u32,
    pub hamming_weight: u64,
    /// Upper bound on log2(Q), exclusive
    #[serde(rename = "maxLog2Q")]
    pub max_log2_q: u64,
    /// Lower bound on log2(delta)
    pub min_log2_delta: u32,
}

impl Bound {
    /// Ring dimension N = 2^log2_ring_dim
    pub fn ring_dim(&self) -> u64 {
        1u64 << self.log2_ring_dim
    }
}

/// One CKKS parameter candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterTuple {
    pub security_level: u32,
    pub log2_ring_dim: u32,
    /// Per-level scaling modulus bit-length
    #[serde(rename = "delta")]
    pub log2_delta: u32,
    /// Base modulus bit-length
    pub q0: u32,
    /// Multiplicative depth L
    pub depth: u32,
    /// Bits of precision implied by delta and the clean noise bound
    pub precision: u32,
    /// Empirically measured precision, merged in after generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_precision: Option<u32>,
}

impl ParameterTuple {
    /// log2(q) = q0 + L * delta
    pub fn log2_q(&self) -> u64 {
        self.q0 as u64 + self.depth as u64 * self.log2_delta as u64
    }

    /// log2(Q) = log2(q) + log2(q) / 4, the total modulus including the special modulus P
    pub fn log2_total_modulus(&self) -> f64 {
        let log2_q = self.log2_q() as f64;
        log2_q + log2_q / 4.0
    }

    /// Key identifying the row independently of the merged accuracy column
    pub fn key(&self) -> (u32, u32, u32, u32, u32, u32) {
        (
            self.security_level,
            self.log2_ring_dim,
            self.log2_delta,
            self.q0,
            self.depth,
            self.precision,
        )
    }

    /// Re-check the structural invariants against the bound the tuple was generated from.
    pub fn satisfies(&self, bound: &Bound, log2_q0_upper: u32) -> bool {
        self.q0 >= self.log2_delta + 2
            && self.q0 < 2 * self.log2_delta
            && self.q0 <= log2_q0_upper
            && self.log2_total_modulus() < bound.max_log2_q as f64
    }
}

/// A request for parameters at a security level, depth and precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub security_level: u32,
    pub requested_depth: u32,
    pub requested_precision: u32,
}

impl QueryRequest {
    pub fn new(security_level: u32, requested_depth: u32, requested_precision: u32) -> Self {
        Self {
            security_level,
            requested_depth,
            requested_precision,
        }
    }
}

/// Rows matching a request, tagged with the depth and precision actually satisfied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub rows: Vec<ParameterTuple>,
    pub actual_depth: Option<u32>,
    pub actual_precision: Option<u32>,
    pub row_count: usize,
}

impl QueryResult {
    pub fn matched(rows: Vec<ParameterTuple>, actual_depth: u32, actual_precision: u32) -> Self {
        Self {
            row_count: rows.len(),
            rows,
            actual_depth: Some(actual_depth),
            actual_precision: Some(actual_precision),
        }
    }

    /// The empty outcome of an exhausted search
    pub fn no_match() -> Self {
        Self {
            rows: Vec::new(),
            actual_depth: None,
            actual_precision: None,
            row_count: 0,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple() -> ParameterTuple {
        ParameterTuple {
            security_level: 128,
            log2_ring_dim: 15,
            log2_delta: 40,
            q0: 42,
            depth: 10,
            precision: 19,
            achieved_precision: None,
        }
    }

    #[test]
    fn test_total_modulus() {
        let t = tuple();
        assert_eq!(t.log2_q(), 442);
        assert_eq!(t.log2_total_modulus(), 552.5);
    }

    #[test]
    fn test_serialized_column_names() {
        let value = serde_json::to_value(tuple()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "delta",
                "depth",
                "log2RingDim",
                "precision",
                "q0",
                "securityLevel"
            ]
        );

        let enriched = ParameterTuple {
            achieved_precision: Some(17),
            ..tuple()
        };
        let value = serde_json::to_value(enriched).unwrap();
        assert_eq!(value["achievedPrecision"], 17);
    }

    #[test]
    fn test_satisfies_checks_each_invariant() {
        let bound = Bound {
            security_level: 128,
            log2_ring_dim: 15,
            hamming_weight: 256,
            max_log2_q: 992,
            min_log2_delta: 22,
        };
        assert!(tuple().satisfies(&bound, 60));

        let q0_too_small = ParameterTuple { q0: 41, ..tuple() };
        assert!(!q0_too_small.satisfies(&bound, 60));

        let q0_too_large = ParameterTuple {
            log2_delta: 58,
            q0: 61,
            depth: 1,
            ..tuple()
        };
        assert!(!q0_too_large.satisfies(&bound, 60));

        let too_deep = ParameterTuple { depth: 30, ..tuple() };
        assert!(!too_deep.satisfies(&bound, 60));
    }

    #[test]
    fn test_query_result_shapes() {
        let none = QueryResult::no_match();
        assert!(!none.is_match());
        assert_eq!(none.row_count, 0);
        assert_eq!(none.actual_depth, None);

        let some = QueryResult::matched(vec![tuple(), tuple()], 10, 19);
        assert!(some.is_match());
        assert_eq!(some.row_count, 2);
        assert_eq!(some.actual_precision, Some(19));
    }
}
