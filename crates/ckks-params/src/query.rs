//! Degrading search over a generated parameter table.
//!
//! A request names a security level, a depth and a precision. When the requested depth
//! exists in the table for that level, only precision is relaxed (from the requested
//! value down to 1). Only when the depth is absent are the available depths tried,
//! largest first, each with the same precision sweep.
use std::collections::{BTreeMap, BTreeSet};

use shared::{ParameterTable, ParameterTuple, QueryRequest, QueryResult};

/// Read-only query engine over a parameter table
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    table: &'a ParameterTable,
}

/// Rows of one security level indexed by (depth, precision)
type LevelIndex<'a> = BTreeMap<(u32, u32), Vec<&'a ParameterTuple>>;

impl<'a> QueryEngine<'a> {
    pub fn new(table: &'a ParameterTable) -> Self {
        Self { table }
    }

    /// Distinct depths present for a security level.
    pub fn valid_depths(&self, security_level: u32) -> BTreeSet<u32> {
        self.table
            .rows_for_level(security_level)
            .map(|row| row.depth)
            .collect()
    }

    /// Depths the search visits for a request, in visiting order.
    ///
    /// The requested depth alone if it is available, otherwise every available
    /// depth in descending order.
    pub fn depth_candidates(&self, request: &QueryRequest) -> Vec<u32> {
        let valid_depths = self.valid_depths(request.security_level);
        if valid_depths.contains(&request.requested_depth) {
            vec![request.requested_depth]
        } else {
            valid_depths.into_iter().rev().collect()
        }
    }

    /// Run the degrading search for a request.
    ///
    /// Returns [`QueryResult::no_match`] when no depth and precision ≥ 1 match.
    pub fn query(&self, request: &QueryRequest) -> QueryResult {
        let index = self.index_level(request.security_level);
        if index.is_empty() {
            log::debug!("no rows for λ={}", request.security_level);
            return QueryResult::no_match();
        }

        let candidates = self.depth_candidates(request);
        if candidates.first() != Some(&request.requested_depth) {
            log::debug!(
                "depth {} unavailable for λ={}, trying {:?}",
                request.requested_depth,
                request.security_level,
                candidates
            );
        }

        for depth in candidates {
            if let Some(result) = Self::precision_sweep(&index, depth, request.requested_precision)
            {
                return result;
            }
        }

        log::debug!("no match for {request:?}");
        QueryResult::no_match()
    }

    fn index_level(&self, security_level: u32) -> LevelIndex<'a> {
        let mut index: LevelIndex<'a> = BTreeMap::new();
        for row in self.table.rows_for_level(security_level) {
            index.entry((row.depth, row.precision)).or_default().push(row);
        }
        index
    }

    fn precision_sweep(index: &LevelIndex<'_>, depth: u32, precision: u32) -> Option<QueryResult> {
        // nothing above the largest stored precision can match
        let highest = index
            .range((depth, 0)..=(depth, u32::MAX))
            .next_back()
            .map(|(&(_, stored), _)| stored)?;
        (1..=precision.min(highest)).rev().find_map(|current| {
            index.get(&(depth, current)).map(|rows| {
                log::debug!("matched {} rows at L={depth}, precision={current}", rows.len());
                QueryResult::matched(rows.iter().map(|&row| *row).collect(), depth, current)
            })
        })
    }
}
