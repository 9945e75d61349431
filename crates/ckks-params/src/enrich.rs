//! Merge of empirically measured precision into a parameter table.
//!
//! Measurements come from running the scheme on each tuple, possibly several times.
//! The merged `achievedPrecision` of a row is the minimum of its strictly positive
//! measurements, truncated to whole bits. The column is informational only: query
//! and selection never read it.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{ParameterTable, ParameterTuple};

/// One measured run of a parameter tuple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecisionMeasurement {
    pub security_level: u32,
    pub log2_ring_dim: u32,
    #[serde(rename = "delta")]
    pub log2_delta: u32,
    pub q0: u32,
    pub depth: u32,
    pub precision: u32,
    pub achieved_precision: f64,
}

impl PrecisionMeasurement {
    fn key(&self) -> (u32, u32, u32, u32, u32, u32) {
        (
            self.security_level,
            self.log2_ring_dim,
            self.log2_delta,
            self.q0,
            self.depth,
            self.precision,
        )
    }
}

/// Return a copy of `table` with measured precision attached.
///
/// Rows without any positive measurement keep their current value.
pub fn merge_achieved_precision(
    table: &ParameterTable,
    measurements: &[PrecisionMeasurement],
) -> ParameterTable {
    let mut minima: HashMap<_, f64> = HashMap::new();
    for measurement in measurements
        .iter()
        .filter(|m| m.achieved_precision > 0.0)
    {
        minima
            .entry(measurement.key())
            .and_modify(|min| *min = min.min(measurement.achieved_precision))
            .or_insert(measurement.achieved_precision);
    }

    let mut merged = 0usize;
    let rows: Vec<ParameterTuple> = table
        .rows
        .iter()
        .map(|row| match minima.get(&row.key()) {
            Some(min) => {
                merged += 1;
                ParameterTuple {
                    achieved_precision: Some(min.trunc() as u32),
                    ..*row
                }
            }
            None => *row,
        })
        .collect();

    log::info!(
        "merged measurements into {merged} of {} rows ({} measured tuples)",
        rows.len(),
        minima.len()
    );

    ParameterTable::new(table.metadata.clone(), rows)
}
