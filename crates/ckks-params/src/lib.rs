//! CKKS Parameter Selection Library
//!
//! Enumerates CKKS parameter tuples (ring dimension, scaling modulus, base modulus,
//! depth) that satisfy a lattice security bound and a noise bound, and searches the
//! resulting table for the tuple closest to a requested depth and precision.
//!
//! - **`bounds`**: Security and noise bounds for (λ, N, h)
//! - **`table`**: Exhaustive table generation over a search space
//! - **`query`**: Degrading search by depth and precision
//! - **`optimal`**: Reduction of a result set to its optimal tuple
//! - **`enrich`**: Merge of measured precision into a table

pub mod bounds;
pub mod enrich;
pub mod optimal;
pub mod query;
pub mod table;
pub mod utils;

pub use bounds::{BoundCalculator, DepthLimit, split_log_q};
pub use enrich::{PrecisionMeasurement, merge_achieved_precision};
pub use optimal::{OptimalSelection, per_ring_dim, select_from_result, select_optimal};
pub use query::QueryEngine;
pub use table::{CombinationOutcome, GenerationReport, InfeasibleCombination, TableGenerator};
