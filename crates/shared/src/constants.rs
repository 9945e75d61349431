//! Constants
//!
//! Fixed values of the CKKS bound model and the default search space.
//! These only seed [`crate::config::SearchSpaceConfig`]; the algorithms read
//! everything from the configuration they are given.

/// Standard deviation σ of the error distribution
pub const SIGMA: f64 = 3.19;

/// Ceiling on the per-level (scaling) modulus bit-length log2(q_i)
pub const LOG2_QI_UPPER: u32 = 58;

/// Ceiling on the base modulus bit-length log2(q_0)
pub const LOG2_Q0_UPPER: u32 = 60;

/// Maximum multiplicative depth L enumerated per (delta, q0) pair
pub const MAX_DEPTH: u32 = 32;

/// Base modulus bit-length used when searching the largest depth for a fixed delta
pub const FIXED_LOG2_Q0: u32 = 60;

/// Security levels λ of the reference sweep
pub const DEFAULT_SECURITY_LEVELS: [u32; 3] = [128, 196, 256];

/// Ring dimension exponents log2(N) of the reference sweep
pub const DEFAULT_LOG2_RING_DIMS: [u32; 4] = [14, 15, 16, 17];

/// Secret-key Hamming weights h of the reference sweep
pub const DEFAULT_HAMMING_WEIGHTS: [u64; 1] = [256];

/// Largest accepted bit-length ceiling for log2(q_i) and log2(q_0)
pub const LOG2_MODULUS_LIMIT: u32 = 64;

/// Largest accepted depth cap
pub const MAX_DEPTH_LIMIT: u32 = 1024;

/// Largest accepted ring dimension exponent
pub const LOG2_RING_DIM_MAX: u32 = 62;

/// Default filename of the persisted parameter table
pub const TABLE_FILENAME: &str = "big_table.json";

/// Default filename of the persisted bounds table
pub const BOUNDS_FILENAME: &str = "bounds.json";
