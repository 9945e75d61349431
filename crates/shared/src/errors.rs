//! Error types for CKKS parameter selection
//!
//! This module defines the error types used across the workspace. The umbrella
//! [`CkksParamsError`] is what public fallible functions return; the detail enums
//! carry the context of a specific failure and convert into it.
//!
//! Infeasible bounds are not fatal: [`BoundError`] is returned as a value and the
//! caller decides whether to skip the combination that produced it.

use thiserror::Error;

/// Main error type for the CKKS parameter crates
#[derive(Error, Debug)]
pub enum CkksParamsError {
    /// Validation errors for query inputs and parameters
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Search-space configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Parameter table loading and storage errors
    #[error("Table error: {message}")]
    Table { message: String },

    /// Bound calculation errors
    #[error("Bound error: {message}")]
    Bound { message: String },

    /// I/O errors for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for CKKS parameter operations
pub type CkksParamsResult<T> = Result<T, CkksParamsError>;

/// Validation error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Security level validation error
    #[error("Invalid security level: {level} - {reason}")]
    SecurityLevel { level: u32, reason: String },

    /// Multiplicative depth validation error
    #[error("Invalid depth: {depth} - {reason}")]
    Depth { depth: u32, reason: String },

    /// Precision validation error
    #[error("Invalid precision: {precision} - {reason}")]
    Precision { precision: u32, reason: String },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A list in the search space has no entries
    #[error("'{field}' must contain at least one value")]
    EmptyList { field: &'static str },

    /// A list entry is outside its accepted range
    #[error("'{field}' contains invalid value {value}: {reason}")]
    InvalidEntry {
        field: &'static str,
        value: u64,
        reason: String,
    },

    /// Noise standard deviation is unusable
    #[error("sigma must be positive and finite, got {sigma}")]
    InvalidSigma { sigma: f64 },

    /// A bit-length ceiling or the depth cap is unusable
    #[error("'{field}' = {value} is invalid: {reason}")]
    InvalidLimit {
        field: &'static str,
        value: u32,
        reason: String,
    },

    /// Unknown preset name
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },
}

/// Parameter table error type
#[derive(Error, Debug)]
pub enum TableError {
    /// File creation error
    #[error("Failed to create table file: {path}")]
    FileCreation { path: String },

    /// File write error
    #[error("Failed to write table content: {reason}")]
    FileWrite { reason: String },

    /// File read error
    #[error("Failed to read table file {path}: {reason}")]
    FileRead { path: String, reason: String },
}

/// Bound calculation outcome for an infeasible (ring dimension, Hamming weight) pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundError {
    /// The lower bound on log2(delta) exceeds the per-level modulus ceiling
    #[error(
        "lower bound of log2(delta) is {min_log2_delta} for N={ring_dim}, h={hamming_weight}, above the ceiling {ceiling}; no valid solution exists"
    )]
    DeltaAboveCeiling {
        ring_dim: u64,
        hamming_weight: u64,
        min_log2_delta: u32,
        ceiling: u32,
    },
}

impl From<ValidationError> for CkksParamsError {
    fn from(err: ValidationError) -> Self {
        CkksParamsError::Validation {
            message: err.to_string(),
        }
    }
}

impl From<ConfigError> for CkksParamsError {
    fn from(err: ConfigError) -> Self {
        CkksParamsError::Config {
            message: err.to_string(),
        }
    }
}

impl From<TableError> for CkksParamsError {
    fn from(err: TableError) -> Self {
        CkksParamsError::Table {
            message: err.to_string(),
        }
    }
}

impl From<BoundError> for CkksParamsError {
    fn from(err: BoundError) -> Self {
        CkksParamsError::Bound {
            message: err.to_string(),
        }
    }
}
