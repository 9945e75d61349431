//! Search-space configuration for parameter table generation.
//!
//! The configuration is an explicit value passed to the bound calculator and the
//! table generator. It can be built from a named preset or loaded from a TOML file:
//!
//! ```toml
//! security_levels = [128]
//! log2_ring_dims = [14, 15, 16]
//! hamming_weights = [192, 256]
//! sigma = 3.19
//! log2_qi_upper = 58
//! log2_q0_upper = 60
//! max_depth = 32
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HAMMING_WEIGHTS, DEFAULT_LOG2_RING_DIMS, DEFAULT_SECURITY_LEVELS, LOG2_MODULUS_LIMIT,
    LOG2_Q0_UPPER, LOG2_QI_UPPER, LOG2_RING_DIM_MAX, MAX_DEPTH, MAX_DEPTH_LIMIT, SIGMA,
};
use crate::errors::{CkksParamsResult, ConfigError};

/// Cross-product of security levels, ring dimensions and Hamming weights to enumerate,
/// together with the fixed constants of the bound model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpaceConfig {
    /// Target security levels λ
    pub security_levels: Vec<u32>,
    /// Ring dimension exponents n, with N = 2^n
    pub log2_ring_dims: Vec<u32>,
    /// Secret-key Hamming weights h
    pub hamming_weights: Vec<u64>,
    /// Error standard deviation σ
    pub sigma: f64,
    /// Ceiling on log2(delta)
    pub log2_qi_upper: u32,
    /// Ceiling on log2(q0)
    pub log2_q0_upper: u32,
    /// Cap on the enumerated multiplicative depth
    pub max_depth: u32,
}

impl Default for SearchSpaceConfig {
    fn default() -> Self {
        Self {
            security_levels: DEFAULT_SECURITY_LEVELS.to_vec(),
            log2_ring_dims: DEFAULT_LOG2_RING_DIMS.to_vec(),
            hamming_weights: DEFAULT_HAMMING_WEIGHTS.to_vec(),
            sigma: SIGMA,
            log2_qi_upper: LOG2_QI_UPPER,
            log2_q0_upper: LOG2_Q0_UPPER,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Named presets, in the order they are listed by the CLI.
pub const PRESETS: [(&str, &str); 3] = [
    ("dev", "λ=128, log2(N) ∈ {14, 15}, h=256"),
    ("test", "λ=128, log2(N) ∈ {14..17}, h=256"),
    ("prod", "λ ∈ {128, 196, 256}, log2(N) ∈ {14..17}, h=256"),
];

impl SearchSpaceConfig {
    /// Get the configuration of a named preset (`dev`, `test`, `prod`).
    pub fn preset(name: &str) -> CkksParamsResult<Self> {
        let config = match name.to_lowercase().as_str() {
            "dev" => Self {
                security_levels: vec![128],
                log2_ring_dims: vec![14, 15],
                ..Self::default()
            },
            "test" => Self {
                security_levels: vec![128],
                ..Self::default()
            },
            "prod" => Self::default(),
            _ => {
                return Err(ConfigError::UnknownPreset {
                    name: name.to_string(),
                }
                .into());
            }
        };
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_toml_str(content: &str) -> CkksParamsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> CkksParamsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> CkksParamsResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Number of (security level, ring dimension, Hamming weight) combinations.
    pub fn combination_count(&self) -> usize {
        self.security_levels.len() * self.log2_ring_dims.len() * self.hamming_weights.len()
    }

    /// Check that the search space is non-empty and every constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security_levels.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "security_levels",
            });
        }
        if self.log2_ring_dims.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "log2_ring_dims",
            });
        }
        if self.hamming_weights.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "hamming_weights",
            });
        }

        if let Some(&level) = self.security_levels.iter().find(|&&l| l == 0) {
            return Err(ConfigError::InvalidEntry {
                field: "security_levels",
                value: level as u64,
                reason: "must be positive".to_string(),
            });
        }
        if let Some(&n) = self
            .log2_ring_dims
            .iter()
            .find(|&&n| n == 0 || n > LOG2_RING_DIM_MAX)
        {
            return Err(ConfigError::InvalidEntry {
                field: "log2_ring_dims",
                value: n as u64,
                reason: format!("must be in 1..={LOG2_RING_DIM_MAX}"),
            });
        }
        if let Some(&h) = self.hamming_weights.iter().find(|&&h| h == 0) {
            return Err(ConfigError::InvalidEntry {
                field: "hamming_weights",
                value: h,
                reason: "must be positive".to_string(),
            });
        }

        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ConfigError::InvalidSigma { sigma: self.sigma });
        }
        if self.log2_qi_upper == 0 || self.log2_qi_upper > LOG2_MODULUS_LIMIT {
            return Err(ConfigError::InvalidLimit {
                field: "log2_qi_upper",
                value: self.log2_qi_upper,
                reason: format!("must be in 1..={LOG2_MODULUS_LIMIT}"),
            });
        }
        // q0 starts at delta + 2 with delta >= 1
        if self.log2_q0_upper < 3 || self.log2_q0_upper > LOG2_MODULUS_LIMIT {
            return Err(ConfigError::InvalidLimit {
                field: "log2_q0_upper",
                value: self.log2_q0_upper,
                reason: format!("must be in 3..={LOG2_MODULUS_LIMIT}"),
            });
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidLimit {
                field: "max_depth",
                value: self.max_depth,
                reason: format!("must be in 1..={MAX_DEPTH_LIMIT}"),
            });
        }
        Ok(())
    }
}
