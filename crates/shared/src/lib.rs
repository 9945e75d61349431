//! Shared records, configuration and error types for CKKS parameter selection
//!
//! This crate provides the data model used across the workspace: the bound and
//! parameter-tuple records, the search-space configuration, the persisted table
//! documents, and validation of query inputs.
//!
//! - **`config`**: Search-space configuration, presets and TOML loading
//! - **`constants`**: Constants of the bound model and the default search space
//! - **`errors`**: Error types and the crate-wide result alias
//! - **`record`**: `Bound`, `ParameterTuple`, `QueryRequest` and `QueryResult`
//! - **`storage`**: Persisted tables and the JSON storage boundary
//! - **`validation`**: Input validation performed before a query is run

// Core modules
pub mod config;
pub mod constants;
pub mod errors;
pub mod record;
pub mod storage;

// Re-export commonly used items for convenience
pub use config::SearchSpaceConfig;
pub use errors::{
    BoundError, CkksParamsError, CkksParamsResult, ConfigError, TableError, ValidationError,
};
pub use record::{Bound, ParameterTuple, QueryRequest, QueryResult};
pub use storage::{BoundTable, JsonDocument, ParameterTable, TableMetadata, load_json};

/// Validation utilities for query inputs
///
/// Blank or out-of-range query fields are rejected here, before a request
/// reaches the query engine.
pub mod validation {
    use crate::errors::{CkksParamsResult, ValidationError};
    use crate::record::QueryRequest;

    /// Validate that a security level is positive
    pub fn validate_security_level(level: u32) -> CkksParamsResult<()> {
        if level == 0 {
            return Err(ValidationError::SecurityLevel {
                level,
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Validate a query request
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the security level, depth and precision are all at least 1.
    pub fn validate_query(request: &QueryRequest) -> CkksParamsResult<()> {
        validate_security_level(request.security_level)?;

        if request.requested_depth == 0 {
            return Err(ValidationError::Depth {
                depth: request.requested_depth,
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if request.requested_precision == 0 {
            return Err(ValidationError::Precision {
                precision: request.requested_precision,
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_validate_query() {
            assert!(validate_query(&QueryRequest::new(128, 5, 20)).is_ok());
            assert!(validate_query(&QueryRequest::new(0, 5, 20)).is_err());
            assert!(validate_query(&QueryRequest::new(128, 0, 20)).is_err());

            let err = validate_query(&QueryRequest::new(128, 5, 0)).unwrap_err();
            assert!(err.to_string().contains("Invalid precision"));
        }
    }
}
