//! Persisted tables and the JSON storage boundary.
//!
//! The parameter table is written once per generation run and only read afterwards.
//! Every document carries [`TableMetadata`] describing the search space it was
//! generated from.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SearchSpaceConfig;
use crate::constants::{BOUNDS_FILENAME, TABLE_FILENAME};
use crate::errors::{CkksParamsResult, TableError};
use crate::record::{Bound, ParameterTuple};

/// Provenance of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub search_space: SearchSpaceConfig,
}

impl TableMetadata {
    pub fn new(search_space: SearchSpaceConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
            search_space,
        }
    }
}

/// The enumerated parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    pub metadata: TableMetadata,
    pub rows: Vec<ParameterTuple>,
}

impl ParameterTable {
    pub fn new(metadata: TableMetadata, rows: Vec<ParameterTuple>) -> Self {
        Self { metadata, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows generated for one security level
    pub fn rows_for_level(&self, security_level: u32) -> impl Iterator<Item = &ParameterTuple> {
        self.rows
            .iter()
            .filter(move |row| row.security_level == security_level)
    }
}

/// The bound rows of a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundTable {
    pub metadata: TableMetadata,
    pub rows: Vec<Bound>,
}

/// Trait for documents that are persisted as JSON files
pub trait JsonDocument: Serialize {
    /// Get the filename for the document
    fn filename(&self) -> &'static str;

    /// Convert the document to a pretty-printed JSON string
    fn to_json_string(&self) -> CkksParamsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document into `output_dir` and return the path of the file
    fn write_json(&self, output_dir: &Path) -> CkksParamsResult<PathBuf> {
        let output_path = output_dir.join(self.filename());
        self.write_json_to(&output_path)?;
        Ok(output_path)
    }

    /// Write the document to an explicit path
    fn write_json_to(&self, output_path: &Path) -> CkksParamsResult<()> {
        let mut file = File::create(output_path).map_err(|_| TableError::FileCreation {
            path: output_path.display().to_string(),
        })?;

        let json = self.to_json_string()?;
        file.write_all(json.as_bytes())
            .map_err(|e| TableError::FileWrite {
                reason: e.to_string(),
            })?;

        log::debug!("wrote {} bytes to {}", json.len(), output_path.display());
        Ok(())
    }
}

impl JsonDocument for ParameterTable {
    fn filename(&self) -> &'static str {
        TABLE_FILENAME
    }
}

impl JsonDocument for BoundTable {
    fn filename(&self) -> &'static str {
        BOUNDS_FILENAME
    }
}

/// Read a JSON document from disk.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CkksParamsResult<T> {
    let file = File::open(path).map_err(|e| TableError::FileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
