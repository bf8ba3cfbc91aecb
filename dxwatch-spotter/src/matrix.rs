//! Persisted DXCC work matrix
//!
//! The matrix file records which (entity, band) pairs the operator has
//! already confirmed: outer key DXCC number as a string, inner key band
//! label, value ignored. It is produced and updated outside the spotter;
//! this side only reads it, re-reading on every check so an externally
//! refreshed file takes effect without a restart.

use crate::error::{Error, Result};
use dxwatch_common::Band;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

type MatrixData = HashMap<String, HashMap<String, serde_json::Value>>;

/// Read-only view of the confirmed-work matrix file.
pub struct WorkMatrix {
    path: PathBuf,
}

impl WorkMatrix {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether the entity is already confirmed on the band.
    ///
    /// A missing entity or band key means "not confirmed". A file that
    /// cannot be read or parsed also answers "not confirmed": losing a
    /// genuine new-entity alert is worse than repeating one, so matrix
    /// trouble fails open and is logged as recoverable.
    pub fn confirmed(&self, dxcc: u32, band: Band) -> bool {
        match self.load() {
            Ok(data) => data
                .get(&dxcc.to_string())
                .map_or(false, |bands| bands.contains_key(band.label())),
            Err(e) => {
                warn!(
                    matrix = %self.path.display(),
                    error = %e,
                    "work matrix unreadable, treating {}/{} as unconfirmed",
                    dxcc,
                    band
                );
                false
            }
        }
    }

    fn load(&self) -> Result<MatrixData> {
        let raw = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Matrix(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn matrix_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_confirmed_and_unconfirmed_keys() {
        let file = matrix_file(r#"{"339": {"20": 1, "40": 1}, "291": {"20": 1}}"#);
        let matrix = WorkMatrix::new(file.path());
        assert!(matrix.confirmed(339, Band::B20));
        assert!(matrix.confirmed(339, Band::B40));
        assert!(!matrix.confirmed(339, Band::B15));
        assert!(!matrix.confirmed(291, Band::B40));
        // Entity absent entirely
        assert!(!matrix.confirmed(1, Band::B20));
    }

    #[test]
    fn test_inner_value_shape_is_irrelevant() {
        let file = matrix_file(r#"{"339": {"20": {"confirmed": "2023-01-01"}}}"#);
        let matrix = WorkMatrix::new(file.path());
        assert!(matrix.confirmed(339, Band::B20));
    }

    #[test]
    fn test_missing_file_fails_open() {
        let matrix = WorkMatrix::new("/nonexistent/dxcc_matrix.json");
        assert!(!matrix.confirmed(339, Band::B20));
    }

    #[test]
    fn test_garbage_file_fails_open() {
        let file = matrix_file("not json at all {");
        let matrix = WorkMatrix::new(file.path());
        assert!(!matrix.confirmed(339, Band::B20));
    }
}
