//! Unified error type for line reconstruction
//!
//! Only conditions that make a whole batch untrustworthy surface as [`OdreError`].
//! Per-line problems (malformed topology, unresolved substations) are recorded in
//! [`crate::Diagnostics`] and never abort a batch.
//!
//! # Example
//!
//! ```ignore
//! use odre_core::{OdreError, OdreResult};
//!
//! fn load(rows: &RowSet) -> OdreResult<()> {
//!     let substations = parse_substations(rows)?;
//!     let lines = parse_lines(&aerial, &underground, &substations)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Error type for all reconstruction operations.
#[derive(Error, Debug)]
pub enum OdreError {
    /// A coordinate cell is not valid decimal text. Aborts the batch.
    #[error("Unparsable coordinate in column '{column}' at row {row}: '{value}'")]
    UnparsableCoordinate {
        column: String,
        value: String,
        row: usize,
    },

    /// A required column is absent from the row header
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    /// The line identifier is too short to carry two substation codes
    #[error("Line identifier '{0}' is too short to slice substation codes")]
    ShortIdentifier(String),

    /// A dataset tag that is not part of the known table
    #[error("Unknown dataset '{0}'")]
    UnknownDataset(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file access, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using OdreError.
pub type OdreResult<T> = Result<T, OdreError>;

impl From<anyhow::Error> for OdreError {
    fn from(err: anyhow::Error) -> Self {
        OdreError::Other(err.to_string())
    }
}

impl From<String> for OdreError {
    fn from(s: String) -> Self {
        OdreError::Other(s)
    }
}

impl From<&str> for OdreError {
    fn from(s: &str) -> Self {
        OdreError::Other(s.to_string())
    }
}
