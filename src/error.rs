//! Error types

use thiserror::Error;

/// Errors raised while loading reference data or running a CSV batch.
///
/// Parsing a single address never fails; a field that cannot be extracted is
/// left empty in the [`AddressRecord`](crate::AddressRecord).
#[derive(Debug, Error)]
pub enum Error {
    /// Reference data could not be loaded
    #[error("Failed to load reference data: {0}")]
    DataLoadError(String),

    /// A required column is absent from a CSV header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
