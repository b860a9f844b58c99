use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the layercheck library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The probe turns every variant into text with `to_string()`, so the
/// messages are what callers end up reading.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for ODBC driver manager and driver diagnostics.
    #[cfg(feature = "odbc")]
    #[error(transparent)]
    Odbc(#[from] odbc_api::Error),

    /// Failure reported by a connector backend that is not ODBC.
    #[error("{0}")]
    Driver(String),

    /// The statement ran but produced no result set.
    #[error("query `{query}` did not produce a result set")]
    NoResultSet { query: String },

    /// The result set had no rows.
    #[error("query `{query}` returned no rows")]
    EmptyResult { query: String },

    /// The first column of the first row was NULL.
    #[error("query `{query}` returned NULL")]
    NullValue { query: String },

    /// A diagnostic command ran but exited unsuccessfully.
    #[error("`{command} {}` exited with {status}: {stderr}", .target.display())]
    CommandFailed {
        command: String,
        target: PathBuf,
        status: String,
        stderr: String,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
