//! Typed error handling for paging
//!
//! Malformed paging or sort input is never an error: it is clamped or
//! ignored. Errors are reserved for the data source failing, for
//! cancellation, and for explicit validation of caller configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! match paginate(query, &request, &pagination, &sort, &cancel).await {
//!     Ok(page) => render(page),
//!     Err(PagingError::Cancelled) => tracing::debug!("client went away"),
//!     Err(PagingError::DataSource(e)) => return Err(e),
//!     Err(e) => tracing::error!(error = %e, "paging failed"),
//! }
//! ```

use thiserror::Error;

/// The main error type for paging operations
#[derive(Debug, Error)]
pub enum PagingError {
    /// The data source failed a count or fetch round-trip; carried unchanged
    #[error(transparent)]
    DataSource(#[from] anyhow::Error),

    /// The operation was cancelled before a complete result was assembled
    #[error("paging operation was cancelled")]
    Cancelled,

    /// Sort options violate a documented precondition
    #[error("invalid sort options for field '{field}': {reason}")]
    InvalidSortOptions { field: String, reason: String },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl PagingError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PagingError::DataSource(_) => "DATA_SOURCE_ERROR",
            PagingError::Cancelled => "CANCELLED",
            PagingError::InvalidSortOptions { .. } => "INVALID_SORT_OPTIONS",
            PagingError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PagingError::Cancelled)
    }
}

impl From<serde_yaml::Error> for PagingError {
    fn from(err: serde_yaml::Error) -> Self {
        PagingError::Config(err.to_string())
    }
}

impl From<std::io::Error> for PagingError {
    fn from(err: std::io::Error) -> Self {
        PagingError::Config(err.to_string())
    }
}
