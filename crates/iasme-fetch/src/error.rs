//! Error types for the fetch layer.
//!
//! Only client construction can fail. Request failures are retried and
//! then reported as a missing page.

use thiserror::Error;

/// Errors raised while setting up the HTTP client.
#[derive(Debug, Error)]
pub enum FetchError {
    /// reqwest refused the client configuration
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias using `FetchError`.
pub type Result<T> = std::result::Result<T, FetchError>;
