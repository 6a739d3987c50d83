//! Error types for the pagination core.

use thiserror::Error;

/// Failures reported by the messaging backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The target message no longer exists (deleted externally).
    #[error("message not found")]
    NotFound,

    /// The backend rejected or failed the request for any other reason.
    #[error("messaging backend unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

/// Failures surfaced by `PageStore` and `Pages`.
#[derive(Debug, Error)]
pub enum PageError {
    /// A page outside `1..=total_pages` was requested from the store.
    /// The session's own bounds checks keep this out of normal operation.
    #[error("page {page} is out of range (1..={total_pages})")]
    OutOfRange { page: usize, total_pages: usize },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
