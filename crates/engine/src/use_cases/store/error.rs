//! Store use case errors.

use crate::infrastructure::ports::StoreError;

/// Why stored templates could not be listed.
#[derive(Debug, thiserror::Error)]
pub enum ListStoredError {
    /// The table was missing and creating it failed.
    #[error("ClickHouse table initialization failed")]
    TableInitFailed(#[source] StoreError),

    /// The table was missing; it has been created but holds nothing yet.
    #[error("ClickHouse not available")]
    NotAvailable,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListStoredError {
    /// True when the failure is the store being absent rather than a query
    /// going wrong.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::TableInitFailed(_) | Self::NotAvailable)
    }
}

/// Why a template could not be inserted.
#[derive(Debug, thiserror::Error)]
pub enum SaveToStoreError {
    #[error("ClickHouse is not available and table could not be initialized")]
    Unavailable(#[source] StoreError),

    #[error("Failed to save token to ClickHouse")]
    Insert(#[source] StoreError),
}
