//! Error types for port operations.

/// Remote template store errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store did not answer, or the table could not be created.
    #[error("Template store unavailable: {0}")]
    Unavailable(String),

    /// A query was rejected - includes the operation name for tracing.
    #[error("Template store error in {operation}: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },

    /// A row could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    /// Create a Query error with operation context.
    pub fn query(operation: &'static str, message: impl ToString) -> Self {
        Self::Query {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// File catalog errors. Individual template files that fail are skipped by
/// the adapter; these cover a whole category.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog not found: {path}")]
    Missing { path: String },

    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },
}

impl CatalogError {
    pub fn missing(path: impl ToString) -> Self {
        Self::Missing {
            path: path.to_string(),
        }
    }

    pub fn io(path: impl ToString, message: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Template file sink errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SinkError {
    pub fn io(path: impl ToString, message: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
