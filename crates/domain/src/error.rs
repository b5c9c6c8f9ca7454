//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a user-supplied value breaks a combatant invariant:
    /// - Name is empty after trimming
    /// - Total HP is not positive
    /// - Current HP is negative
    ///
    /// # Example
    /// ```ignore
    /// if total_hp <= 0 {
    ///     return Err(DomainError::validation("Total HP must be a positive number"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The message without the error-kind prefix, suitable for showing in a form.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Parse(msg) => msg.clone(),
            Self::NotFound { entity_type, id } => format!("{entity_type} {id} not found"),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_has_no_prefix() {
        let err = DomainError::validation("Name is required");
        assert_eq!(err.to_string(), "Validation failed: Name is required");
        assert_eq!(err.message(), "Name is required");
    }

    #[test]
    fn not_found_is_detected() {
        let err = DomainError::not_found("Combatant", "7");
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Combatant 7 not found");
        assert!(!DomainError::parse("bad").is_not_found());
    }
}
