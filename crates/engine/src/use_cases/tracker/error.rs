//! Tracker operation errors.

use vdm_domain::DomainError;

/// Errors that can occur while changing the turn order.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TrackerError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_not_found(),
        }
    }
}
