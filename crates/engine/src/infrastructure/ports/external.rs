//! External service port traits.

use async_trait::async_trait;
use vdm_domain::PortraitRef;

/// Checks that a portrait reference actually loads as an image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortraitValidator: Send + Sync {
    /// False on any failure, including timeouts. Never errors.
    async fn is_loadable(&self, portrait: &PortraitRef) -> bool;
}
