//! Template persistence ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vdm_domain::{CombatantTemplate, TemplateCategory};

use super::error::{CatalogError, SinkError, StoreError};

/// A row of the remote template table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTemplate {
    pub template: CombatantTemplate,
    pub category: TemplateCategory,
    /// Set by the store when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredTemplate {
    pub fn new(template: CombatantTemplate, category: TemplateCategory) -> Self {
        Self {
            template,
            category,
            created_at: None,
        }
    }
}

// =============================================================================
// Remote template store (ClickHouse `tokens` table)
// =============================================================================

/// Append-only store of templates. No update or delete, no uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// True when the store answers and the template table exists.
    async fn is_available(&self) -> bool;

    /// Create the template table if it does not exist.
    async fn ensure_table(&self) -> Result<(), StoreError>;

    /// Every stored row, ordered by category then name.
    async fn list(&self) -> Result<Vec<StoredTemplate>, StoreError>;

    /// Insert rows and return how many were written.
    async fn insert(&self, rows: Vec<StoredTemplate>) -> Result<usize, StoreError>;
}

// =============================================================================
// File catalog
// =============================================================================

/// Read side of the on-disk template catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every template listed in the category's catalog.
    ///
    /// Unreadable or invalid template files are skipped; an error means the
    /// category as a whole could not be read.
    async fn load_category(
        &self,
        category: TemplateCategory,
    ) -> Result<Vec<CombatantTemplate>, CatalogError>;
}

/// Write side of the on-disk template catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateFileSink: Send + Sync {
    /// Write the template as a custom template file and return the file name.
    async fn write_custom(&self, template: &CombatantTemplate) -> Result<String, SinkError>;
}
