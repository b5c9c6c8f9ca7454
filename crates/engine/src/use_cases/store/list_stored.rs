//! List stored templates grouped by category.

use std::sync::Arc;

use vdm_domain::TemplatesByCategory;

use crate::infrastructure::ports::TemplateStore;

use super::error::ListStoredError;

pub struct ListStored {
    store: Arc<dyn TemplateStore>,
}

impl ListStored {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Every stored template, grouped and sorted by name.
    ///
    /// When the table is missing an attempt is made to create it, but the
    /// call still reports the store as unavailable.
    pub async fn execute(&self) -> Result<TemplatesByCategory, ListStoredError> {
        if !self.store.is_available().await {
            return match self.store.ensure_table().await {
                Ok(()) => Err(ListStoredError::NotAvailable),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not initialize template table");
                    Err(ListStoredError::TableInitFailed(e))
                }
            };
        }

        let rows = self.store.list().await?;
        tracing::debug!(rows = rows.len(), "Loaded stored templates");
        Ok(TemplatesByCategory::from_stored(
            rows.into_iter()
                .map(|row| (row.category.as_str(), row.template)),
        ))
    }
}
