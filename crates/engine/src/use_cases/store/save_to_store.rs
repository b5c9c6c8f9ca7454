//! Insert one template into the remote store.

use std::sync::Arc;

use vdm_domain::{CombatantTemplate, TemplateCategory};

use crate::infrastructure::ports::{StoredTemplate, TemplateStore};

use super::error::SaveToStoreError;

pub struct SaveToStore {
    store: Arc<dyn TemplateStore>,
}

impl SaveToStore {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Insert the template, creating the table first if it is missing.
    /// Duplicate names are accepted.
    pub async fn execute(
        &self,
        template: CombatantTemplate,
        category: TemplateCategory,
    ) -> Result<StoredTemplate, SaveToStoreError> {
        if !self.store.is_available().await {
            self.store.ensure_table().await.map_err(|e| {
                tracing::warn!(error = %e, "Could not initialize template table");
                SaveToStoreError::Unavailable(e)
            })?;
        }

        let row = StoredTemplate::new(template, category);
        self.store
            .insert(vec![row.clone()])
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, name = %row.template.name(), "Failed to insert template");
                SaveToStoreError::Insert(e)
            })?;

        tracing::info!(name = %row.template.name(), category = %category, "Saved template to store");
        Ok(row)
    }
}
