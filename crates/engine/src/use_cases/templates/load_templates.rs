//! Load every premade template for the load dialog.

use std::sync::Arc;

use vdm_domain::{CombatantTemplate, TemplateCategory, TemplatesByCategory};

use crate::infrastructure::ports::CatalogSource;
use crate::use_cases::store::ListStored;

/// Merged templates and which sources contributed.
#[derive(Debug, Clone, Default)]
pub struct LoadedTemplates {
    pub templates: TemplatesByCategory,
    /// At least one template came from the file catalog.
    pub files_available: bool,
    /// The remote store answered.
    pub remote_available: bool,
    /// Why the remote store was skipped, if it was.
    pub error: Option<String>,
}

pub struct LoadTemplates {
    catalog: Arc<dyn CatalogSource>,
    list_stored: Arc<ListStored>,
}

impl LoadTemplates {
    pub fn new(catalog: Arc<dyn CatalogSource>, list_stored: Arc<ListStored>) -> Self {
        Self {
            catalog,
            list_stored,
        }
    }

    /// Load both catalog categories and the remote store concurrently.
    /// Source failures only shrink the result.
    pub async fn execute(&self) -> LoadedTemplates {
        let (default, custom, remote) = tokio::join!(
            self.load_category(TemplateCategory::Default),
            self.load_category(TemplateCategory::Custom),
            self.list_stored.execute(),
        );

        let files = TemplatesByCategory { default, custom };
        let files_available = !files.is_empty();

        let (remote, remote_available, error) = match remote {
            Ok(remote) => (remote, true, None),
            Err(e) => {
                tracing::warn!(error = %e, "Remote templates unavailable, using files only");
                (TemplatesByCategory::new(), false, Some(e.to_string()))
            }
        };

        let templates = TemplatesByCategory::merge(files, remote);
        tracing::debug!(
            total = templates.total(),
            files_available,
            remote_available,
            "Loaded premade templates"
        );

        LoadedTemplates {
            templates,
            files_available,
            remote_available,
            error,
        }
    }

    async fn load_category(&self, category: TemplateCategory) -> Vec<CombatantTemplate> {
        match self.catalog.load_category(category).await {
            Ok(templates) => templates,
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "Template catalog unavailable");
                Vec::new()
            }
        }
    }
}
