//! Premade template use cases.
//!
//! Loading merges the on-disk catalog with the remote store. Saving writes to
//! both and reports each outcome on its own.

mod load_templates;
mod save_template;

use std::sync::Arc;

use crate::infrastructure::ports::{CatalogSource, TemplateFileSink};
use crate::use_cases::store::{ListStored, SaveToStore};

pub use load_templates::{LoadTemplates, LoadedTemplates};
pub use save_template::{SaveReport, SaveTemplate};

/// Container for template use cases.
pub struct TemplateUseCases {
    pub load: Arc<LoadTemplates>,
    pub save: Arc<SaveTemplate>,
}

impl TemplateUseCases {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        sink: Arc<dyn TemplateFileSink>,
        list_stored: Arc<ListStored>,
        save_to_store: Arc<SaveToStore>,
    ) -> Self {
        Self {
            load: Arc::new(LoadTemplates::new(catalog, list_stored)),
            save: Arc::new(SaveTemplate::new(sink, save_to_store)),
        }
    }
}
