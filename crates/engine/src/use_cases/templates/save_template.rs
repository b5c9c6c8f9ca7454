//! Persist a custom template to the file catalog and the remote store.

use std::sync::Arc;

use vdm_domain::{CombatantTemplate, TemplateCategory};

use crate::infrastructure::ports::{SinkError, TemplateFileSink};
use crate::use_cases::store::{SaveToStore, SaveToStoreError};

/// Independent outcome of each sink.
#[derive(Debug)]
pub struct SaveReport {
    /// File name written under the custom catalog.
    pub local_file: Result<String, SinkError>,
    pub remote: Result<(), SaveToStoreError>,
}

impl SaveReport {
    pub fn any_saved(&self) -> bool {
        self.local_file.is_ok() || self.remote.is_ok()
    }
}

pub struct SaveTemplate {
    sink: Arc<dyn TemplateFileSink>,
    save_to_store: Arc<SaveToStore>,
}

impl SaveTemplate {
    pub fn new(sink: Arc<dyn TemplateFileSink>, save_to_store: Arc<SaveToStore>) -> Self {
        Self {
            sink,
            save_to_store,
        }
    }

    /// Write to both sinks concurrently. Neither failure affects the other.
    pub async fn execute(&self, template: CombatantTemplate) -> SaveReport {
        let (local_file, remote) = tokio::join!(
            self.sink.write_custom(&template),
            self.save_to_store
                .execute(template.clone(), TemplateCategory::Custom),
        );

        if let Err(e) = &local_file {
            tracing::warn!(name = %template.name(), error = %e, "Failed to write template file");
        }
        if let Err(e) = &remote {
            tracing::warn!(name = %template.name(), error = %e, "Failed to save template remotely");
        }

        SaveReport {
            local_file,
            remote: remote.map(|_| ()),
        }
    }
}
