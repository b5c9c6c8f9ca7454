//! Custom template files written to the on-disk catalog.

use async_trait::async_trait;
use regex_lite::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use vdm_domain::{parse_catalog_listing, CombatantTemplate, TemplateCategory};
use vdm_shared::TemplateData;

use crate::infrastructure::catalog_files::CATALOG_FILE;
use crate::infrastructure::ports::{SinkError, TemplateFileSink};

static NON_ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("valid regex"));

/// File name for a template: trimmed, lowercased, and every character
/// outside `[a-z0-9]` replaced by `-`, plus `.json`.
pub fn template_file_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    format!("{}.json", NON_ALPHANUMERIC_RE.replace_all(&lowered, "-"))
}

/// Writes `<root>/custom/<file>.json` and registers it in the custom catalog.
pub struct FileTemplateSink {
    root: PathBuf,
    // Serialises catalog.txt read-modify-write between concurrent saves
    write_lock: Mutex<()>,
}

impl FileTemplateSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn register(&self, dir: &std::path::Path, file_name: &str) -> Result<(), SinkError> {
        let catalog_path = dir.join(CATALOG_FILE);
        let existing = match tokio::fs::read_to_string(&catalog_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(SinkError::io(catalog_path.display(), e)),
        };

        if parse_catalog_listing(&existing).iter().any(|f| f == file_name) {
            return Ok(());
        }

        let mut entry = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            entry.push('\n');
        }
        entry.push_str(file_name);
        entry.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&catalog_path)
            .await
            .map_err(|e| SinkError::io(catalog_path.display(), e))?;
        file.write_all(entry.as_bytes())
            .await
            .map_err(|e| SinkError::io(catalog_path.display(), e))?;
        Ok(())
    }
}

#[async_trait]
impl TemplateFileSink for FileTemplateSink {
    async fn write_custom(&self, template: &CombatantTemplate) -> Result<String, SinkError> {
        let file_name = template_file_name(template.name().as_str());
        let dir = self.root.join(TemplateCategory::Custom.as_str());
        let path = dir.join(&file_name);

        let contents = serde_json::to_string_pretty(&[TemplateData::from(template)])
            .map_err(SinkError::serialization)?;

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| SinkError::io(dir.display(), e))?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| SinkError::io(path.display(), e))?;
        self.register(&dir, &file_name).await?;

        tracing::info!(file = %path.display(), "Saved custom template file");
        Ok(file_name)
    }
}
