//! Template catalog read from disk
//!
//! Layout under the tokens root:
//!
//! ```text
//! <root>/default/catalog.txt
//! <root>/default/goblin.json
//! <root>/custom/catalog.txt
//! ```
//!
//! Each template file holds a JSON array of templates.

use async_trait::async_trait;
use futures_util::future::join_all;
use std::path::{Path, PathBuf};

use vdm_domain::{parse_catalog_listing, CombatantTemplate, TemplateCategory};
use vdm_shared::TemplateData;

use crate::infrastructure::ports::{CatalogError, CatalogSource};

/// Name of the per-category listing file.
pub const CATALOG_FILE: &str = "catalog.txt";

pub struct FileCatalogSource {
    root: PathBuf,
}

impl FileCatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn category_dir(&self, category: TemplateCategory) -> PathBuf {
        self.root.join(category.as_str())
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load_category(
        &self,
        category: TemplateCategory,
    ) -> Result<Vec<CombatantTemplate>, CatalogError> {
        let dir = self.category_dir(category);
        let catalog_path = dir.join(CATALOG_FILE);

        let listing = match tokio::fs::read_to_string(&catalog_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::missing(catalog_path.display()));
            }
            Err(e) => return Err(CatalogError::io(catalog_path.display(), e)),
        };

        let files: Vec<PathBuf> = parse_catalog_listing(&listing)
            .into_iter()
            .filter_map(|name| listed_file(&dir, &name))
            .collect();

        let loaded = join_all(files.iter().map(|path| load_template_file(path))).await;
        let templates: Vec<CombatantTemplate> = loaded.into_iter().flatten().collect();

        tracing::debug!(
            category = %category,
            files = files.len(),
            templates = templates.len(),
            "Loaded template catalog"
        );
        Ok(templates)
    }
}

/// Resolve a listed file name inside the category directory.
///
/// Listings may only name files directly in that directory.
fn listed_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let is_plain = path.components().count() == 1
        && path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)));
    if !is_plain {
        tracing::warn!(file = %name, "Ignoring catalog entry outside the category directory");
        return None;
    }
    Some(dir.join(path))
}

/// Load one template file. Failures are logged and yield nothing.
async fn load_template_file(path: &Path) -> Vec<CombatantTemplate> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Failed to read template file");
            return Vec::new();
        }
    };

    let entries: Vec<TemplateData> = match serde_json::from_str(&text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Failed to parse template file");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let name = entry.name.clone();
            match CombatantTemplate::try_from(entry) {
                Ok(template) => Some(template),
                Err(e) => {
                    tracing::warn!(
                        file = %path.display(),
                        name = %name,
                        error = %e,
                        "Skipping invalid template"
                    );
                    None
                }
            }
        })
        .collect()
}
