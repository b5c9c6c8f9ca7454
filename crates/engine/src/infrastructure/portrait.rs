//! Portrait checks
//!
//! A portrait is kept only if it would actually load. Remote URLs are fetched,
//! `data:` URIs are decoded and site-relative paths must exist under the
//! static root. Every check gives up after the configured timeout.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use vdm_domain::{PortraitKind, PortraitRef};

use crate::infrastructure::ports::PortraitValidator;

pub struct HttpPortraitValidator {
    client: Client,
    static_root: PathBuf,
    timeout: Duration,
}

impl HttpPortraitValidator {
    pub fn new(static_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            static_root: static_root.into(),
            timeout,
        }
    }

    async fn check(&self, portrait: &PortraitRef) -> bool {
        match portrait.kind() {
            PortraitKind::Remote => self.fetch(portrait.as_str()).await,
            PortraitKind::Embedded => embedded_image_decodes(portrait.as_str()),
            PortraitKind::SiteRelative => self.exists_under_root(portrait.as_str()).await,
            PortraitKind::Unknown => false,
        }
    }

    async fn fetch(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Portrait fetch failed");
                false
            }
        }
    }

    async fn exists_under_root(&self, site_path: &str) -> bool {
        let Some(path) = resolve_site_path(&self.static_root, site_path) else {
            return false;
        };
        tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

#[async_trait]
impl PortraitValidator for HttpPortraitValidator {
    async fn is_loadable(&self, portrait: &PortraitRef) -> bool {
        match tokio::time::timeout(self.timeout, self.check(portrait)).await {
            Ok(loadable) => {
                if !loadable {
                    tracing::warn!(portrait = %truncate(portrait.as_str()), "Portrait failed to load");
                }
                loadable
            }
            Err(_) => {
                tracing::warn!(
                    portrait = %truncate(portrait.as_str()),
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "Portrait check timed out"
                );
                false
            }
        }
    }
}

/// A `data:image/...` URI with a non-empty payload. Base64 payloads must decode.
fn embedded_image_decodes(uri: &str) -> bool {
    let Some((header, payload)) = uri.split_once(',') else {
        return false;
    };
    let header = header.to_ascii_lowercase();
    if !header.starts_with("data:image/") || payload.trim().is_empty() {
        return false;
    }
    if header.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map(|bytes| !bytes.is_empty())
            .unwrap_or(false)
    } else {
        true
    }
}

/// Map `/tokens/img/orc.png` onto the static root. Paths that climb out of
/// the root are rejected.
fn resolve_site_path(root: &Path, site_path: &str) -> Option<PathBuf> {
    let path_only = site_path.split(['?', '#']).next().unwrap_or(site_path);
    let relative = Path::new(path_only.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || !relative.components().all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Data URIs can be megabytes long; keep log lines short.
fn truncate(value: &str) -> &str {
    match value.char_indices().nth(80) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
