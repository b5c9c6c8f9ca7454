//! Portrait reference for token display
//!
//! The reference is opaque to the domain. It is classified only so that the
//! validator adapter knows how to check it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An image reference: remote URL, site-relative path, or embedded data URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortraitRef(String);

/// How a portrait reference should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitKind {
    /// `http://` or `https://`
    Remote,
    /// `data:` URI with the image inline
    Embedded,
    /// Path served by the tracker itself, e.g. `/tokens/default/img/orc.png`
    SiteRelative,
    /// Anything else; never loads
    Unknown,
}

impl PortraitRef {
    /// Wrap a reference. Blank input yields `None`, since an empty image field
    /// means "no portrait".
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> PortraitKind {
        let lower = self.0.get(..8).unwrap_or(&self.0).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            PortraitKind::Remote
        } else if lower.starts_with("data:") {
            PortraitKind::Embedded
        } else if self.0.starts_with('/') {
            PortraitKind::SiteRelative
        } else {
            PortraitKind::Unknown
        }
    }
}

impl fmt::Display for PortraitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PortraitRef> for String {
    fn from(portrait: PortraitRef) -> String {
        portrait.0
    }
}
