//! Response envelopes
//!
//! Every template and store endpoint answers with a `success` flag and, on
//! failure, an `error` message.

use serde::{Deserialize, Serialize};

use crate::dto::{HpChangeData, StoredTemplateData, TokensByCategory, TrackerView};

// =============================================================================
// Generic envelopes
// =============================================================================

/// Failure body used by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Success flag with an optional message and error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error,
        }
    }
}

// =============================================================================
// Remote store endpoints
// =============================================================================

/// Answer of `POST /api/clickhouse/init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResponse {
    pub success: bool,
    pub message: String,
    pub tokens_added: usize,
}

/// Answer of `GET /api/clickhouse/tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTokensResponse {
    pub tokens: TokensByCategory,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreTokensResponse {
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            tokens: TokensByCategory::default(),
            available: false,
            error: Some(error.into()),
        }
    }
}

/// Answer of `POST /api/clickhouse/save-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTokenResponse {
    pub success: bool,
    pub message: String,
    pub token: StoredTemplateData,
}

// =============================================================================
// Template catalog endpoints
// =============================================================================

/// Which sources answered a catalog load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSources {
    /// At least one template came from the file catalog
    pub files: bool,
    /// The remote store answered
    pub remote: bool,
}

/// Answer of `GET /api/tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTokensResponse {
    pub tokens: TokensByCategory,
    pub sources: TemplateSources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one persistence sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SinkOutcome {
    pub fn saved(filename: Option<String>) -> Self {
        Self {
            success: true,
            filename,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            filename: None,
            error: Some(error.into()),
        }
    }
}

/// Answer of the dual-sink save endpoints. The sinks are independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultResponse {
    pub local_file: SinkOutcome,
    pub remote: SinkOutcome,
}

impl SaveResultResponse {
    /// True when at least one sink stored the template.
    pub fn any_saved(&self) -> bool {
        self.local_file.success || self.remote.success
    }
}

// =============================================================================
// Tracker endpoints
// =============================================================================

/// Answer of every tracker endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerResponse {
    pub success: bool,
    pub tracker: TrackerView,
    /// Set by HP endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp_change: Option<HpChangeData>,
}

impl TrackerResponse {
    pub fn new(tracker: TrackerView) -> Self {
        Self {
            success: true,
            tracker,
            hp_change: None,
        }
    }

    pub fn with_hp_change(mut self, change: HpChangeData) -> Self {
        self.hp_change = Some(change);
        self
    }
}
