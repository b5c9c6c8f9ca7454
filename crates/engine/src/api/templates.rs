//! Premade template endpoints: the merged load list and dual-sink save.

use axum::{extract::State, Json};
use std::sync::Arc;

use vdm_shared::{
    LoadTokensResponse, SaveResultResponse, SaveTokenRequest, SinkOutcome, TemplateSources,
    TokensByCategory,
};

use super::http::{ApiError, ApiJson};
use crate::app::App;
use crate::use_cases::templates::SaveReport;

pub(super) async fn load_all(State(app): State<Arc<App>>) -> Json<LoadTokensResponse> {
    let loaded = app.use_cases.templates.load.execute().await;
    Json(LoadTokensResponse {
        tokens: TokensByCategory::from(&loaded.templates),
        sources: TemplateSources {
            files: loaded.files_available,
            remote: loaded.remote_available,
        },
        error: loaded.error,
    })
}

/// Saved templates always land in the custom category.
pub(super) async fn save(
    State(app): State<Arc<App>>,
    ApiJson(body): ApiJson<SaveTokenRequest>,
) -> Result<Json<SaveResultResponse>, ApiError> {
    let (template, _) = body.into_template()?;
    let report = app.use_cases.templates.save.execute(template).await;
    Ok(Json(save_result(report)))
}

pub(super) fn save_result(report: SaveReport) -> SaveResultResponse {
    SaveResultResponse {
        local_file: match report.local_file {
            Ok(filename) => SinkOutcome::saved(Some(filename)),
            Err(e) => SinkOutcome::failed(e.to_string()),
        },
        remote: match report.remote {
            Ok(()) => SinkOutcome::saved(None),
            Err(e) => SinkOutcome::failed(e.to_string()),
        },
    }
}
