//! Remote template store endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use vdm_shared::{
    InitResponse, SaveTokenRequest, SaveTokenResponse, StatusResponse, StoreTokensResponse,
    StoredTemplateData, TokensByCategory,
};

use super::http::{ApiError, ApiJson};
use crate::app::App;
use crate::use_cases::store::SaveToStoreError;

pub(super) async fn test_connection(State(app): State<Arc<App>>) -> Response {
    match app.use_cases.store.test_connection.execute().await {
        Ok(()) => Json(StatusResponse::ok("ClickHouse connection successful")).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusResponse::failed(
                "ClickHouse connection failed",
                Some(e.to_string()),
            )),
        )
            .into_response(),
    }
}

pub(super) async fn init(State(app): State<Arc<App>>) -> Response {
    match app.use_cases.store.init.execute().await {
        Ok(added) => Json(InitResponse {
            success: true,
            message: format!("ClickHouse initialized successfully. Added {added} sample tokens."),
            tokens_added: added,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template store initialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::failed(
                    "Failed to initialize ClickHouse",
                    Some(e.to_string()),
                )),
            )
                .into_response()
        }
    }
}

pub(super) async fn list_tokens(
    State(app): State<Arc<App>>,
) -> (StatusCode, Json<StoreTokensResponse>) {
    match app.use_cases.store.list.execute().await {
        Ok(grouped) => (
            StatusCode::OK,
            Json(StoreTokensResponse {
                tokens: TokensByCategory::from(&grouped),
                available: true,
                error: None,
            }),
        ),
        Err(e) if e.is_unavailable() => {
            (StatusCode::OK, Json(StoreTokensResponse::unavailable(e.to_string())))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list stored templates");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StoreTokensResponse::unavailable(e.to_string())),
            )
        }
    }
}

pub(super) async fn save_token(
    State(app): State<Arc<App>>,
    ApiJson(body): ApiJson<SaveTokenRequest>,
) -> Result<Json<SaveTokenResponse>, ApiError> {
    let (template, category) = body.into_template()?;

    let row = app
        .use_cases
        .store
        .save
        .execute(template, category)
        .await
        .map_err(|e| match e {
            SaveToStoreError::Unavailable(_) => ApiError::ServiceUnavailable(e.to_string()),
            SaveToStoreError::Insert(_) => ApiError::Internal(e.to_string()),
        })?;

    Ok(Json(SaveTokenResponse {
        success: true,
        message: format!(
            "Token \"{}\" saved to ClickHouse successfully",
            row.template.name()
        ),
        token: StoredTemplateData::new(&row.template, row.category),
    }))
}
