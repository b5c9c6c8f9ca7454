//! Tracker endpoints. Combatants are addressed by their position in the turn
//! order; every success returns the full tracker view.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use vdm_domain::{CombatantTemplate, TurnOrder};
use vdm_shared::{
    AdjustHpRequest, CreateTokenRequest, EditTokenRequest, HpChangeData, SaveResultResponse,
    SetHpRequest, TemplateData, TrackerResponse, TrackerView,
};

use super::http::{ApiError, ApiJson};
use super::templates::save_result;
use crate::app::App;
use crate::use_cases::tracker::HpUpdate;

type TrackerResult = Result<Json<TrackerResponse>, ApiError>;

fn respond(order: &TurnOrder) -> Json<TrackerResponse> {
    Json(TrackerResponse::new(TrackerView::from(order)))
}

fn respond_hp(update: &HpUpdate) -> Json<TrackerResponse> {
    Json(
        TrackerResponse::new(TrackerView::from(&update.order))
            .with_hp_change(HpChangeData::from(update.change)),
    )
}

pub(super) async fn view(State(app): State<Arc<App>>) -> Json<TrackerResponse> {
    respond(&app.use_cases.tracker.snapshot().await)
}

pub(super) async fn add(
    State(app): State<Arc<App>>,
    ApiJson(body): ApiJson<CreateTokenRequest>,
) -> TrackerResult {
    let input = body.into_new_combatant()?;
    let order = app.use_cases.tracker.add(input).await?;
    Ok(respond(&order))
}

pub(super) async fn add_premade(
    State(app): State<Arc<App>>,
    ApiJson(body): ApiJson<TemplateData>,
) -> TrackerResult {
    let template = CombatantTemplate::try_from(body)?;
    let order = app.use_cases.tracker.add_premade(template).await;
    Ok(respond(&order))
}

pub(super) async fn update(
    State(app): State<Arc<App>>,
    Path(index): Path<usize>,
    ApiJson(body): ApiJson<EditTokenRequest>,
) -> TrackerResult {
    let edit = body.into_edit()?;
    let order = app.use_cases.tracker.update(index, edit).await?;
    Ok(respond(&order))
}

pub(super) async fn set_hp(
    State(app): State<Arc<App>>,
    Path(index): Path<usize>,
    ApiJson(body): ApiJson<SetHpRequest>,
) -> TrackerResult {
    let value = body.hp.parse("HP")?;
    let update = app.use_cases.tracker.set_hp(index, value).await?;
    Ok(respond_hp(&update))
}

pub(super) async fn adjust_hp(
    State(app): State<Arc<App>>,
    Path(index): Path<usize>,
    ApiJson(body): ApiJson<AdjustHpRequest>,
) -> TrackerResult {
    let delta = body.delta.parse("HP change")?;
    let update = app.use_cases.tracker.adjust_hp(index, delta).await?;
    Ok(respond_hp(&update))
}

pub(super) async fn toggle_faction(
    State(app): State<Arc<App>>,
    Path(index): Path<usize>,
) -> TrackerResult {
    let order = app.use_cases.tracker.toggle_faction(index).await?;
    Ok(respond(&order))
}

pub(super) async fn remove(State(app): State<Arc<App>>, Path(index): Path<usize>) -> TrackerResult {
    let order = app.use_cases.tracker.remove(index).await?;
    Ok(respond(&order))
}

/// Persist a live combatant as a custom template.
pub(super) async fn save(
    State(app): State<Arc<App>>,
    Path(index): Path<usize>,
) -> Result<Json<SaveResultResponse>, ApiError> {
    let template = app.use_cases.tracker.template_of(index).await?;
    let report = app.use_cases.templates.save.execute(template).await;
    Ok(Json(save_result(report)))
}

pub(super) async fn next(State(app): State<Arc<App>>) -> Json<TrackerResponse> {
    respond(&app.use_cases.tracker.next().await)
}

pub(super) async fn previous(State(app): State<Arc<App>>) -> Json<TrackerResponse> {
    respond(&app.use_cases.tracker.previous().await)
}

pub(super) async fn select(State(app): State<Arc<App>>, Path(index): Path<usize>) -> TrackerResult {
    let order = app.use_cases.tracker.select(index).await?;
    Ok(respond(&order))
}
