//! Feature flag routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, put},
};

use crate::{
    dto::flags::{
        BoldnessToggle, CreativityToggle, ExecutionToggle, FlagToggle, FlagsResponse,
        HumorToggle, MessageResponse, PresentationToggle,
    },
    error::AppError,
    services::flag_service,
    state::SharedState,
};

/// Feature flag endpoints, mounted under `/api`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/allFlags", get(all_flags))
        .route("/isFormeBoldness", put(put_boldness))
        .route("/isFormeExecution", put(put_execution))
        .route("/isFormeHumor", put(put_humor))
        .route("/isFormeCreativity", put(put_creativity))
        .route("/isFormePresentation", put(put_presentation))
}

#[utoipa::path(
    get,
    path = "/api/allFlags",
    tag = "flags",
    responses(
        (status = 200, description = "Current feature flags", body = FlagsResponse),
        (status = 503, description = "Flag store unavailable")
    )
)]
/// Return every gag flag of the settings row.
pub async fn all_flags(State(state): State<SharedState>) -> Result<Json<FlagsResponse>, AppError> {
    Ok(Json(flag_service::all_flags(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/isFormeBoldness",
    tag = "flags",
    request_body = BoldnessToggle,
    responses((status = 200, description = "Flag updated", body = MessageResponse))
)]
/// Enable or disable the boldness gag.
pub async fn put_boldness(
    State(state): State<SharedState>,
    payload: Result<Json<BoldnessToggle>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    toggle(&state, payload).await
}

#[utoipa::path(
    put,
    path = "/api/isFormeExecution",
    tag = "flags",
    request_body = ExecutionToggle,
    responses((status = 200, description = "Flag updated", body = MessageResponse))
)]
/// Enable or disable the execution gag.
pub async fn put_execution(
    State(state): State<SharedState>,
    payload: Result<Json<ExecutionToggle>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    toggle(&state, payload).await
}

#[utoipa::path(
    put,
    path = "/api/isFormeHumor",
    tag = "flags",
    request_body = HumorToggle,
    responses((status = 200, description = "Flag updated", body = MessageResponse))
)]
/// Enable or disable the humor gag.
pub async fn put_humor(
    State(state): State<SharedState>,
    payload: Result<Json<HumorToggle>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    toggle(&state, payload).await
}

#[utoipa::path(
    put,
    path = "/api/isFormeCreativity",
    tag = "flags",
    request_body = CreativityToggle,
    responses((status = 200, description = "Flag updated", body = MessageResponse))
)]
/// Enable or disable the creativity gag.
pub async fn put_creativity(
    State(state): State<SharedState>,
    payload: Result<Json<CreativityToggle>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    toggle(&state, payload).await
}

#[utoipa::path(
    put,
    path = "/api/isFormePresentation",
    tag = "flags",
    request_body = PresentationToggle,
    responses((status = 200, description = "Flag updated", body = MessageResponse))
)]
/// Enable or disable the presentation gag.
pub async fn put_presentation(
    State(state): State<SharedState>,
    payload: Result<Json<PresentationToggle>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    toggle(&state, payload).await
}

async fn toggle<T: FlagToggle>(
    state: &SharedState,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload?;
    Ok(Json(flag_service::apply_toggle(state, body).await?))
}
