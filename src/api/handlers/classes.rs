use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{ClassUpdate, NewClass, TrainerClass},
    error::{AppError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<Vec<TrainerClass>>> {
    let classes = state.service_context.class_repo.list().await?;

    Ok(Json(classes))
}

#[derive(Debug, Deserialize)]
pub struct UpcomingParams {
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn upcoming(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(params): Query<UpcomingParams>,
) -> Result<Json<Vec<TrainerClass>>> {
    let classes = state
        .service_context
        .class_repo
        .list_upcoming(Utc::now(), params.limit)
        .await?;

    Ok(Json(classes))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrainerClass>> {
    let class = state
        .service_context
        .class_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    Ok(Json(class))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(new_class): Json<NewClass>,
) -> Result<(StatusCode, Json<TrainerClass>)> {
    let class = state.service_context.class_service.create(new_class).await?;

    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<ClassUpdate>,
) -> Result<Json<TrainerClass>> {
    let class = state.service_context.class_service.update(id, update).await?;

    Ok(Json(class))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.class_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn enroll(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrainerClass>> {
    let class = state.service_context.class_service.enroll(id).await?;

    Ok(Json(class))
}

pub async fn cancel_enrollment(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrainerClass>> {
    let class = state
        .service_context
        .class_service
        .cancel_enrollment(id)
        .await?;

    Ok(Json(class))
}
