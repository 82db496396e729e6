use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{NewTrainer, Trainer, TrainerClass, TrainerUpdate},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    active: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Trainer>>> {
    let trainers = if params.active {
        state.service_context.trainer_repo.list_active().await?
    } else {
        state.service_context.trainer_repo.list().await?
    };

    Ok(Json(trainers))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trainer>> {
    let trainer = state
        .service_context
        .trainer_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trainer not found".to_string()))?;

    Ok(Json(trainer))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(new_trainer): Json<NewTrainer>,
) -> Result<(StatusCode, Json<Trainer>)> {
    new_trainer.validate()?;

    let trainer = state.service_context.trainer_repo.create(new_trainer).await?;

    Ok((StatusCode::CREATED, Json(trainer)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<TrainerUpdate>,
) -> Result<Json<Trainer>> {
    if let Some(rate) = update.hourly_rate_cents {
        if rate < 1 {
            return Err(AppError::Validation(
                "hourly rate must be positive".to_string(),
            ));
        }
    }

    let trainer = state.service_context.trainer_repo.update(id, update).await?;

    Ok(Json(trainer))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.trainer_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn classes(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TrainerClass>>> {
    let classes = state.service_context.class_repo.list_by_trainer(id).await?;

    Ok(Json(classes))
}
