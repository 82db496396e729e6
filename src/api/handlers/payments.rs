use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{NewPayment, Payment, PaymentStatus},
    error::{AppError, Result},
};

pub async fn record(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(new_payment): Json<NewPayment>,
) -> Result<(StatusCode, Json<Payment>)> {
    let payment = state
        .service_context
        .payment_service
        .record(new_payment)
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>> {
    let payment = state
        .service_context
        .payment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Payment>> {
    let payment = state
        .service_context
        .payment_service
        .update_status(id, update.status, update.notes)
        .await?;

    Ok(Json(payment))
}
