use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Attendance, CheckIn},
    error::Result,
};

pub async fn check_in(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(check_in): Json<CheckIn>,
) -> Result<(StatusCode, Json<Attendance>)> {
    let record = state
        .service_context
        .attendance_service
        .check_in(check_in)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn check_out(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Attendance>> {
    let record = state
        .service_context
        .attendance_service
        .check_out(id)
        .await?;

    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct DailyParams {
    /// Calendar day to list; defaults to today.
    date: Option<NaiveDate>,
}

pub async fn daily(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(params): Query<DailyParams>,
) -> Result<Json<Vec<Attendance>>> {
    let day = match params.date {
        Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        None => Utc::now(),
    };

    let records = state
        .service_context
        .attendance_repo
        .list_for_day(day)
        .await?;

    Ok(Json(records))
}
