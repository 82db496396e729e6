use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{
        membership_status, Attendance, Member, MemberContactUpdate, MembershipStatus, NewMember,
        Payment,
    },
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct MemberDto {
    #[serde(flatten)]
    pub member: Member,
    pub status: MembershipStatus,
}

impl MemberDto {
    fn from_member(member: Member, now: DateTime<Utc>, window_days: i64) -> Self {
        let status = membership_status(member.expiry_date, now, window_days);
        Self { member, status }
    }
}

fn to_dto(state: &AppState, member: Member) -> MemberDto {
    MemberDto::from_member(member, Utc::now(), state.settings.gym.expiring_window_days)
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<Vec<MemberDto>>> {
    let members = state.service_context.member_repo.list().await?;

    Ok(Json(
        members.into_iter().map(|m| to_dto(&state, m)).collect(),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .member_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(Json(to_dto(&state, member)))
}

pub async fn get_by_code(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(code): Path<String>,
) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .attendance_service
        .find_member_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(Json(to_dto(&state, member)))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(new_member): Json<NewMember>,
) -> Result<(StatusCode, Json<MemberDto>)> {
    let member = state.service_context.member_service.enroll(new_member).await?;

    Ok((StatusCode::CREATED, Json(to_dto(&state, member))))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<MemberContactUpdate>,
) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .member_service
        .update_contact(id, update)
        .await?;

    Ok(Json(to_dto(&state, member)))
}

#[derive(Debug, Deserialize)]
pub struct RenewRequest {
    pub package_id: Uuid,
    pub start_date: DateTime<Utc>,
}

pub async fn renew(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenewRequest>,
) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .member_service
        .renew(id, req.package_id, req.start_date)
        .await?;

    Ok(Json(to_dto(&state, member)))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.member_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn attendance_history(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Attendance>>> {
    let records = state
        .service_context
        .attendance_repo
        .list_by_member(id)
        .await?;

    Ok(Json(records))
}

pub async fn payment_history(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>> {
    let payments = state
        .service_context
        .payment_repo
        .list_by_member(id)
        .await?;

    Ok(Json(payments))
}
