use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    error::Result,
    service::dashboard_service::ExpiringMembership,
    service::DashboardSummary,
};

pub async fn summary(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<DashboardSummary>> {
    let summary = state
        .service_context
        .dashboard_service
        .summary(Utc::now())
        .await?;

    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct ExpiringParams {
    days: Option<i64>,
}

pub async fn expiring(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(params): Query<ExpiringParams>,
) -> Result<Json<Vec<ExpiringMembership>>> {
    let members = state
        .service_context
        .dashboard_service
        .expiring_memberships(Utc::now(), params.days)
        .await?;

    Ok(Json(members))
}
