use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    auth::{AuthService, SESSION_COOKIE},
    domain::UserRole,
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Trainer
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state
        .service_context
        .auth_service
        .register(&req.email, &req.password, req.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            email: user.email,
            role: user.role,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let (user, token) = state
        .service_context
        .auth_service
        .login(&req.email, &req.password)
        .await?;

    let cookie = AuthService::session_cookie(&token);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: UserResponse {
                id: user.id,
                email: user.email,
                role: user.role,
            },
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        let _ = state
            .service_context
            .auth_service
            .logout(session_cookie.value())
            .await;
    }

    let jar = jar.add(AuthService::logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}
