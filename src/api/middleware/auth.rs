use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    api::state::AppState,
    auth::SESSION_COOKIE,
    domain::{User, UserRole},
    error::AppError,
};

/// The signed-in staff user, inserted into request extensions by the auth
/// middleware. Role checks downstream are a plain allow-list on this value;
/// store-side access rules are out of scope here.
#[derive(Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.user.role == UserRole::Admin
    }
}

async fn resolve_user(state: &AppState, jar: &CookieJar) -> Result<User, AppError> {
    let session_cookie = jar.get(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;

    state
        .service_context
        .auth_service
        .validate_session(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, &jar).await?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, &jar).await?;

    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}
