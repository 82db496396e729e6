use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{NewPackage, Package, PackageUpdate},
    error::{AppError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<Vec<Package>>> {
    let packages = state.service_context.package_repo.list().await?;

    Ok(Json(packages))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Package>> {
    let package = state
        .service_context
        .package_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    Ok(Json(package))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(new_package): Json<NewPackage>,
) -> Result<(StatusCode, Json<Package>)> {
    new_package.validate()?;

    let package = state.service_context.package_repo.create(new_package).await?;

    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<PackageUpdate>,
) -> Result<Json<Package>> {
    if let Some(price) = update.price_cents {
        if price < 0 {
            return Err(AppError::Validation("price must not be negative".to_string()));
        }
    }
    if let Some(duration) = update.duration_days {
        if duration < 1 {
            return Err(AppError::Validation(
                "duration must be at least one day".to_string(),
            ));
        }
    }

    let package = state.service_context.package_repo.update(id, update).await?;

    Ok(Json(package))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.package_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
