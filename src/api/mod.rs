pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        // API routes
        .nest("/api", api_routes(app_state.clone()))
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/members", member_routes(state.clone()))
        .nest("/packages", package_routes(state.clone()))
        .nest("/trainers", trainer_routes(state.clone()))
        .nest("/classes", class_routes(state.clone()))
        .nest("/attendance", attendance_routes(state.clone()))
        .nest("/payments", payment_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}

// Reads are open to any signed-in staff; everything that mutates the
// member book is admin-only.
fn member_routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(handlers::members::list))
        .route("/by-code/:code", get(handlers::members::get_by_code))
        .route("/:id", get(handlers::members::get))
        .route("/:id/attendance", get(handlers::members::attendance_history))
        .route("/:id/payments", get(handlers::members::payment_history))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let writes = Router::new()
        .route("/", post(handlers::members::create))
        .route("/:id", put(handlers::members::update))
        .route("/:id", delete(handlers::members::delete))
        .route("/:id/renew", post(handlers::members::renew))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin));

    reads.merge(writes)
}

fn package_routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(handlers::packages::list))
        .route("/:id", get(handlers::packages::get))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let writes = Router::new()
        .route("/", post(handlers::packages::create))
        .route("/:id", put(handlers::packages::update))
        .route("/:id", delete(handlers::packages::delete))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin));

    reads.merge(writes)
}

fn trainer_routes(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(handlers::trainers::list))
        .route("/:id", get(handlers::trainers::get))
        .route("/:id/classes", get(handlers::trainers::classes))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let writes = Router::new()
        .route("/", post(handlers::trainers::create))
        .route("/:id", put(handlers::trainers::update))
        .route("/:id", delete(handlers::trainers::delete))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin));

    reads.merge(writes)
}

// Trainers run their own schedules, so class management is open to any
// signed-in staff.
fn class_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::classes::list))
        .route("/", post(handlers::classes::create))
        .route("/upcoming", get(handlers::classes::upcoming))
        .route("/:id", get(handlers::classes::get))
        .route("/:id", put(handlers::classes::update))
        .route("/:id", delete(handlers::classes::delete))
        .route("/:id/enroll", post(handlers::classes::enroll))
        .route(
            "/:id/cancel-enrollment",
            post(handlers::classes::cancel_enrollment),
        )
        .route_layer(from_fn_with_state(state, middleware::auth::require_auth))
}

fn attendance_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::attendance::check_in))
        .route("/daily", get(handlers::attendance::daily))
        .route("/:id/check-out", post(handlers::attendance::check_out))
        .route_layer(from_fn_with_state(state, middleware::auth::require_auth))
}

fn payment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::payments::record))
        .route("/:id", get(handlers::payments::get))
        .route("/:id/status", put(handlers::payments::update_status))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin))
}

fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::dashboard::summary))
        .route("/expiring", get(handlers::dashboard::expiring))
        .route_layer(from_fn_with_state(state, middleware::auth::require_auth))
}
