use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config};
use crate::handlers::{create_user, get_user, health_check, hello, list_users, welcome};
use crate::state::AppState;
use crate::store::UserStore;
use crate::utils::normalizer::{normalize_errors, panic_response, route_not_found};

pub fn create_routes(store: Arc<dyn UserStore>, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(welcome))
        .route("/api/", get(welcome))
        .route("/api/hello", get(hello))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", get(get_user))
        .fallback(route_not_found)
        .with_state(AppState::new(store))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            config.environment,
            normalize_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.allowed_origins))
}
