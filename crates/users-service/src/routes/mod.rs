use crate::handlers::{users_handler, AppState};
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Admin endpoint; OPTIONS is the unauthenticated pre-flight probe
        .route(
            "/api/v1/admin/users",
            get(users_handler::list_users).options(users_handler::preflight),
        )

        // Health check
        .route("/health", get(health_check))

        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
