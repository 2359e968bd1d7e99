pub mod health;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            // Trace must stay outermost: Cors needs the route's `Default` response body beneath it.
            ServiceBuilder::new()
                // Every log line of a request, including error responses, carries its request_id.
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %Uuid::new_v4(),
                    )
                }))
                .layer(CorsLayer::permissive()), // TODO: restrict origins once the frontend has a fixed deployment URL
        )
        .with_state(state)
}
