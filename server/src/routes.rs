use crate::config::AppState;
use crate::handlers;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.max_request_body_bytes;
    Router::new()
        .route(
            "/api/thumbnail_upload/{video_id}",
            post(handlers::thumbnail::handle_upload_thumbnail),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
