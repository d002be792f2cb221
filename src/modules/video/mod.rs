use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Router, middleware};

use crate::state::AppState;

pub mod dto;
pub mod events;
pub mod handler;
pub mod model;
pub mod ports;
pub mod repository;
pub mod service;

// Slack on top of the configured max file size for multipart framing.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/health", get(handler::health));

    let protected_routes = Router::new()
        .route("/video", axum::routing::post(handler::upload_video))
        .route("/videos", get(handler::list_videos))
        .route(
            "/videos/{id}",
            get(handler::get_video).delete(handler::delete_video),
        )
        .route("/videos/{id}/url", get(handler::get_video_url))
        .layer(DefaultBodyLimit::max(
            state.config.max_file_size as usize + MULTIPART_OVERHEAD,
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
