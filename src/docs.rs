use utoipa::OpenApi;

use crate::common::error::ErrorResponse;
use crate::modules::video::dto::{HealthResponse, VideoUrlResponse};
use crate::modules::video::model::{Video, VideoStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::video::handler::upload_video,
        crate::modules::video::handler::list_videos,
        crate::modules::video::handler::get_video,
        crate::modules::video::handler::get_video_url,
        crate::modules::video::handler::delete_video,
        crate::modules::video::handler::health,
    ),
    components(
        schemas(Video, VideoStatus, VideoUrlResponse, HealthResponse, ErrorResponse)
    ),
    tags(
        (name = "Upload", description = "Video upload and ingestion")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
