use crate::common::error::{AppError, ErrorResponse};
use crate::middleware::auth::TokenClaims;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::dto::{HealthResponse, UploadedFile, VideoUrlResponse};
use super::model::Video;

/// Upload a video
///
/// Accepts one multipart file field named `file`, stores it and enqueues a
/// processing job.
#[utoipa::path(
    post,
    path = "/upload/video",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video ingested", body = Video),
        (status = 400, description = "Invalid file", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let file = extract_file(&mut multipart).await?;
    let video = state.uploads.upload_video(claims.sub, file).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// List the authenticated user's videos, most recent first
#[utoipa::path(
    get,
    path = "/upload/videos",
    responses(
        (status = 200, description = "The user's videos", body = Vec<Video>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn list_videos(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<Video>>, AppError> {
    let videos = state.uploads.list_user_videos(claims.sub).await?;
    Ok(Json(videos))
}

/// Fetch one video by id
#[utoipa::path(
    get,
    path = "/upload/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "The video", body = Video),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn get_video(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Video>, AppError> {
    let video = state.uploads.get_video_by_id(id, claims.sub).await?;
    Ok(Json(video))
}

/// Fetch a time-limited download URL for a video
#[utoipa::path(
    get,
    path = "/upload/videos/{id}/url",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Presigned download URL", body = VideoUrlResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn get_video_url(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<VideoUrlResponse>, AppError> {
    let url = state.uploads.get_video_url(id, claims.sub).await?;
    Ok(Json(VideoUrlResponse { url }))
}

/// Delete a video and its stored binary
#[utoipa::path(
    delete,
    path = "/upload/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn delete_video(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.uploads.delete_video(id, claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check
#[utoipa::path(
    get,
    path = "/upload/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Upload"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Pulls the `file` field out of the multipart body. The part's declared
/// content type wins; otherwise it is guessed from the filename.
async fn extract_file(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "upload".to_string());

        let content_type = match field.content_type() {
            Some(mime) => mime.to_owned(),
            None => mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_owned(),
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation("no file provided".to_string()))
}
