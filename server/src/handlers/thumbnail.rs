use crate::assets::{asset_url, random_file_name};
use crate::auth::{bearer_token, validate_jwt};
use crate::config::AppState;
use crate::db::Video;
use crate::error::ApiError;
use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

pub const MAX_UPLOAD_SIZE: usize = 10 << 20; // 10 MiB
pub const ALLOWED_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
const FORM_FIELD: &str = "thumbnail";

struct UploadedThumbnail {
    data: Vec<u8>,
    media_type: Option<String>,
}

pub async fn handle_upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, ApiError> {
    if video_id.is_empty() {
        return Err(ApiError::InvalidRequest("Invalid video ID".to_string()));
    }
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| ApiError::InvalidRequest("Invalid video ID".to_string()))?;

    let token = bearer_token(auth_header)?;
    let user_id = validate_jwt(&token, &state.config.jwt_secret)?;

    let mut video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Couldn't find video".to_string()))?;
    if video.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Not authorized to update this video".to_string(),
        ));
    }

    let mut multipart = multipart.map_err(|e| {
        ApiError::InvalidRequest(format!("Expected multipart form data: {}", e.body_text()))
    })?;
    let thumbnail = read_thumbnail(&mut multipart).await?;

    let media_type = match thumbnail.media_type.as_deref() {
        None | Some("") => {
            return Err(ApiError::InvalidRequest(
                "Missing Content-Type for thumbnail".to_string(),
            ));
        }
        Some(media_type) if !ALLOWED_MEDIA_TYPES.contains(&media_type) => {
            return Err(ApiError::InvalidRequest(
                "bad file type, the type should be jpeg or png".to_string(),
            ));
        }
        Some(media_type) => media_type,
    };
    let extension = file_extension(media_type)?;

    let file_name = random_file_name(extension);
    state.assets.write(&file_name, &thumbnail.data).await?;
    debug!(%video_id, file_name = %file_name, size = thumbnail.data.len(), "thumbnail written");

    video.thumbnail_url = Some(asset_url(state.config.server_port, &file_name));
    video.updated_at = Utc::now();
    state.videos.update(&video).await?;

    info!(%video_id, %user_id, file_name = %file_name, "thumbnail updated");
    Ok(Json(video))
}

/// Find the `thumbnail` file part and read it, refusing anything over the size limit.
async fn read_thumbnail(multipart: &mut Multipart) -> Result<UploadedThumbnail, ApiError> {
    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err(ApiError::InvalidRequest(
                    "Thumbnail file missing".to_string(),
                ));
            }
            Err(e) => {
                return Err(ApiError::InvalidRequest(format!(
                    "Failed to read multipart: {}",
                    e.body_text()
                )));
            }
        };
        if field.name() != Some(FORM_FIELD) {
            continue;
        }
        // A part without a filename is a plain form value, not a file.
        if field.file_name().is_none() {
            return Err(ApiError::InvalidRequest(
                "Thumbnail file missing".to_string(),
            ));
        }
        let media_type = field.content_type().map(|s| s.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(read_error)? {
            if data.len() + chunk.len() > MAX_UPLOAD_SIZE {
                return Err(ApiError::InvalidRequest(
                    "Thumbnail file exceeds the maximum allowed size of 10MB".to_string(),
                ));
            }
            data.extend_from_slice(&chunk);
        }
        return Ok(UploadedThumbnail { data, media_type });
    }
}

fn read_error(err: MultipartError) -> ApiError {
    if err.status().is_client_error() {
        ApiError::InvalidRequest(format!("Failed to read thumbnail: {}", err.body_text()))
    } else {
        ApiError::Internal(format!("Error reading file data: {}", err))
    }
}

/// Extension is whatever follows the `/` of the declared media type.
fn file_extension(media_type: &str) -> Result<&str, ApiError> {
    match media_type.split_once('/') {
        Some((_, ext)) if !ext.is_empty() => Ok(ext),
        _ => Err(ApiError::InvalidRequest(
            "Invalid Content-Type for thumbnail".to_string(),
        )),
    }
}
