use axum::{
    Router,
    extract::{Multipart, State},
    response::Json as ResponseJson,
    routing::post,
};
use serde::Serialize;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

const DEFAULT_BUCKET: &str = "uploads";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}

/// Multipart upload proxy. Accepts a `file` part plus optional `bucket` and
/// `entity_id` text parts, stores the object and returns its public URL.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<UploadResponse>>, ApiError> {
    let mut bucket = DEFAULT_BUCKET.to_string();
    let mut entity_id = "shared".to_string();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("bucket") => bucket = field.text().await?,
            Some("entity_id") => entity_id = field.text().await?,
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::BadRequest("file part needs a filename".into()))?;
                let bytes = field.bytes().await?.to_vec();
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("missing file part".into()))?;
    let uploaded = state
        .storage
        .upload(&bucket, &entity_id, &file_name, bytes)
        .await?;

    Ok(ResponseJson(ApiResponse::success(UploadResponse {
        url: uploaded.public_url,
        path: uploaded.path,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload_file))
}
