//! HTTP handler for the upload flow.
//!
//! A request passes through three states: received (multipart parsed),
//! validated (file part present and a bucket configured), then stored or
//! failed depending on the storage call. Every branch is terminal - there
//! is no retry and no queueing.

use axum::{
    extract::{Multipart, State},
    response::Html,
};
use chrono::Utc;

use crate::AppState;
use crate::api::models::uploads::UploadedFile;
use crate::errors::{Error, Result};

/// Rejection message for both missing preconditions, matching the upload
/// contract: the caller cannot distinguish a missing file from a missing
/// bucket.
const MISSING_FILE_OR_BUCKET: &str = "Missing file or bucket name";

#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    summary = "Upload file",
    description = "Accept a multipart form with a single `file` field and forward it to the configured object-storage bucket under a `<millisecond timestamp>_<original name>` key.",
    request_body(
        content_type = "multipart/form-data",
        description = "Form upload with a single `file` field"
    ),
    responses(
        (status = 200, description = "File stored", body = String, content_type = "text/html"),
        (status = 400, description = "Missing file part or no bucket configured", body = String),
        (status = 500, description = "The storage backend rejected the upload", body = String)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> Result<Html<String>> {
    let file = read_file_part(&mut multipart).await?;

    let (Some(file), Some(bucket)) = (file, state.config.storage.bucket.as_deref()) else {
        return Err(Error::BadRequest {
            message: MISSING_FILE_OR_BUCKET.to_string(),
        });
    };

    let key = file.object_key(Utc::now().timestamp_millis());

    let UploadedFile {
        bytes,
        filename,
        content_type,
    } = file;
    let size_bytes = bytes.len();

    state.store.put_object(bucket, &key, bytes, &content_type).await?;

    tracing::info!(bucket, %key, size_bytes, %content_type, "Upload stored");

    Ok(Html(success_page(&filename)))
}

/// Walk the multipart body and pull out the first `file` field.
///
/// Extra form fields, and any file fields after the first, are ignored
/// rather than rejected.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("Failed to parse multipart data: {e}"),
    })? {
        if field.name() != Some("file") || file.is_some() {
            continue;
        }

        // The declared name and type pass through verbatim; a nameless part
        // yields an empty file name, exactly as it arrives
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();

        let bytes = field.bytes().await.map_err(|e| Error::BadRequest {
            message: format!("Failed to read file field: {e}"),
        })?;

        file = Some(UploadedFile {
            bytes,
            filename,
            content_type,
        });
    }

    Ok(file)
}

/// Server-rendered success page echoing the uploaded file's name.
fn success_page(filename: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Upload Successful</title>
</head>
<body style="background:#020617;color:white;font-family:Arial,sans-serif;text-align:center;padding-top:80px;">
  <h1 style="color:#38bdf8;">Upload Successful</h1>
  <p>{} uploaded to storage</p>
  <a href="/" style="color:#38bdf8;text-decoration:none;border:2px solid #38bdf8;padding:12px 30px;border-radius:8px;">Go Back</a>
</body>
</html>
"#,
        escape_html(filename)
    )
}

/// Minimal HTML escaping for the echoed file name, which is caller-controlled.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
