//! HTTP handlers for the form page, liveness probe, and embedded assets.

use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode, Uri},
    response::{Html, IntoResponse},
};
use tracing::{debug, instrument};

use crate::errors::{Error, Result};
use crate::{AppState, static_assets};

/// Serve the upload form page for the configured theme
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    summary = "Upload form",
    description = "Serve the HTML upload form. The page variant (classic or glass) is selected by the `theme` configuration.",
    responses(
        (status = 200, description = "Upload form page", body = String, content_type = "text/html"),
    )
)]
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let asset_name = state.config.theme.page_asset();

    let page = static_assets::Assets::get(asset_name).ok_or_else(|| Error::Internal {
        operation: format!("load embedded page {asset_name}"),
    })?;

    Ok(Html(String::from_utf8_lossy(&page.data).to_string()))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "pages",
    summary = "Health check",
    description = "Fixed liveness response, independent of bucket configuration or storage reachability.",
    responses(
        (status = 200, description = "Process is alive", body = String),
    )
)]
pub async fn health() -> &'static str {
    "OK"
}

/// Serve embedded static assets (favicons and theme resources)
#[instrument]
pub async fn serve_asset(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = static_assets::Assets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        // Pages are fetched fresh; everything else can sit in the browser
        // cache for an hour
        let cache_control = if path.ends_with(".html") {
            "no-cache"
        } else {
            "public, max-age=3600"
        };

        return Response::builder()
            .header(axum::http::header::CONTENT_TYPE, mime.as_ref())
            .header(axum::http::header::CACHE_CONTROL, cache_control)
            .body(Body::from(content.data.into_owned()))
            .unwrap();
    }

    debug!("No embedded asset for: {}", uri.path());
    Response::builder().status(StatusCode::NOT_FOUND).body(Body::empty()).unwrap()
}
