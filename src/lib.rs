//! # upgate: Upload Gateway
//!
//! `upgate` is a small web service that accepts a single file upload from a
//! browser form and forwards it to an object-storage bucket, reporting
//! success or failure back to the caller.
//!
//! ## Overview
//!
//! The gateway serves a human-facing form page at `/`, a liveness probe at
//! `/health`, and the upload endpoint at `/upload`. An upload buffers the
//! multipart body in memory, builds a `<millisecond timestamp>_<original
//! name>` object key, and issues exactly one `put_object` call against the
//! configured bucket. Any storage failure ends the request with a 500
//! carrying the backend's message; a missing file part or missing bucket
//! configuration ends it with a 400 before any storage interaction.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer. Handlers hold no shared mutable state: [`AppState`]
//! carries the loaded configuration and a handle to the storage backend,
//! both read-only after startup. The backend sits behind the
//! [`storage::ObjectStore`] trait, so tests run the full HTTP stack against
//! an in-memory recording fake while production uses the AWS S3 client.
//!
//! The form page comes in two variants (a plain form and a glassmorphism
//! page with a client-side progress bar), selected by the `theme`
//! configuration and embedded into the binary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use upgate::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = upgate::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     upgate::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod errors;
mod openapi;
mod static_assets;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

use crate::storage::{ObjectStore, S3ObjectStore};

/// Application state shared across all request handlers.
///
/// Both fields are read-only after startup; requests are independent and
/// need no coordination beyond this handle.
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub config: Config,
}

/// Build the application router with all endpoints and middleware.
///
/// This constructs the complete Axum router with:
/// - The upload form page, liveness probe, and upload endpoint
/// - A body-size cap on `/upload` from `max_upload_bytes`
/// - OpenAPI docs at `/docs`
/// - Embedded static assets as the fallback
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes as usize;

    let routes = Router::new()
        .route("/", get(api::handlers::pages::home))
        .route("/health", get(api::handlers::pages::health))
        .route(
            "/upload",
            post(api::handlers::uploads::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .fallback(get(api::handlers::pages::serve_asset))
        .with_state(state);

    routes.merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi())).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Main application struct that owns the router and configuration.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] builds the storage client and router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with the S3-backed store
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting upload gateway with configuration: {:#?}", config);

        let store = S3ObjectStore::new(config.storage.region.clone(), config.storage.endpoint_url.clone()).await;

        let state = AppState::builder().store(Arc::new(store) as Arc<dyn ObjectStore>).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self { router, config })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Upload gateway listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::storage::MockObjectStore;
    use crate::test_utils::{test_config, test_server};
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};

    /// End-to-end pass over the whole surface: probe, form page, docs,
    /// upload round-trip, asset fallback.
    #[test_log::test(tokio::test)]
    async fn test_full_surface_round_trip() {
        let store = MockObjectStore::new();
        let server = test_server(test_config(Some("demo-bucket")), store.clone());

        let health = server.get("/health").await;
        health.assert_status(StatusCode::OK);
        assert_eq!(health.text(), "OK");

        let page = server.get("/").await;
        page.assert_status(StatusCode::OK);
        assert!(page.text().contains(r#"action="/upload""#));

        let docs = server.get("/docs").await;
        docs.assert_status(StatusCode::OK);

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"hello world".as_slice()).file_name("greeting.txt").mime_type("text/plain"),
        );
        let upload = server.post("/upload").multipart(form).await;
        upload.assert_status(StatusCode::OK);

        let puts = store.recorded_puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].bucket, "demo-bucket");
        assert_eq!(puts[0].body.as_ref(), b"hello world");
        assert!(puts[0].key.ends_with("_greeting.txt"));

        let missing = server.get("/definitely-not-a-route").await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    /// The probe stays healthy even when the storage backend is failing.
    #[test_log::test(tokio::test)]
    async fn test_health_independent_of_storage() {
        let server = test_server(test_config(Some("demo-bucket")), MockObjectStore::failing("ServiceUnavailable"));

        let health = server.get("/health").await;
        health.assert_status(StatusCode::OK);
        assert_eq!(health.text(), "OK");
    }
}
