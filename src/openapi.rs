//! OpenAPI documentation for the gateway's HTTP surface.
//!
//! Served through Scalar at `/docs` when the server is running.

use utoipa::OpenApi;

use crate::api::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "upgate",
        description = "Upload gateway: accepts a browser form upload and forwards it to an object-storage bucket."
    ),
    paths(handlers::pages::home, handlers::pages::health, handlers::uploads::upload_file),
    tags(
        (name = "pages", description = "Form page and liveness probe"),
        (name = "uploads", description = "File intake and storage forwarding")
    )
)]
pub struct ApiDoc;
