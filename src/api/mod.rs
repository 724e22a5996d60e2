//! API layer for HTTP request handling and data models.
//!
//! This module contains the gateway's HTTP surface, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request-scoped data structures for the upload flow
//!
//! # API Structure
//!
//! - **Pages** (`/`): the upload form, themed via configuration
//! - **Health** (`/health`): liveness probe for infrastructure
//! - **Uploads** (`/upload`): multipart file intake, forwarded to storage
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;
