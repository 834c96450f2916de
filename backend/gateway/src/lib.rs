//! `framegrab-gateway` — HTTP API server for the thumbnail service.
//!
//! Provides the REST API, permissive CORS, and the static landing page.

pub mod landing;
pub mod server;
pub mod thumbnail_api;

pub use server::{build_router, start_server, GatewayState};
