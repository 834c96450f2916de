//! `framegrab-core` — shared types for the framegrab thumbnail service.
//!
//! Holds the error taxonomy and the JSON wire types exchanged over the
//! HTTP API. Everything here is request-scoped data; nothing carries state
//! across requests.

pub mod error;
pub mod types;

pub use error::ThumbnailError;
pub use types::{ThumbnailRequest, ThumbnailSuccess};
