//! Thumbnail API handlers and per-request orchestration.
//!
//! One request walks Validating → Fetching → Extracting → Responding; the
//! downloaded temp file is released when the handler scope ends, on every
//! branch.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{error, info};

use framegrab_core::{ThumbnailError, ThumbnailRequest, ThumbnailSuccess};
use framegrab_media::{display_name, extract_frame, fetch_video, to_data_uri};

use crate::server::GatewayState;

/// Handler for `POST /api/thumbnail`.
///
/// A missing, empty, or non-JSON body short-circuits to 400 before any
/// network or process call is made.
pub async fn create_thumbnail(
    State(state): State<GatewayState>,
    payload: Option<Json<ThumbnailRequest>>,
) -> (StatusCode, Json<Value>) {
    let request = payload.map(|Json(r)| r);
    let Some(video_url) = request.as_ref().and_then(ThumbnailRequest::url) else {
        return failure_response(&ThumbnailError::MissingUrl);
    };

    info!(url = %video_url, "thumbnail requested");
    match generate(&state, video_url).await {
        Ok(result) => (StatusCode::OK, Json(json!(result))),
        Err(err) => {
            error!(url = %video_url, error = %err, details = ?err.details(), "thumbnail generation failed");
            failure_response(&err)
        }
    }
}

/// Fetch the remote video and extract one frame as a data URI.
async fn generate(
    state: &GatewayState,
    video_url: &str,
) -> Result<ThumbnailSuccess, ThumbnailError> {
    let filename = display_name(video_url);

    // `video` owns the scoped temp file; dropping it at the end of this
    // function (or on `?`) deletes the file.
    let video = fetch_video(&state.http, video_url).await?;
    let image = extract_frame(video.path()).await?;

    Ok(ThumbnailSuccess::new(filename, to_data_uri(&image)))
}

/// Map a failure to its HTTP status and structured JSON body.
fn failure_response(err: &ThumbnailError) -> (StatusCode, Json<Value>) {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let mut body = json!({
        "success": false,
        "error": err.to_string(),
    });
    if let Some(details) = err.details() {
        body["details"] = json!(details);
    }

    (status, Json(body))
}

/// Handler for `GET /api/thumbnail`: describes correct usage.
pub async fn usage() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "success": false,
            "error": "Method Not Allowed",
            "message": "Only POST method is allowed with videoUrl in JSON body.",
            "usage": {
                "method": "POST",
                "url": "/api/thumbnail",
                "body": { "videoUrl": "https://example.com/video.mp4" },
            },
        })),
    )
}

/// Health check endpoint, consumed by the `framegrab status` command.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "framegrab",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
