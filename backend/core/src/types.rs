//! JSON wire types for the thumbnail API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/thumbnail`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailRequest {
    /// Remote video to extract a frame from.
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

impl ThumbnailRequest {
    /// The URL, if present and non-empty after trimming.
    pub fn url(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Successful thumbnail reply.
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailSuccess {
    pub success: bool,
    /// Short display name derived from the video URL.
    pub filename: String,
    /// `data:image/jpeg;base64,` URI carrying the extracted frame.
    pub base64: String,
    pub message: String,
}

impl ThumbnailSuccess {
    pub fn new(filename: impl Into<String>, base64: impl Into<String>) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            base64: base64.into(),
            message: "Thumbnail generated successfully".into(),
        }
    }
}
