use thiserror::Error;

/// Top-level error type for the framegrab service.
///
/// Exactly one variant is produced per failed request. The gateway maps each
/// to an HTTP status plus a structured JSON body with a human-readable
/// summary (the `Display` text) and, where available, a `details` string.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Request validation failed; no network or process call was made.
    #[error("Video URL is required")]
    MissingUrl,

    /// The remote video could not be retrieved.
    #[error("Failed to download video")]
    Download { details: String },

    /// The transcoder reported a failure or produced no image data.
    #[error("Failed to generate thumbnail")]
    Process { details: String },

    /// Frame extraction exceeded its wall-clock bound.
    #[error("Thumbnail generation timeout")]
    Timeout,
}

impl ThumbnailError {
    /// Details string surfaced to the caller alongside the summary.
    pub fn details(&self) -> Option<&str> {
        match self {
            ThumbnailError::MissingUrl => None,
            ThumbnailError::Download { details } => Some(details),
            ThumbnailError::Process { details } => Some(details),
            ThumbnailError::Timeout => Some("The process took too long to complete"),
        }
    }

    /// True for failures that are the client's fault (HTTP 400).
    pub fn is_validation(&self) -> bool {
        matches!(self, ThumbnailError::MissingUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_are_stable_wire_strings() {
        assert_eq!(
            ThumbnailError::MissingUrl.to_string(),
            "Video URL is required"
        );
        assert_eq!(
            ThumbnailError::Timeout.to_string(),
            "Thumbnail generation timeout"
        );
        let err = ThumbnailError::Process {
            details: "no video stream".into(),
        };
        assert_eq!(err.to_string(), "Failed to generate thumbnail");
    }

    #[test]
    fn details_carry_the_underlying_cause() {
        let err = ThumbnailError::Download {
            details: "server responded with status 404".into(),
        };
        assert_eq!(err.details(), Some("server responded with status 404"));
        assert_eq!(ThumbnailError::MissingUrl.details(), None);
        assert_eq!(
            ThumbnailError::Timeout.details(),
            Some("The process took too long to complete")
        );
    }

    #[test]
    fn only_missing_url_is_a_validation_failure() {
        assert!(ThumbnailError::MissingUrl.is_validation());
        assert!(!ThumbnailError::Timeout.is_validation());
        assert!(!ThumbnailError::Download {
            details: String::new()
        }
        .is_validation());
    }
}
