//! Display-name derivation for thumbnail responses.

use url::Url;

/// Fallback used when no usable name can be derived from the URL.
const FALLBACK: &str = "thumbnail";

/// Derive a short display name from a video URL.
///
/// Takes the last non-empty path segment and strips its extension.
/// Unparseable URLs and empty paths fall back to `"thumbnail"`.
/// Never fails and has no side effects.
pub fn display_name(video_url: &str) -> String {
    let Ok(parsed) = Url::parse(video_url) else {
        return FALLBACK.to_string();
    };

    let stem = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|name| match name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => name,
        })
        .unwrap_or_default();

    if stem.is_empty() {
        FALLBACK.to_string()
    } else {
        stem.to_string()
    }
}
