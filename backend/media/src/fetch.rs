//! Remote video retrieval into scoped temporary files.
//!
//! The extractor needs stable bytes on disk, so the fetcher materializes the
//! remote resource before any transcoding starts. Redirects follow the HTTP
//! client's default policy (up to 10 hops).

use std::path::Path;

use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use framegrab_core::ThumbnailError;

/// A downloaded video held in a uniquely-named temporary file.
///
/// The file is deleted exactly once, when the guard is dropped, on every
/// exit path of the owning request: success, process error, timeout, and
/// fetch error alike.
#[derive(Debug)]
pub struct FetchedVideo {
    path: TempPath,
}

impl FetchedVideo {
    /// Location of the downloaded bytes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Download `video_url` into a scoped temp file.
///
/// Unsupported schemes, transport errors, and non-2xx statuses all surface
/// as [`ThumbnailError::Download`]; any partially-written temp file is
/// removed before the error propagates.
pub async fn fetch_video(
    client: &reqwest::Client,
    video_url: &str,
) -> Result<FetchedVideo, ThumbnailError> {
    let parsed = Url::parse(video_url).map_err(|e| ThumbnailError::Download {
        details: format!("invalid URL: {e}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ThumbnailError::Download {
            details: format!("unsupported URL scheme: {}", parsed.scheme()),
        });
    }

    debug!(url = %video_url, "downloading video");
    let mut response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| ThumbnailError::Download {
            details: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ThumbnailError::Download {
            details: format!("server responded with status {status}"),
        });
    }

    let (file, path) = tempfile::Builder::new()
        .prefix("framegrab-")
        .tempfile()
        .map_err(|e| ThumbnailError::Download {
            details: format!("failed to create temp file: {e}"),
        })?
        .into_parts();
    let mut file = File::from_std(file);

    // From here on `path` guards the temp file: an early return drops it
    // and deletes the partial download.
    let mut total: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ThumbnailError::Download {
            details: e.to_string(),
        })?
    {
        total += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .map_err(|e| ThumbnailError::Download {
                details: format!("failed to write video data: {e}"),
            })?;
    }
    file.flush().await.map_err(|e| ThumbnailError::Download {
        details: format!("failed to write video data: {e}"),
    })?;

    info!(url = %video_url, bytes = total, path = %path.display(), "video downloaded");
    Ok(FetchedVideo { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// One-shot HTTP server answering the next connection with `response`.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}/sample.mp4")
    }

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let client = reqwest::Client::new();
        let err = fetch_video(&client, "file:///etc/passwd")
            .await
            .unwrap_err();
        match err {
            ThumbnailError::Download { details } => {
                assert!(details.contains("unsupported URL scheme"))
            }
            other => panic!("expected download error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_unparseable_urls() {
        let client = reqwest::Client::new();
        let err = fetch_video(&client, "not a url").await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Download { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_download_error() {
        let client = reqwest::Client::new();
        // Nothing listens on the discard port in test environments.
        let err = fetch_video(&client, "http://127.0.0.1:9/video.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::Download { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_a_download_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = reqwest::Client::new();
        let err = fetch_video(&client, &url).await.unwrap_err();
        match err {
            ThumbnailError::Download { details } => assert!(details.contains("404")),
            other => panic!("expected download error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn downloads_body_into_scoped_temp_file() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 5\r\nconnection: close\r\n\r\nvideo",
        )
        .await;
        let client = reqwest::Client::new();
        let fetched = fetch_video(&client, &url).await.unwrap();

        let contents = tokio::fs::read(fetched.path()).await.unwrap();
        assert_eq!(contents, b"video");

        let location = fetched.path().to_path_buf();
        assert!(location.exists());
        drop(fetched);
        assert!(!location.exists());
    }

    #[tokio::test]
    async fn guard_deletes_file_on_drop() {
        let (file, path) = tempfile::NamedTempFile::new().unwrap().into_parts();
        drop(file);
        let fetched = FetchedVideo { path };
        let location = fetched.path().to_path_buf();
        assert!(location.exists());
        drop(fetched);
        assert!(!location.exists());
    }
}
