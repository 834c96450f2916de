//! Single-frame extraction through an ffmpeg subprocess.
//!
//! The frame never touches disk: ffmpeg writes a single MJPEG image to its
//! stdout pipe and the chunks are accumulated in memory, in arrival order.
//! A wall-clock timeout bounds the whole operation; the timer is disarmed
//! automatically when the subprocess completes first, and a timed-out child
//! is killed, reaped, and its partial output discarded.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use base64::prelude::*;
use once_cell::sync::OnceCell;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use framegrab_core::ThumbnailError;

/// Wall-clock bound on one extraction.
pub const EXTRACT_TIMEOUT: Duration = Duration::from_secs(25);

/// Seek point for the extracted frame.
const SEEK_TIMESTAMP: &str = "00:00:01.000";

/// Maximum thumbnail width; height follows proportionally.
const MAX_WIDTH: u32 = 320;

/// Process-wide transcoder binary path, set once before the server starts
/// accepting requests. Never mutated afterwards.
static FFMPEG_PATH: OnceCell<PathBuf> = OnceCell::new();

/// Configure the ffmpeg binary used by all subsequent extractions.
///
/// Later calls are ignored; the first setting wins.
pub fn set_ffmpeg_path(path: impl Into<PathBuf>) {
    let _ = FFMPEG_PATH.set(path.into());
}

fn ffmpeg_path() -> &'static Path {
    FFMPEG_PATH
        .get()
        .map(PathBuf::as_path)
        .unwrap_or(Path::new("ffmpeg"))
}

/// ffmpeg argument list for a single-frame MJPEG extraction of `input`.
///
/// `-ss` is an input option, so the demuxer seeks before decoding starts.
fn extraction_args(input: &Path) -> Vec<String> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-ss".into(),
        SEEK_TIMESTAMP.into(),
        "-i".into(),
        input.to_string_lossy().into_owned(),
        "-frames:v".into(),
        "1".into(),
        "-vf".into(),
        format!("scale='min({MAX_WIDTH},iw)':-2"),
        "-f".into(),
        "image2pipe".into(),
        "-vcodec".into(),
        "mjpeg".into(),
        "pipe:1".into(),
    ]
}

/// Extract one frame from `input`, returning the raw JPEG bytes.
///
/// Exactly one of success, [`ThumbnailError::Process`], or
/// [`ThumbnailError::Timeout`] results per invocation; no retries.
pub async fn extract_frame(input: &Path) -> Result<Vec<u8>, ThumbnailError> {
    let args = extraction_args(input);
    debug!(transcoder = %ffmpeg_path().display(), args = ?args, "spawning frame extraction");

    let mut cmd = Command::new(ffmpeg_path());
    cmd.args(&args);
    let image = run_single_frame(cmd, EXTRACT_TIMEOUT).await?;

    info!(input = %input.display(), bytes = image.len(), "frame extracted");
    Ok(image)
}

/// Wrap raw JPEG bytes as a `data:image/jpeg;base64,` URI.
pub fn to_data_uri(image: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64_STANDARD.encode(image))
}

/// Drive `cmd` to completion under `limit`, collecting its stdout as the
/// image buffer and its stderr as diagnostic text.
async fn run_single_frame(mut cmd: Command, limit: Duration) -> Result<Vec<u8>, ThumbnailError> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ThumbnailError::Process {
            details: format!("failed to start transcoder: {e}"),
        })?;

    let mut stdout = child.stdout.take().ok_or_else(|| ThumbnailError::Process {
        details: "transcoder stdout was not captured".into(),
    })?;
    let mut stderr = child.stderr.take().ok_or_else(|| ThumbnailError::Process {
        details: "transcoder stderr was not captured".into(),
    })?;

    let collect = async {
        let mut image = Vec::new();
        let mut error_text = String::new();
        let (out, err) = tokio::join!(
            stdout.read_to_end(&mut image),
            stderr.read_to_string(&mut error_text),
        );
        out.map_err(|e| ThumbnailError::Process {
            details: format!("failed to read frame data: {e}"),
        })?;
        err.map_err(|e| ThumbnailError::Process {
            details: format!("failed to read transcoder diagnostics: {e}"),
        })?;

        let status = child.wait().await.map_err(|e| ThumbnailError::Process {
            details: format!("failed to wait for transcoder: {e}"),
        })?;

        if !status.success() {
            let error_text = error_text.trim();
            let details = if error_text.is_empty() {
                format!("transcoder exited with {status}")
            } else {
                error_text.to_string()
            };
            return Err(ThumbnailError::Process { details });
        }
        if image.is_empty() {
            // A seek past the end of a short input exits cleanly with no
            // output; report it as a process failure rather than returning
            // an empty image.
            return Err(ThumbnailError::Process {
                details: "no frame data produced; the input may be shorter than the seek point"
                    .into(),
            });
        }
        Ok(image)
    };

    let outcome = timeout(limit, collect).await;
    match outcome {
        Ok(result) => result,
        Err(_) => {
            warn!(limit = ?limit, "transcoder exceeded time bound, killing");
            let _ = child.start_kill();
            let _ = child.wait().await;
            Err(ThumbnailError::Timeout)
        }
    }
}
