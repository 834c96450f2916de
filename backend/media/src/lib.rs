//! `framegrab-media` — video retrieval and frame extraction.
//!
//! Covers the two effectful legs of thumbnail generation: downloading the
//! remote video into a scoped temporary file, and driving an ffmpeg
//! subprocess to pull a single frame out of it under a wall-clock bound.

pub mod extract;
pub mod fetch;
pub mod filename;

pub use extract::{extract_frame, set_ffmpeg_path, to_data_uri, EXTRACT_TIMEOUT};
pub use fetch::{fetch_video, FetchedVideo};
pub use filename::display_name;
