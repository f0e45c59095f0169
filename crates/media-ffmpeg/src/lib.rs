//! Thin `ffprobe` wrapper used to learn media duration and dimensions.

mod error;
mod probe;

pub use error::{MediaFfmpegError, Result};
pub use probe::{MediaInfo, VideoStreamInfo, parse_probe_output, probe_media};
