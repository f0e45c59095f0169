use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, Result};

/// Result of probing one media file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedMedia {
    pub path: PathBuf,
    pub duration: f64,
    pub video_size: Option<(u32, u32)>,
}

/// Media operations required by the player shell.
pub trait MediaBackend {
    /// Probes the duration of `path`, failing when it cannot be played back.
    fn probe(&self, path: &Path) -> Result<ProbedMedia>;
}

/// FFmpeg CLI-backed backend used by production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegMediaBackend;

impl MediaBackend for FfmpegMediaBackend {
    fn probe(&self, path: &Path) -> Result<ProbedMedia> {
        let info = media_ffmpeg::probe_media(path)?;
        debug!(
            path = ?path,
            streams = info.stream_count,
            duration = ?info.duration_seconds,
            "media probed"
        );
        probed_media_from_info(&info)
    }
}

fn probed_media_from_info(info: &media_ffmpeg::MediaInfo) -> Result<ProbedMedia> {
    let seconds = info
        .duration_seconds
        .ok_or_else(|| EngineError::MissingDuration(info.path.clone()))?;
    let duration = info
        .known_duration()
        .ok_or_else(|| EngineError::InvalidDuration {
            path: info.path.clone(),
            seconds,
        })?;

    Ok(ProbedMedia {
        path: info.path.clone(),
        duration,
        video_size: info.video.map(|video| (video.width, video.height)),
    })
}
