use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by the engine crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors produced while loading media or settings.
///
/// Playback commands never fail: commands against a detached transport are
/// no-ops and out-of-range seeks are left to the transport.
#[derive(Debug)]
pub enum EngineError {
    MissingDuration(PathBuf),
    InvalidDuration {
        path: PathBuf,
        seconds: f64,
    },
    SettingsIo {
        path: PathBuf,
        source: std::io::Error,
    },
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidSettings {
        reason: String,
    },
    Media(media_ffmpeg::MediaFfmpegError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDuration(path) => {
                write!(f, "media duration is missing: {}", path.display())
            }
            Self::InvalidDuration { path, seconds } => {
                write!(
                    f,
                    "media duration is not usable: {} ({seconds}s)",
                    path.display()
                )
            }
            Self::SettingsIo { path, source } => {
                write!(f, "read player settings: {} ({source})", path.display())
            }
            Self::SettingsParse { path, source } => {
                write!(f, "parse player settings: {} ({source})", path.display())
            }
            Self::InvalidSettings { reason } => write!(f, "invalid player settings: {reason}"),
            Self::Media(err) => write!(f, "media backend error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SettingsIo { source, .. } => Some(source),
            Self::SettingsParse { source, .. } => Some(source),
            Self::Media(err) => Some(err),
            _ => None,
        }
    }
}

impl From<media_ffmpeg::MediaFfmpegError> for EngineError {
    fn from(value: media_ffmpeg::MediaFfmpegError) -> Self {
        Self::Media(value)
    }
}
