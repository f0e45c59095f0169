use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};

/// Video stream dimensions read from `ffprobe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoStreamInfo {
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

/// Media probe result.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub duration_seconds: Option<f64>,
    pub video: Option<VideoStreamInfo>,
    pub stream_count: usize,
}

impl MediaInfo {
    /// Returns the container duration when `ffprobe` reported a usable value.
    ///
    /// # Example
    /// ```no_run
    /// use media_ffmpeg::probe_media;
    ///
    /// let info = probe_media("sample.mp4").expect("probe should succeed");
    /// let _seconds = info.known_duration().expect("duration is known");
    /// ```
    pub fn known_duration(&self) -> Option<f64> {
        self.duration_seconds
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
    }
}

/// Probes a media file via `ffprobe`.
///
/// # Example
/// ```no_run
/// use media_ffmpeg::probe_media;
///
/// let info = probe_media("sample.mp4").expect("probe should succeed");
/// assert!(info.stream_count > 0);
/// ```
pub fn probe_media(path: impl AsRef<Path>) -> Result<MediaInfo> {
    let path = path.as_ref();

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration:stream=index,codec_type,width,height",
            "-of",
            "compact=p=0:nk=0",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Io {
            context: "run ffprobe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::CommandFailed {
            command: format!("ffprobe {}", path.display()),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    parse_probe_output(path, &stdout)
}

/// Parses `compact=p=0:nk=0` output of a combined stream and format probe.
///
/// Stream lines carry a `codec_type` key; the format line only carries
/// `duration`. Line order is not significant.
pub fn parse_probe_output(path: impl AsRef<Path>, stdout: &str) -> Result<MediaInfo> {
    let path = path.as_ref();
    let mut duration_seconds = None;
    let mut video = None;
    let mut stream_count = 0usize;

    for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
        let fields = parse_fields(line)?;
        match fields.get("codec_type").copied() {
            Some(codec_type) => {
                stream_count += 1;
                if codec_type == "video" && video.is_none() {
                    video = parse_video_stream(&fields, line)?;
                }
            }
            None => {
                if let Some(raw) = fields.get("duration").copied() {
                    duration_seconds = parse_optional_f64(raw, "format duration seconds")?;
                }
            }
        }
    }

    if stream_count == 0 {
        return Err(MediaFfmpegError::NoStreams(path.to_path_buf()));
    }

    Ok(MediaInfo {
        path: path.to_path_buf(),
        duration_seconds,
        video,
        stream_count,
    })
}

fn parse_fields(line: &str) -> Result<HashMap<&str, &str>> {
    let mut map = HashMap::new();
    for field in line.split('|') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| MediaFfmpegError::Parse {
                context: "probe field",
                value: field.to_string(),
            })?;
        map.insert(key.trim(), value.trim().trim_matches('"'));
    }
    Ok(map)
}

fn parse_video_stream(fields: &HashMap<&str, &str>, line: &str) -> Result<Option<VideoStreamInfo>> {
    let index = parse_optional_u32(fields.get("index").copied(), "stream index")?.ok_or_else(
        || MediaFfmpegError::Parse {
            context: "stream index",
            value: line.to_string(),
        },
    )?;
    let width = parse_optional_u32(fields.get("width").copied(), "width")?;
    let height = parse_optional_u32(fields.get("height").copied(), "height")?;

    Ok(match (width, height) {
        (Some(width), Some(height)) => Some(VideoStreamInfo {
            index,
            width,
            height,
        }),
        _ => None,
    })
}

fn parse_optional_u32(value: Option<&str>, context: &'static str) -> Result<Option<u32>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.is_empty() || raw == "N/A" {
        return Ok(None);
    }

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| MediaFfmpegError::Parse {
            context,
            value: raw.to_string(),
        })
}

fn parse_optional_f64(raw: &str, context: &'static str) -> Result<Option<f64>> {
    if raw.is_empty() || raw == "N/A" {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| MediaFfmpegError::Parse {
            context,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::parse_probe_output;
    use crate::MediaFfmpegError;

    #[test]
    fn parses_duration_and_first_video_stream() {
        let stdout = "index=0|codec_type=video|width=160|height=90\n\
                      index=1|codec_type=audio|width=N/A|height=N/A\n\
                      duration=1.200000\n";

        let info = parse_probe_output("demo.mp4", stdout).expect("probe output should parse");

        assert_eq!(info.stream_count, 2);
        assert_eq!(info.known_duration(), Some(1.2));
        let video = info.video.expect("video stream should be present");
        assert_eq!((video.width, video.height), (160, 90));
    }

    #[test]
    fn missing_duration_is_reported_as_unknown() {
        let stdout = "duration=N/A\nindex=0|codec_type=audio\n";

        let info = parse_probe_output("demo.wav", stdout).expect("probe output should parse");

        assert_eq!(info.duration_seconds, None);
        assert_eq!(info.known_duration(), None);
        assert!(info.video.is_none());
    }

    #[test]
    fn zero_duration_is_not_a_known_duration() {
        let stdout = "index=0|codec_type=video|width=2|height=2\nduration=0.000000\n";

        let info = parse_probe_output("still.png", stdout).expect("probe output should parse");

        assert_eq!(info.duration_seconds, Some(0.0));
        assert_eq!(info.known_duration(), None);
    }

    #[test]
    fn output_without_streams_is_rejected() {
        let error = parse_probe_output("empty.mp4", "duration=3.0\n")
            .expect_err("probe without streams should fail");

        assert!(matches!(error, MediaFfmpegError::NoStreams(_)));
    }

    #[test]
    fn malformed_field_is_a_parse_error() {
        let error = parse_probe_output("demo.mp4", "index=0|codec_type\n")
            .expect_err("field without value should fail");

        assert!(matches!(
            error,
            MediaFfmpegError::Parse {
                context: "probe field",
                ..
            }
        ));
    }
}
