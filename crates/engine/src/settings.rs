use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_POLL_RATE_HZ: u32 = 120;
pub const DEFAULT_TIMELINE_INSET_PX: f32 = 122.0;

/// Player tuning loaded at startup.
///
/// Every field is optional in the JSON form; missing keys fall back to
/// [`PlayerSettings::default`].
///
/// # Example
/// ```
/// use trim_engine::PlayerSettings;
///
/// let settings = PlayerSettings::from_json_str(r#"{ "poll_rate_hz": 60 }"#).expect("valid");
/// assert_eq!(settings.poll_rate_hz, 60);
/// assert!(settings.autoplay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Clock sync polls per second.
    pub poll_rate_hz: u32,
    /// Horizontal margin on each side of the timeline, in pixels.
    pub timeline_inset_px: f32,
    pub autoplay: bool,
    /// Natural looping of the transport, a fallback for the trim-range wrap.
    pub loop_playback: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            poll_rate_hz: DEFAULT_POLL_RATE_HZ,
            timeline_inset_px: DEFAULT_TIMELINE_INSET_PX,
            autoplay: true,
            loop_playback: true,
        }
    }
}

impl PlayerSettings {
    /// Parses and validates settings from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|source| EngineError::SettingsParse {
                path: "<inline>".into(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| EngineError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&raw).map_err(|source| EngineError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fixed cadence of the clock sync poll.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.poll_rate_hz.max(1)))
    }

    /// Width of the timeline track for a viewport `viewport_width_px` wide.
    ///
    /// An unknown viewport resolves to `0`, as does one narrower than the insets.
    pub fn track_width(&self, viewport_width_px: Option<f32>) -> f32 {
        viewport_width_px
            .map(|width| (width - self.timeline_inset_px * 2.0).max(0.0))
            .unwrap_or(0.0)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_rate_hz == 0 {
            return Err(EngineError::InvalidSettings {
                reason: "poll_rate_hz must be positive".to_owned(),
            });
        }
        if !self.timeline_inset_px.is_finite() || self.timeline_inset_px < 0.0 {
            return Err(EngineError::InvalidSettings {
                reason: format!(
                    "timeline_inset_px must be a non-negative number, got {}",
                    self.timeline_inset_px
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PlayerSettings;
    use crate::error::EngineError;

    #[test]
    fn defaults_poll_at_120_hz() {
        let settings = PlayerSettings::default();

        let interval = settings.poll_interval();

        assert!(interval > Duration::from_micros(8_300));
        assert!(interval < Duration::from_micros(8_400));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = PlayerSettings::from_json_str(r#"{ "autoplay": false }"#)
            .expect("partial settings should parse");

        assert!(!settings.autoplay);
        assert_eq!(settings.poll_rate_hz, 120);
        assert_eq!(settings.timeline_inset_px, 122.0);
        assert!(settings.loop_playback);
    }

    #[test]
    fn zero_poll_rate_is_rejected() {
        let error = PlayerSettings::from_json_str(r#"{ "poll_rate_hz": 0 }"#)
            .expect_err("zero poll rate should be rejected");

        assert!(matches!(error, EngineError::InvalidSettings { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error =
            PlayerSettings::from_json_str("{ poll_rate_hz").expect_err("invalid json should fail");

        assert!(matches!(error, EngineError::SettingsParse { .. }));
    }

    #[test]
    fn track_width_subtracts_insets_and_falls_back_to_zero() {
        let settings = PlayerSettings::default();

        assert_eq!(settings.track_width(Some(1_244.0)), 1_000.0);
        assert_eq!(settings.track_width(Some(100.0)), 0.0);
        assert_eq!(settings.track_width(None), 0.0);
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let missing = std::env::temp_dir().join("cliptrim-missing-settings.json");

        let error = PlayerSettings::load(&missing).expect_err("missing file should fail");

        let EngineError::SettingsIo { path, .. } = error else {
            panic!("expected EngineError::SettingsIo");
        };
        assert_eq!(path, missing);
    }
}
