//! Conversions between media time (seconds) and timeline pixels.

/// Pixels per second of media for one timeline layout.
///
/// A scale only exists once the media duration is known and positive, so
/// every pixel computation is gated on that precondition by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    /// Builds the scale of a track `track_width_px` wide showing `duration` seconds.
    ///
    /// A negative width is treated as an empty track.
    ///
    /// # Example
    /// ```
    /// use trim_engine::mapper::Scale;
    ///
    /// let scale = Scale::new(1000.0, Some(100.0)).expect("known duration");
    /// assert_eq!(scale.pixels_per_second(), 10.0);
    /// assert!(Scale::new(1000.0, None).is_none());
    /// ```
    pub fn new(track_width_px: f32, duration: Option<f64>) -> Option<Self> {
        let duration = duration.filter(|seconds| seconds.is_finite() && *seconds > 0.0)?;
        let width = f64::from(track_width_px.max(0.0));
        Some(Self(width / duration))
    }

    pub fn pixels_per_second(self) -> f64 {
        self.0
    }
}

/// Converts a media time into a pixel offset from the track's left edge.
///
/// # Example
/// ```
/// use trim_engine::mapper::{Scale, time_to_pixels};
///
/// let scale = Scale::new(1000.0, Some(100.0)).expect("known duration");
/// assert_eq!(time_to_pixels(25.0, scale), 250.0);
/// ```
pub fn time_to_pixels(time: f64, scale: Scale) -> f32 {
    (time * scale.0) as f32
}

/// Converts a pixel offset on a track into a media time.
///
/// Returns `0.0` for an empty track instead of dividing by zero.
///
/// # Example
/// ```
/// use trim_engine::mapper::pixels_to_time;
///
/// assert_eq!(pixels_to_time(250.0, 1000.0, 100.0), 25.0);
/// ```
pub fn pixels_to_time(offset_px: f32, track_width_px: f32, duration: f64) -> f64 {
    if track_width_px <= 0.0 {
        return 0.0;
    }

    duration * (f64::from(offset_px) / f64::from(track_width_px))
}
