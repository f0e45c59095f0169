/// Which boundary of the trim range a handle edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimBoundary {
    Start,
    End,
}

/// Selected sub-interval of the media, in seconds of full media time.
///
/// `end` stays `None` until the media duration is known. Values written
/// through [`TrimRange::set_start`] and [`TrimRange::set_end`] are stored as
/// given; the handles that produce them are bounded by each other's position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrimRange {
    start: f64,
    end: Option<f64>,
}

impl TrimRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Defaults `end` to the full duration the first time it becomes known.
    ///
    /// Returns whether `end` was set. Later duration reports never overwrite
    /// a boundary the user may already have moved.
    pub fn on_duration_known(&mut self, duration: f64) -> bool {
        if self.end.is_some() {
            return false;
        }
        self.end = Some(duration);
        true
    }

    pub fn set_start(&mut self, time: f64) {
        self.start = time;
    }

    pub fn set_end(&mut self, time: f64) {
        self.end = Some(time);
    }

    /// Sets whichever boundary `boundary` names.
    pub fn set(&mut self, boundary: TrimBoundary, time: f64) {
        match boundary {
            TrimBoundary::Start => self.set_start(time),
            TrimBoundary::End => self.set_end(time),
        }
    }

    /// Length of the selected range, once `end` is known.
    pub fn preview_duration(&self) -> Option<f64> {
        self.end.map(|end| end - self.start)
    }

    /// Playback position relative to the range start, never negative.
    ///
    /// # Example
    /// ```
    /// use trim_engine::TrimRange;
    ///
    /// let mut range = TrimRange::new();
    /// range.set_start(10.0);
    /// assert_eq!(range.preview_time(12.5), 2.5);
    /// assert_eq!(range.preview_time(4.0), 0.0);
    /// ```
    pub fn preview_time(&self, current_time: f64) -> f64 {
        (current_time - self.start).max(0.0)
    }

    /// True when `current_time` has run past the end boundary.
    ///
    /// Always false while the end boundary is unknown.
    pub fn is_past_end(&self, current_time: f64) -> bool {
        self.end.is_some_and(|end| current_time > end)
    }

    /// The end handle is only drawn at a known, positive position.
    pub fn has_end_handle(&self) -> bool {
        self.end.is_some_and(|end| end > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{TrimBoundary, TrimRange};

    #[test]
    fn end_defaults_to_first_known_duration_only() {
        let mut range = TrimRange::new();

        assert!(range.on_duration_known(100.0));
        range.set_end(40.0);
        assert!(!range.on_duration_known(120.0));

        assert_eq!(range.end(), Some(40.0));
    }

    #[test]
    fn preview_time_is_relative_inside_the_range() {
        let mut range = TrimRange::new();
        range.on_duration_known(100.0);
        range.set_start(10.0);
        range.set_end(40.0);

        for current in [10.0, 17.25, 33.0, 40.0] {
            let preview = range.preview_time(current);
            assert_eq!(preview, current - 10.0);
            assert!(preview >= 0.0);
        }
    }

    #[test]
    fn preview_time_is_clamped_before_start() {
        let mut range = TrimRange::new();
        range.set_start(10.0);

        assert_eq!(range.preview_time(3.0), 0.0);
    }

    #[test]
    fn preview_duration_needs_known_end() {
        let mut range = TrimRange::new();
        assert_eq!(range.preview_duration(), None);

        range.on_duration_known(100.0);
        range.set(TrimBoundary::Start, 10.0);
        range.set(TrimBoundary::End, 40.0);

        assert_eq!(range.preview_duration(), Some(30.0));
    }

    #[test]
    fn end_crossing_is_strict_and_deferred_until_end_is_known() {
        let mut range = TrimRange::new();
        assert!(!range.is_past_end(1_000.0));

        range.on_duration_known(100.0);
        range.set_end(40.0);

        assert!(!range.is_past_end(40.0));
        assert!(range.is_past_end(40.001));
    }

    #[test]
    fn end_handle_requires_known_positive_end() {
        let mut range = TrimRange::new();
        assert!(!range.has_end_handle());

        range.set_end(0.0);
        assert!(!range.has_end_handle());

        range.set_end(12.0);
        assert!(range.has_end_handle());
    }
}
