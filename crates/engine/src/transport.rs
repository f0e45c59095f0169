use std::time::Instant;

use tracing::debug;

/// Media element the controller drives while it is mounted.
///
/// Times are seconds of full media time. The transport advances on its own
/// once playing; seeks outside `[0, duration]` are the transport's to clamp.
pub trait MediaTransport {
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// `None` until the media has reported its duration.
    fn duration(&self) -> Option<f64>;

    fn paused(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);
}

/// Source of monotonic time for [`ClockTransport`].
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Software media transport advancing on a [`Clock`].
///
/// Stands in for a platform media element: it plays at 1x, clamps seeks
/// into the known duration and either wraps at the natural end (`looping`)
/// or stops there and reports itself paused.
///
/// # Example
/// ```
/// use trim_engine::{ClockTransport, MediaTransport};
///
/// let mut transport = ClockTransport::new(true);
/// assert_eq!(transport.duration(), None);
///
/// transport.report_duration(12.0);
/// transport.set_current_time(30.0);
/// assert_eq!(transport.current_time(), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClockTransport<C = SystemClock> {
    clock: C,
    duration: Option<f64>,
    looping: bool,
    position: f64,
    anchor: Option<Instant>,
}

impl ClockTransport<SystemClock> {
    pub fn new(looping: bool) -> Self {
        Self::with_clock(SystemClock, looping)
    }
}

impl<C> ClockTransport<C>
where
    C: Clock,
{
    pub fn with_clock(clock: C, looping: bool) -> Self {
        Self {
            clock,
            duration: None,
            looping,
            position: 0.0,
            anchor: None,
        }
    }

    /// Records the media duration once it has been probed.
    ///
    /// Non-finite or non-positive values are ignored and `false` is returned.
    pub fn report_duration(&mut self, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds <= 0.0 {
            debug!(seconds, "ignoring unusable duration report");
            return false;
        }

        self.position = self.current_time().min(seconds);
        if self.anchor.is_some() {
            self.anchor = Some(self.clock.now());
        }
        self.duration = Some(seconds);
        true
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    fn elapsed_position(&self) -> f64 {
        match self.anchor {
            Some(anchor) => {
                self.position + self.clock.now().saturating_duration_since(anchor).as_secs_f64()
            }
            None => self.position,
        }
    }

    fn is_at_natural_end(&self) -> bool {
        self.duration
            .is_some_and(|duration| self.position >= duration)
    }

    fn has_ended(&self) -> bool {
        !self.looping
            && self
                .duration
                .is_some_and(|duration| self.elapsed_position() >= duration)
    }
}

impl<C> MediaTransport for ClockTransport<C>
where
    C: Clock,
{
    fn current_time(&self) -> f64 {
        let raw = self.elapsed_position();
        match self.duration {
            Some(duration) if raw >= duration => {
                if self.looping && self.anchor.is_some() {
                    raw % duration
                } else {
                    duration
                }
            }
            _ => raw,
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut clamped = seconds.max(0.0);
        if let Some(duration) = self.duration {
            clamped = clamped.min(duration);
        }

        self.position = clamped;
        if self.anchor.is_some() {
            self.anchor = Some(self.clock.now());
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn paused(&self) -> bool {
        self.anchor.is_none() || self.has_ended()
    }

    fn play(&mut self) {
        if self.has_ended() || (self.anchor.is_none() && self.is_at_natural_end()) {
            self.position = 0.0;
            self.anchor = Some(self.clock.now());
            return;
        }
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
        }
    }

    fn pause(&mut self) {
        if self.anchor.is_some() {
            self.position = self.current_time();
            self.anchor = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::{Clock, ClockTransport, MediaTransport};

    /// Clock that only moves when a test advances it.
    #[derive(Debug, Clone)]
    pub(crate) struct ManualClock(Rc<Cell<Instant>>);

    impl ManualClock {
        pub(crate) fn new() -> Self {
            Self(Rc::new(Cell::new(Instant::now())))
        }

        pub(crate) fn advance(&self, seconds: f64) {
            self.0.set(self.0.get() + Duration::from_secs_f64(seconds));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }

    fn transport(looping: bool) -> (ManualClock, ClockTransport<ManualClock>) {
        let clock = ManualClock::new();
        let mut transport = ClockTransport::with_clock(clock.clone(), looping);
        transport.report_duration(10.0);
        (clock, transport)
    }

    #[test]
    fn advances_only_while_playing() {
        let (clock, mut transport) = transport(true);

        clock.advance(2.0);
        assert_eq!(transport.current_time(), 0.0);
        assert!(transport.paused());

        transport.play();
        clock.advance(2.5);
        assert!((transport.current_time() - 2.5).abs() < 1e-9);
        assert!(!transport.paused());

        transport.pause();
        clock.advance(3.0);
        assert!((transport.current_time() - 2.5).abs() < 1e-9);
        assert!(transport.paused());
    }

    #[test]
    fn seek_while_playing_continues_from_new_position() {
        let (clock, mut transport) = transport(true);
        transport.play();
        clock.advance(1.0);

        transport.set_current_time(6.0);
        clock.advance(0.5);

        assert!((transport.current_time() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn seeks_are_clamped_into_known_duration() {
        let (_clock, mut transport) = transport(true);

        transport.set_current_time(-4.0);
        assert_eq!(transport.current_time(), 0.0);

        transport.set_current_time(25.0);
        assert_eq!(transport.current_time(), 10.0);
    }

    #[test]
    fn seeks_are_unbounded_above_while_duration_is_unknown() {
        let clock = ManualClock::new();
        let mut transport = ClockTransport::with_clock(clock, false);

        transport.set_current_time(25.0);

        assert_eq!(transport.current_time(), 25.0);
        assert_eq!(transport.duration(), None);
    }

    #[test]
    fn looping_transport_wraps_at_natural_end() {
        let (clock, mut transport) = transport(true);
        transport.play();

        clock.advance(12.0);

        assert!((transport.current_time() - 2.0).abs() < 1e-9);
        assert!(!transport.paused());
    }

    #[test]
    fn non_looping_transport_stops_at_natural_end_and_restarts_on_play() {
        let (clock, mut transport) = transport(false);
        transport.play();

        clock.advance(12.0);
        assert_eq!(transport.current_time(), 10.0);
        assert!(transport.paused());

        transport.play();
        clock.advance(1.0);
        assert!((transport.current_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unusable_duration_reports_are_ignored() {
        let clock = ManualClock::new();
        let mut transport = ClockTransport::with_clock(clock, true);

        assert!(!transport.report_duration(0.0));
        assert!(!transport.report_duration(f64::NAN));
        assert_eq!(transport.duration(), None);
        assert!(transport.report_duration(4.0));
        assert_eq!(transport.duration(), Some(4.0));
    }
}
