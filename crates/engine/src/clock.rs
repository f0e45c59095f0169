//! Fixed-cadence clock sync between a running transport and the trim range.

use crate::transport::MediaTransport;
use crate::trim::TrimRange;

/// Identifies one run of the poll, from `start` to `stop`.
///
/// Hosts tag every scheduled tick with the generation it was scheduled
/// under; ticks from an earlier run are rejected by [`ClockSync::accepts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollGeneration(u64);

/// Poll lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running(PollGeneration),
}

/// Clock sync state machine.
///
/// # Example
/// ```
/// use trim_engine::clock::ClockSync;
///
/// let mut clock = ClockSync::new();
/// let generation = clock.start();
/// assert!(clock.accepts(generation));
/// assert!(clock.stop());
/// assert!(!clock.stop());
/// assert!(!clock.accepts(generation));
/// ```
#[derive(Debug)]
pub struct ClockSync {
    state: ClockState,
    next_generation: u64,
}

impl Default for ClockSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSync {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            next_generation: 1,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running(_))
    }

    /// Generation of the live run, if any.
    pub fn generation(&self) -> Option<PollGeneration> {
        match self.state {
            ClockState::Running(generation) => Some(generation),
            ClockState::Stopped => None,
        }
    }

    /// Starts polling. Starting a running clock keeps the live run.
    pub fn start(&mut self) -> PollGeneration {
        if let ClockState::Running(generation) = self.state {
            return generation;
        }

        let generation = PollGeneration(self.next_generation);
        self.next_generation += 1;
        self.state = ClockState::Running(generation);
        generation
    }

    /// Cancels the live run. Returns `false` when nothing was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = ClockState::Stopped;
        was_running
    }

    /// True when a tick scheduled under `generation` may still update state.
    pub fn accepts(&self, generation: PollGeneration) -> bool {
        self.state == ClockState::Running(generation)
    }
}

/// What one poll saw on the transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollObservation {
    pub current_time: f64,
    pub is_playing: bool,
    /// Transport time that crossed the end boundary, when the poll wrapped.
    pub wrapped_from: Option<f64>,
}

/// Reads the transport once and enforces the loop boundary.
///
/// A time past the trim end sends the transport back to the trim start, and
/// the observation reports the start time rather than the crossed time.
pub fn observe<T>(transport: &mut T, trim: &TrimRange) -> PollObservation
where
    T: MediaTransport + ?Sized,
{
    let mut current_time = transport.current_time();
    let mut wrapped_from = None;
    if trim.is_past_end(current_time) {
        transport.set_current_time(trim.start());
        wrapped_from = Some(current_time);
        current_time = trim.start();
    }

    PollObservation {
        current_time,
        is_playing: !transport.paused(),
        wrapped_from,
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockState, ClockSync, observe};
    use crate::api::tests::FakeTransport;
    use crate::transport::MediaTransport;
    use crate::trim::TrimRange;

    fn range(start: f64, end: f64) -> TrimRange {
        let mut range = TrimRange::new();
        range.on_duration_known(100.0);
        range.set_start(start);
        range.set_end(end);
        range
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut clock = ClockSync::new();

        let first = clock.start();
        let second = clock.start();

        assert_eq!(first, second);
        assert_eq!(clock.state(), ClockState::Running(first));
    }

    #[test]
    fn restart_issues_a_new_generation() {
        let mut clock = ClockSync::new();
        let first = clock.start();
        clock.stop();

        let second = clock.start();

        assert_ne!(first, second);
        assert!(!clock.accepts(first));
        assert!(clock.accepts(second));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut clock = ClockSync::new();
        assert!(!clock.stop());

        clock.start();

        assert!(clock.stop());
        assert!(!clock.stop());
        assert_eq!(clock.generation(), None);
    }

    #[test]
    fn crossing_the_end_wraps_transport_and_observation_together() {
        let mut transport = FakeTransport::playing(100.0, 41.0);

        let observation = observe(&mut transport, &range(10.0, 40.0));

        assert_eq!(observation.current_time, 10.0);
        assert_eq!(observation.wrapped_from, Some(41.0));
        assert_eq!(transport.current_time(), 10.0);
        assert!(observation.is_playing);
    }

    #[test]
    fn time_inside_the_range_is_reported_as_is() {
        let mut transport = FakeTransport::playing(100.0, 25.0);

        let observation = observe(&mut transport, &range(10.0, 40.0));

        assert_eq!(observation.current_time, 25.0);
        assert_eq!(observation.wrapped_from, None);
        assert_eq!(transport.seeks(), &[] as &[f64]);
    }

    #[test]
    fn playing_flag_follows_the_transport() {
        let mut transport = FakeTransport::playing(100.0, 25.0);
        transport.pause();

        let observation = observe(&mut transport, &range(10.0, 40.0));

        assert!(!observation.is_playing);
    }

    #[test]
    fn no_wrap_while_end_is_unknown() {
        let mut transport = FakeTransport::unknown_duration(250.0);

        let observation = observe(&mut transport, &TrimRange::new());

        assert_eq!(observation.current_time, 250.0);
        assert_eq!(observation.wrapped_from, None);
    }
}
