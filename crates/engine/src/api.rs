use tracing::{debug, info};

use crate::clock::{ClockSync, PollGeneration, observe};
use crate::mapper::{Scale, time_to_pixels};
use crate::transport::MediaTransport;
use crate::trim::{TrimBoundary, TrimRange};

/// Commands accepted by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    /// Seeks to an absolute media time, independent of the trim range.
    Skip {
        time: f64,
    },
    /// Moves the trim start and seeks to it.
    SetStartTime {
        time: f64,
    },
    /// Moves the trim end and seeks to it.
    SetEndTime {
        time: f64,
    },
    /// Cancels the clock sync poll without detaching the transport.
    Stop,
}

/// Events emitted by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    DurationKnown { duration: f64 },
    PlaybackStarted { generation: PollGeneration },
    PlaybackPaused,
    Seeked { time: f64 },
    TrimChanged { start: f64, end: Option<f64> },
    LoopWrapped { from: f64, to: f64 },
    PollStopped,
}

/// Observed playback state. Trim boundaries live in [`TrimRange`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackState {
    /// Last observed transport time, in full media time.
    pub current_time: f64,
    pub duration: Option<f64>,
    pub is_playing: bool,
}

/// Immutable view state consumed by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub duration: Option<f64>,
    pub start_time: f64,
    pub end_time: Option<f64>,
    pub is_playing: bool,
    pub preview_time: f64,
    pub preview_duration: Option<f64>,
    pub has_end_handle: bool,
    pub polling: bool,
}

/// Pixel placement of one boundary handle and the span it may be dragged in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub boundary: TrimBoundary,
    pub time: f64,
    pub x: f32,
    pub limit_left: f32,
    pub limit_right: f32,
}

/// Pixel placement of the play bar and both handles for one track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimLayout {
    pub track_width: f32,
    pub scale: Scale,
    pub duration: f64,
    /// Left edge of the filled segment, at the trim start.
    pub bar_x: f32,
    /// Width of the filled segment, the preview time.
    pub bar_width: f32,
    pub start_handle: HandleLayout,
    pub end_handle: Option<HandleLayout>,
}

impl PlaybackSnapshot {
    /// Lays the snapshot out on a track `track_width` pixels wide.
    ///
    /// Returns `None` while the duration is unknown. Each handle is limited
    /// by the other one's position so the two can never cross.
    pub fn layout(&self, track_width: f32) -> Option<TrimLayout> {
        let track_width = track_width.max(0.0);
        let duration = self.duration?;
        let scale = Scale::new(track_width, Some(duration))?;

        let start_x = time_to_pixels(self.start_time, scale);
        let end_x = time_to_pixels(self.end_time.unwrap_or(0.0), scale);

        let start_handle = HandleLayout {
            boundary: TrimBoundary::Start,
            time: self.start_time,
            x: start_x,
            limit_left: 0.0,
            limit_right: end_x,
        };
        let end_handle = match self.end_time {
            Some(end_time) if self.has_end_handle => Some(HandleLayout {
                boundary: TrimBoundary::End,
                time: end_time,
                x: end_x,
                limit_left: start_x,
                limit_right: track_width,
            }),
            _ => None,
        };

        Some(TrimLayout {
            track_width,
            scale,
            duration,
            bar_x: start_x,
            bar_width: time_to_pixels(self.preview_time, scale),
            start_handle,
            end_handle,
        })
    }
}

/// Owns playback state and drives one mounted media transport.
///
/// All mutation happens on the caller's thread: commands apply fully before
/// returning, and poll ticks arrive through [`PlaybackController::tick`].
/// Once unmounted, every command and tick is a silent no-op.
#[derive(Debug)]
pub struct PlaybackController<T> {
    transport: Option<T>,
    state: PlaybackState,
    trim: TrimRange,
    clock: ClockSync,
}

impl<T> Default for PlaybackController<T>
where
    T: MediaTransport,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PlaybackController<T>
where
    T: MediaTransport,
{
    /// Creates a detached controller.
    ///
    /// # Example
    /// ```
    /// use trim_engine::{ClockTransport, Command, PlaybackController};
    ///
    /// let mut controller = PlaybackController::new();
    /// let mut transport = ClockTransport::new(true);
    /// transport.report_duration(100.0);
    /// controller.mount(transport);
    ///
    /// controller.handle_command(Command::SetStartTime { time: 10.0 });
    /// assert_eq!(controller.snapshot().preview_time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self {
            transport: None,
            state: PlaybackState::default(),
            trim: TrimRange::new(),
            clock: ClockSync::new(),
        }
    }

    /// Attaches a transport, replacing and releasing any previous one.
    pub fn mount(&mut self, transport: T) -> Vec<Event> {
        if self.transport.is_some() {
            let _ = self.unmount();
        }

        self.state = PlaybackState {
            current_time: transport.current_time(),
            duration: None,
            is_playing: !transport.paused(),
        };
        self.trim = TrimRange::new();
        self.transport = Some(transport);
        info!("transport mounted");

        let mut events = self.on_duration_changed();
        if self.state.is_playing {
            events.push(self.start_poll());
        }
        events
    }

    /// Stops the poll, then releases the transport.
    pub fn unmount(&mut self) -> Option<T> {
        if self.clock.stop() {
            debug!("clock sync stopped for unmount");
        }
        let transport = self.transport.take();
        if transport.is_some() {
            info!("transport unmounted");
        }
        transport
    }

    pub fn is_mounted(&self) -> bool {
        self.transport.is_some()
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    /// Mutable access for the host that feeds media metadata to the transport.
    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn trim(&self) -> &TrimRange {
        &self.trim
    }

    /// Generation of the live poll, for tagging scheduled ticks.
    pub fn poll_generation(&self) -> Option<PollGeneration> {
        self.clock.generation()
    }

    /// Applies one command and returns emitted events.
    pub fn handle_command(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Skip { time } => self.skip(time),
            Command::SetStartTime { time } => self.set_start_time(time),
            Command::SetEndTime { time } => self.set_end_time(time),
            Command::Stop => self.stop(),
        }
    }

    pub fn play(&mut self) -> Vec<Event> {
        let Some(transport) = self.transport.as_mut() else {
            debug!("play ignored: transport detached");
            return Vec::new();
        };
        transport.play();
        self.state.is_playing = !transport.paused();

        if self.state.is_playing {
            vec![self.start_poll()]
        } else {
            Vec::new()
        }
    }

    /// Pauses the transport; the poll keeps observing seeks while paused.
    pub fn pause(&mut self) -> Vec<Event> {
        let Some(transport) = self.transport.as_mut() else {
            debug!("pause ignored: transport detached");
            return Vec::new();
        };
        transport.pause();
        self.state.is_playing = !transport.paused();
        vec![Event::PlaybackPaused]
    }

    /// Seeks the transport to an absolute media time.
    pub fn skip(&mut self, time: f64) -> Vec<Event> {
        let Some(transport) = self.transport.as_mut() else {
            debug!(time, "skip ignored: transport detached");
            return Vec::new();
        };
        transport.set_current_time(time);
        self.state.current_time = transport.current_time();
        debug!(
            requested = time,
            current_time = self.state.current_time,
            "seeked"
        );
        vec![Event::Seeked {
            time: self.state.current_time,
        }]
    }

    pub fn set_start_time(&mut self, time: f64) -> Vec<Event> {
        self.set_boundary(TrimBoundary::Start, time)
    }

    pub fn set_end_time(&mut self, time: f64) -> Vec<Event> {
        self.set_boundary(TrimBoundary::End, time)
    }

    /// Cancels the poll. Stopping twice is a no-op.
    pub fn stop(&mut self) -> Vec<Event> {
        if self.clock.stop() {
            debug!("clock sync stopped");
            vec![Event::PollStopped]
        } else {
            Vec::new()
        }
    }

    /// Reads the transport duration after it reports a change.
    ///
    /// The first known duration also becomes the trim end.
    pub fn on_duration_changed(&mut self) -> Vec<Event> {
        let Some(transport) = self.transport.as_ref() else {
            return Vec::new();
        };
        let Some(duration) = transport
            .duration()
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        else {
            return Vec::new();
        };
        if self.state.duration == Some(duration) {
            return Vec::new();
        }

        self.state.duration = Some(duration);
        info!(duration, "media duration known");
        let mut events = vec![Event::DurationKnown { duration }];
        if self.trim.on_duration_known(duration) {
            events.push(self.trim_changed());
        }
        events
    }

    /// Runs one clock sync poll scheduled under `generation`.
    pub fn tick(&mut self, generation: PollGeneration) -> Vec<Event> {
        if !self.clock.accepts(generation) {
            return Vec::new();
        }

        let mut events = self.on_duration_changed();
        let Some(transport) = self.transport.as_mut() else {
            return events;
        };

        let observation = observe(transport, &self.trim);
        self.state.current_time = observation.current_time;
        self.state.is_playing = observation.is_playing;

        if let Some(from) = observation.wrapped_from {
            debug!(from, to = observation.current_time, "loop boundary crossed");
            events.push(Event::LoopWrapped {
                from,
                to: observation.current_time,
            });
        }
        events
    }

    /// Derived view state; nothing here is cached between reads.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_time: self.state.current_time,
            duration: self.state.duration,
            start_time: self.trim.start(),
            end_time: self.trim.end(),
            is_playing: self.state.is_playing,
            preview_time: self.trim.preview_time(self.state.current_time),
            preview_duration: self.trim.preview_duration(),
            has_end_handle: self.trim.has_end_handle(),
            polling: self.clock.is_running(),
        }
    }

    fn set_boundary(&mut self, boundary: TrimBoundary, time: f64) -> Vec<Event> {
        if self.transport.is_none() {
            debug!(?boundary, time, "trim ignored: transport detached");
            return Vec::new();
        }

        self.trim.set(boundary, time);
        let mut events = vec![self.trim_changed()];
        events.extend(self.skip(time));
        events
    }

    fn trim_changed(&self) -> Event {
        Event::TrimChanged {
            start: self.trim.start(),
            end: self.trim.end(),
        }
    }

    fn start_poll(&mut self) -> Event {
        let generation = self.clock.start();
        debug!(?generation, "clock sync running");
        Event::PlaybackStarted { generation }
    }
}
