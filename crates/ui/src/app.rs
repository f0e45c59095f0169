use std::path::PathBuf;

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length, Subscription, Task, time, window};
use tracing::{debug, info, warn};
use trim_engine::{
    ClockTransport, Event, FfmpegMediaBackend, PlaybackController, PlayerSettings, PollGeneration,
    TrimBoundary,
};

use crate::bridge::{self, ProbeOutcome};
use crate::widgets::controls::{self, ControlMessages, format_time};
use crate::widgets::preview;
use crate::widgets::trim_bar::{self, TrimBarInteraction};

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    PathChanged(String),
    OpenPressed,
    Probed(ProbeOutcome),
    Tick(PollGeneration),
    ViewportResized(f32),
    TrimBar(TrimBarInteraction),
    PlayPressed,
    PausePressed,
    ToggleMuted,
    ToggleFullscreen,
}

/// Root UI state: one trim preview player.
pub struct AppState {
    settings: PlayerSettings,
    controller: PlaybackController<ClockTransport>,
    source_path: String,
    opened: Option<PathBuf>,
    video_size: Option<(u32, u32)>,
    viewport_width: Option<f32>,
    resume_after_drag: bool,
    muted: bool,
    fullscreen: bool,
    status: String,
}

impl AppState {
    fn new(settings: PlayerSettings) -> Self {
        Self {
            settings,
            controller: PlaybackController::new(),
            source_path: String::new(),
            opened: None,
            video_size: None,
            viewport_width: None,
            resume_after_drag: false,
            muted: false,
            fullscreen: false,
            status: String::from("open a media file to preview"),
        }
    }

    /// Boots the app, reads the initial window width and opens `initial_path`.
    pub fn boot(settings: PlayerSettings, initial_path: Option<PathBuf>) -> (Self, Task<Message>) {
        let mut app = Self::new(settings);

        let viewport = window::get_oldest()
            .and_then(window::get_size)
            .map(|size| Message::ViewportResized(size.width));
        let open = match initial_path {
            Some(path) => {
                app.source_path = path.display().to_string();
                app.open(path)
            }
            None => Task::none(),
        };

        (app, Task::batch([viewport, open]))
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PathChanged(path) => {
                self.source_path = path;
            }
            Message::OpenPressed => {
                let path = self.source_path.trim().to_owned();
                if path.is_empty() {
                    self.status = String::from("media path is empty");
                } else {
                    return self.open(PathBuf::from(path));
                }
            }
            Message::Probed(outcome) => self.apply_probe(outcome),
            Message::Tick(generation) => {
                let events = self.controller.tick(generation);
                self.apply_events(events);
            }
            Message::ViewportResized(width) => {
                self.viewport_width = Some(width);
            }
            Message::TrimBar(interaction) => self.apply_trim_bar(interaction),
            Message::PlayPressed => {
                let events = self.controller.play();
                self.apply_events(events);
            }
            Message::PausePressed => {
                let events = self.controller.pause();
                self.apply_events(events);
            }
            Message::ToggleMuted => {
                self.muted = !self.muted;
            }
            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                let mode = if self.fullscreen {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                return window::get_latest().and_then(move |id| window::change_mode(id, mode));
            }
        }

        Task::none()
    }

    fn open(&mut self, path: PathBuf) -> Task<Message> {
        self.begin_open(path.clone());
        Task::perform(
            bridge::probe_in_background(FfmpegMediaBackend, path),
            Message::Probed,
        )
    }

    /// Mounts a fresh transport for `path`; the probe result completes it.
    fn begin_open(&mut self, path: PathBuf) {
        info!(path = ?path, "opening media");
        let transport = ClockTransport::new(self.settings.loop_playback);
        let events = self.controller.mount(transport);
        self.apply_events(events);

        self.video_size = None;
        self.resume_after_drag = false;
        self.status = format!("probing {}", path.display());
        self.opened = Some(path);
    }

    fn apply_probe(&mut self, outcome: ProbeOutcome) {
        if self.opened.as_deref() != Some(outcome.path.as_path()) {
            debug!(path = ?outcome.path, "dropping probe result for a replaced source");
            return;
        }

        match outcome.result {
            Ok(media) => {
                self.video_size = media.video_size;
                if let Some(transport) = self.controller.transport_mut() {
                    transport.report_duration(media.duration);
                }
                let mut events = self.controller.on_duration_changed();
                if self.settings.autoplay {
                    events.extend(self.controller.play());
                }
                self.apply_events(events);
            }
            Err(error) => {
                warn!(path = ?outcome.path, %error, "media probe failed");
                self.status = format!("error: {error}");
            }
        }
    }

    fn apply_trim_bar(&mut self, interaction: TrimBarInteraction) {
        let events = match interaction {
            TrimBarInteraction::Seek(time) => self.controller.skip(time),
            TrimBarInteraction::DragStarted(_) => {
                self.resume_after_drag = self.controller.state().is_playing;
                self.controller.pause()
            }
            TrimBarInteraction::Dragged(TrimBoundary::Start, time) => {
                self.controller.set_start_time(time)
            }
            TrimBarInteraction::Dragged(TrimBoundary::End, time) => {
                self.controller.set_end_time(time)
            }
            TrimBarInteraction::DragReleased(_) => {
                if std::mem::take(&mut self.resume_after_drag) {
                    self.controller.play()
                } else {
                    Vec::new()
                }
            }
        };
        self.apply_events(events);
    }

    fn apply_events(&mut self, events: Vec<Event>) {
        for event in events {
            debug!(?event, "playback event");
            self.status = match event {
                Event::DurationKnown { duration } => format!("duration {}", format_time(duration)),
                Event::PlaybackStarted { .. } => String::from("playing"),
                Event::PlaybackPaused => String::from("paused"),
                Event::Seeked { time } => format!("at {}", format_time(time)),
                Event::TrimChanged { start, end } => match end {
                    Some(end) => format!("trim {} to {}", format_time(start), format_time(end)),
                    None => format!("trim from {}", format_time(start)),
                },
                Event::LoopWrapped { to, .. } => format!("looped to {}", format_time(to)),
                Event::PollStopped => String::from("clock stopped"),
            };
        }
    }

    fn track_width(&self) -> f32 {
        self.settings.track_width(self.viewport_width)
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let snapshot = self.controller.snapshot();
        let track_width = self.track_width();

        let open_row = row![
            text_input("media path", &self.source_path)
                .on_input(Message::PathChanged)
                .on_submit(Message::OpenPressed),
            button("Open").on_press(Message::OpenPressed),
        ]
        .spacing(12);

        let clock = preview::view(
            self.opened.as_deref(),
            self.video_size,
            format_time(snapshot.preview_time),
        );

        let bar = container(trim_bar::view(
            snapshot.layout(track_width),
            track_width,
            Message::TrimBar,
        ))
        .padding([0.0, self.settings.timeline_inset_px]);

        let control_row = controls::view(
            self.controller.is_mounted(),
            snapshot.is_playing,
            self.muted,
            self.fullscreen,
            controls::time_label(snapshot.preview_time, snapshot.preview_duration),
            ControlMessages {
                play: Message::PlayPressed,
                pause: Message::PausePressed,
                toggle_muted: Message::ToggleMuted,
                toggle_fullscreen: Message::ToggleFullscreen,
            },
        );

        column![
            container(open_row).padding(16),
            clock,
            bar,
            container(control_row).padding(16),
            container(text(format!("Status: {}", self.status))).padding([0.0, 16.0]),
        ]
        .spacing(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Tracks the window width and, while the clock sync runs, schedules
    /// poll ticks tagged with the live generation.
    pub fn subscription(&self) -> Subscription<Message> {
        let viewport =
            window::resize_events().map(|(_id, size)| Message::ViewportResized(size.width));

        let poll = match self.controller.poll_generation() {
            Some(generation) => time::every(self.settings.poll_interval())
                .with(generation)
                .map(|(generation, _)| Message::Tick(generation)),
            None => Subscription::none(),
        };

        Subscription::batch([viewport, poll])
    }
}
