//! UI-agnostic playback and trim synchronization for the clip trimmer.

pub mod api;
pub mod clock;
pub mod error;
pub mod mapper;
pub mod media;
pub mod settings;
pub mod transport;
pub mod trim;

pub use api::{
    Command, Event, HandleLayout, PlaybackController, PlaybackSnapshot, PlaybackState, TrimLayout,
};
pub use clock::{ClockSync, PollGeneration};
pub use error::{EngineError, Result};
pub use mapper::{Scale, pixels_to_time, time_to_pixels};
pub use media::{FfmpegMediaBackend, MediaBackend, ProbedMedia};
pub use settings::PlayerSettings;
pub use transport::{Clock, ClockTransport, MediaTransport, SystemClock};
pub use trim::{TrimBoundary, TrimRange};
