use iced::widget::{button, row, text};
use iced::{Alignment, Element};

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour on.
///
/// Negative and non-finite values render as `0:00`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(format_time(75.9), "1:15");
/// assert_eq!(format_time(3_725.0), "1:02:05");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3_600, (total % 3_600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// `elapsed / total` label for the preview clock.
pub fn time_label(preview_time: f64, preview_duration: Option<f64>) -> String {
    match preview_duration {
        Some(duration) => format!("{} / {}", format_time(preview_time), format_time(duration)),
        None => format!("{} / --:--", format_time(preview_time)),
    }
}

/// Messages the control row can emit.
#[derive(Debug, Clone, Copy)]
pub struct ControlMessages<Message> {
    pub play: Message,
    pub pause: Message,
    pub toggle_muted: Message,
    pub toggle_fullscreen: Message,
}

/// Renders the play/pause, time, audio and fullscreen controls.
///
/// Play/pause is disabled until a transport is mounted.
pub fn view<'a, Message>(
    mounted: bool,
    is_playing: bool,
    muted: bool,
    fullscreen: bool,
    label: String,
    messages: ControlMessages<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let play_pause = if is_playing {
        button("Pause").on_press_maybe(mounted.then_some(messages.pause))
    } else {
        button("Play").on_press_maybe(mounted.then_some(messages.play))
    };

    row![
        play_pause,
        text(label),
        button(if muted { "Unmute" } else { "Mute" }).on_press(messages.toggle_muted),
        button(if fullscreen { "Exit fullscreen" } else { "Fullscreen" })
            .on_press(messages.toggle_fullscreen),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::{format_time, time_label};

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn formats_hours_when_needed() {
        assert_eq!(format_time(3_725.0), "1:02:05");
    }

    #[test]
    fn clamps_unusable_values_to_zero() {
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn label_shows_placeholder_until_duration_is_known() {
        assert_eq!(time_label(12.0, None), "0:12 / --:--");
        assert_eq!(time_label(12.0, Some(30.0)), "0:12 / 0:30");
    }
}
