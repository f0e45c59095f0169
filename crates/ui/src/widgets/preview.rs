use std::path::Path;

use iced::widget::{column, container, text};
use iced::{Element, Length};

/// Caption for the preview area: file name plus frame size when known.
pub fn caption(source: Option<&Path>, video_size: Option<(u32, u32)>) -> String {
    let Some(source) = source else {
        return String::from("No media loaded");
    };
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    match video_size {
        Some((width, height)) => format!("{name} ({width}x{height})"),
        None => name,
    }
}

/// Renders the preview area.
pub fn view<'a, Message>(
    source: Option<&Path>,
    video_size: Option<(u32, u32)>,
    clock: String,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        column![text(caption(source, video_size)), text(clock).size(48)]
            .spacing(8)
            .align_x(iced::Alignment::Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::caption;

    #[test]
    fn caption_names_file_and_frame_size() {
        let caption = caption(Some(Path::new("/clips/demo.mp4")), Some((1920, 1080)));

        assert_eq!(caption, "demo.mp4 (1920x1080)");
    }

    #[test]
    fn caption_without_video_stream_is_just_the_name() {
        assert_eq!(caption(Some(Path::new("talk.m4a")), None), "talk.m4a");
    }

    #[test]
    fn caption_without_media() {
        assert_eq!(caption(None, None), "No media loaded");
    }
}
