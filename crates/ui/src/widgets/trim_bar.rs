use iced::widget::canvas::{self, Path};
use iced::widget::container;
use iced::{Color, Element, Length, Point, Rectangle, Size, Theme, mouse};
use trim_engine::{HandleLayout, TrimBoundary, TrimLayout, pixels_to_time};

const BAR_HEIGHT_PX: f32 = 6.0;
const HANDLE_WIDTH_PX: f32 = 6.0;
const HANDLE_HIT_SLOP_PX: f32 = 8.0;
const TRACK_HEIGHT_PX: f32 = 28.0;

/// What the user did on the trim bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimBarInteraction {
    /// Click on the track away from a handle, resolved to a media time.
    Seek(f64),
    DragStarted(TrimBoundary),
    /// Handle moved to a media time already limited by the other handle.
    Dragged(TrimBoundary, f64),
    DragReleased(TrimBoundary),
}

/// Handle being dragged, with the cursor's offset from the handle centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleDrag {
    boundary: TrimBoundary,
    grab_offset: f32,
}

impl HandleDrag {
    fn grab(handle: &HandleLayout, cursor_x: f32) -> Self {
        Self {
            boundary: handle.boundary,
            grab_offset: cursor_x - handle.x,
        }
    }

    /// Media time for the handle when the cursor sits at `cursor_x`.
    ///
    /// The handle position is held inside `[limit_left, limit_right]` before
    /// converting, so a start handle never passes the end handle and the
    /// end handle never leaves the track.
    pub fn time_at(&self, cursor_x: f32, layout: &TrimLayout) -> Option<f64> {
        let handle = handle_for(layout, self.boundary)?;
        let x = (cursor_x - self.grab_offset)
            .max(handle.limit_left)
            .min(handle.limit_right);
        Some(pixels_to_time(x, layout.track_width, layout.duration))
    }
}

fn handle_for(layout: &TrimLayout, boundary: TrimBoundary) -> Option<HandleLayout> {
    match boundary {
        TrimBoundary::Start => Some(layout.start_handle),
        TrimBoundary::End => layout.end_handle,
    }
}

/// Handle under `x`, if any. Overlapping handles resolve to the nearer one,
/// and a tie goes to the end handle when the cursor is on its right.
pub fn hit_test(layout: &TrimLayout, x: f32) -> Option<TrimBoundary> {
    let mut best: Option<(f32, &HandleLayout)> = None;
    for handle in std::iter::once(&layout.start_handle).chain(layout.end_handle.iter()) {
        let distance = (x - handle.x).abs();
        if distance > HANDLE_HIT_SLOP_PX {
            continue;
        }
        let closer = match best {
            None => true,
            Some((best_distance, _)) => {
                distance < best_distance
                    || (distance == best_distance
                        && handle.boundary == TrimBoundary::End
                        && x >= handle.x)
            }
        };
        if closer {
            best = Some((distance, handle));
        }
    }
    best.map(|(_, handle)| handle.boundary)
}

#[derive(Debug, Default)]
struct TrimBarState {
    drag: Option<HandleDrag>,
}

#[derive(Debug)]
struct TrimBarProgram<Message> {
    layout: Option<TrimLayout>,
    on_interaction: fn(TrimBarInteraction) -> Message,
}

impl<Message> canvas::Program<Message> for TrimBarProgram<Message> {
    type State = TrimBarState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let Some(layout) = self.layout else {
            state.drag = None;
            return (canvas::event::Status::Ignored, None);
        };

        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let Some(x) = cursor.position_in(bounds).map(|position| position.x) else {
                    return (canvas::event::Status::Ignored, None);
                };

                let grabbed =
                    hit_test(&layout, x).and_then(|boundary| handle_for(&layout, boundary));
                let interaction = match grabbed {
                    Some(handle) => {
                        state.drag = Some(HandleDrag::grab(&handle, x));
                        TrimBarInteraction::DragStarted(handle.boundary)
                    }
                    None => TrimBarInteraction::Seek(pixels_to_time(
                        x,
                        bounds.width,
                        layout.duration,
                    )),
                };
                (
                    canvas::event::Status::Captured,
                    Some((self.on_interaction)(interaction)),
                )
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let Some(drag) = state.drag else {
                    return (canvas::event::Status::Ignored, None);
                };
                let Some(time) = drag.time_at(position.x - bounds.x, &layout) else {
                    return (canvas::event::Status::Ignored, None);
                };
                (
                    canvas::event::Status::Captured,
                    Some((self.on_interaction)(TrimBarInteraction::Dragged(
                        drag.boundary,
                        time,
                    ))),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                match state.drag.take() {
                    Some(drag) => (
                        canvas::event::Status::Captured,
                        Some((self.on_interaction)(TrimBarInteraction::DragReleased(
                            drag.boundary,
                        ))),
                    ),
                    None => (canvas::event::Status::Ignored, None),
                }
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let bar_y = (bounds.height - BAR_HEIGHT_PX) / 2.0;

        let track = Path::rectangle(
            Point::new(0.0, bar_y),
            Size::new(bounds.width, BAR_HEIGHT_PX),
        );
        frame.fill(&track, Color::from_rgb8(44, 46, 54));

        if let Some(layout) = self.layout {
            if layout.bar_width > 0.0 {
                let played = Path::rectangle(
                    Point::new(layout.bar_x, bar_y),
                    Size::new(layout.bar_width, BAR_HEIGHT_PX),
                );
                frame.fill(&played, Color::from_rgb8(113, 70, 254));
            }

            for handle in std::iter::once(&layout.start_handle).chain(layout.end_handle.iter()) {
                let knob = Path::rectangle(
                    Point::new(handle.x - HANDLE_WIDTH_PX / 2.0, 0.0),
                    Size::new(HANDLE_WIDTH_PX, bounds.height),
                );
                frame.fill(&knob, Color::from_rgb8(0, 255, 190));
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag.is_some() {
            return mouse::Interaction::Grabbing;
        }
        let (Some(layout), Some(position)) = (self.layout, cursor.position_in(bounds)) else {
            return mouse::Interaction::None;
        };

        if hit_test(&layout, position.x).is_some() {
            mouse::Interaction::ResizingHorizontally
        } else {
            mouse::Interaction::Pointer
        }
    }
}

/// Renders the trim bar on a track `track_width` pixels wide.
pub fn view<'a, Message>(
    layout: Option<TrimLayout>,
    track_width: f32,
    on_interaction: fn(TrimBarInteraction) -> Message,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        canvas::Canvas::new(TrimBarProgram {
            layout,
            on_interaction,
        })
        .width(Length::Fixed(track_width.max(0.0)))
        .height(Length::Fixed(TRACK_HEIGHT_PX)),
    )
    .into()
}
