use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Path, Program};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme};

use crate::state::controller::{pointer_ratio, ControlId};
use crate::Message;

/// Inset of the filled part inside the track
const PAD: f32 = 5.0;

fn track_color() -> Color {
    Color::from_rgb8(0x28, 0x47, 0x77)
}

fn fill_color() -> Color {
    Color::from_rgb8(0xaa, 0xc7, 0xff)
}

/// Canvas slider for one control.
///
/// Pointer input is forwarded to the controller; this widget only draws
/// the ratio it is given.
pub struct SliderCanvas {
    id: ControlId,
    ratio: f32,
    caption: String,
    dragging: bool,
}

impl SliderCanvas {
    pub fn new(id: ControlId, ratio: f32, caption: String, dragging: bool) -> Self {
        Self {
            id,
            ratio,
            caption,
            dragging,
        }
    }
}

impl Program<Message> for SliderCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let (width, height) = (bounds.width, bounds.height);

        frame.fill(&Path::rectangle(Point::ORIGIN, bounds.size()), track_color());

        let fill_width = self.ratio.clamp(0.0, 1.0) * (width - 2.0 * PAD).max(0.0);
        frame.fill(
            &Path::rectangle(
                Point::new(PAD, PAD),
                Size::new(fill_width, (height - 2.0 * PAD).max(0.0)),
            ),
            fill_color(),
        );

        // Knob sits at the end of the filled part
        let radius = height / 2.0;
        let knob = Point::new((PAD + fill_width).clamp(radius, (width - radius).max(radius)), height / 2.0);
        frame.fill(&Path::circle(knob, radius), track_color());
        frame.fill(&Path::circle(knob, (radius - PAD).max(0.0)), fill_color());

        frame.fill_text(canvas::Text {
            content: self.caption.clone(),
            position: Point::new(width / 2.0, height / 2.0),
            color: Color::BLACK,
            size: Pixels(16.0),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Press inside the track starts a drag
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    let ratio = pointer_ratio(position.x, 0.0, bounds.width);
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::ControlPressed(self.id, ratio)),
                    );
                }
            }

            // While dragging, follow the pointer anywhere in the window
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) if self.dragging => {
                let ratio = pointer_ratio(position.x, bounds.x, bounds.width);
                return (
                    canvas::event::Status::Captured,
                    Some(Message::ControlDragged(self.id, ratio)),
                );
            }

            // Release anywhere ends the drag
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.dragging =>
            {
                return (
                    canvas::event::Status::Captured,
                    Some(Message::ControlReleased(self.id)),
                );
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if self.dragging || cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Idle
        }
    }
}
