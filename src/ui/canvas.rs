use cgmath::Vector2;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Program};
use iced::widget::image::Handle;
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use super::layout::fit_preview;
use crate::state::data::Resolution;
use crate::Message;

/// Width of the dark frame drawn around the preview
const BORDER_WIDTH: f32 = 10.0;
/// Pixel scroll deltas per wheel notch
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Canvas showing the working image with zoom/pan
pub struct PreviewCanvas {
    /// Decoded pixels of the working image
    pub image: Option<Handle>,
    /// Source resolution, used for the aspect ratio
    pub resolution: Resolution,
    /// Zoom level (1.0 = fit)
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub offset: Vector2<f32>,
}

impl Program<Message> for PreviewCanvas {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        if let Some(handle) = &self.image {
            let placement = fit_preview(bounds.size(), self.resolution, self.zoom, self.offset);

            frame.fill_rectangle(
                Point::new(placement.x - BORDER_WIDTH, placement.y - BORDER_WIDTH),
                Size::new(
                    placement.width + 2.0 * BORDER_WIDTH,
                    placement.height + 2.0 * BORDER_WIDTH,
                ),
                Color::BLACK,
            );
            frame.draw_image(placement, handle);
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse wheel for zooming
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.is_over(bounds) {
                    let notches = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y,
                        mouse::ScrollDelta::Pixels { y, .. } => y / PIXELS_PER_NOTCH,
                    };
                    return (canvas::event::Status::Captured, Some(Message::Zoomed(notches)));
                }
            }

            // Right button press - start panning
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    state.last_position = Some(position);
                    return (canvas::event::Status::Captured, Some(Message::PanStarted));
                }
            }

            // Right button release - stop panning, wherever the pointer is
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Right)) => {
                if state.last_position.take().is_some() {
                    return (canvas::event::Status::Captured, Some(Message::PanEnded));
                }
            }

            // Mouse move - pan if dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(last) = state.last_position {
                    let delta = Vector2::new(position.x - last.x, position.y - last.y);
                    state.last_position = Some(position);
                    return (canvas::event::Status::Captured, Some(Message::PanMoved(delta)));
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> mouse::Interaction {
        if state.last_position.is_some() {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Idle
        }
    }
}

/// Pointer tracking for a pan drag
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub last_position: Option<Point>,
}
