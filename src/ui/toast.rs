/// Transient on-screen message
use iced::widget::{container, text};
use iced::{Border, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

use crate::state::editor::Notifier;

fn toast_background() -> Color {
    Color::from_rgb8(0x33, 0x35, 0x3a)
}

fn toast_foreground() -> Color {
    Color::from_rgb8(0xe2, 0xe2, 0xe9)
}

#[derive(Debug, Clone)]
pub struct Toast {
    message: Option<String>,
    shown_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            message: None,
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn show_at(&mut self, message: String, now: Instant) {
        self.message = Some(message);
        self.shown_at = now;
    }

    /// Hide the message once it has been up for the full duration
    pub fn tick(&mut self, now: Instant) {
        if self.message.is_some() && now.saturating_duration_since(self.shown_at) >= self.duration {
            self.message = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Centered overlay, meant to sit on top of the main content in a stack
    pub fn view<'a, Message: 'a>(&'a self) -> Option<Element<'a, Message>> {
        let message = self.message()?;

        let bubble = container(text(message).size(16).color(toast_foreground()))
            .padding(10)
            .style(|_theme: &Theme| container::Style {
                background: Some(toast_background().into()),
                border: Border {
                    radius: 10.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            });

        Some(
            container(bubble)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        )
    }
}

impl Notifier for Toast {
    fn notify(&mut self, message: String) {
        self.show_at(message, Instant::now());
    }
}
