/// Metadata panel at the top of the window
use iced::widget::{container, text, Column};
use iced::{Border, Color, Element, Length, Theme};

use crate::state::data::SessionMetadata;
use crate::Message;

/// Rough advance of one glyph at the panel's font size
const CHAR_WIDTH: f32 = 8.0;
const FONT_SIZE: f32 = 16.0;
const PADDING: f32 = 10.0;
const ELLIPSIS: &str = "...";

fn panel_background() -> Color {
    Color::from_rgb8(0x19, 0x1c, 0x20)
}

fn panel_foreground() -> Color {
    Color::from_rgb8(0xe2, 0xe2, 0xe9)
}

/// Truncate `line` to `max_chars`, ending with "..." when cut
pub fn clip_line(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut clipped: String = line.chars().take(keep).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

/// How many characters fit on one line of a panel `width` pixels wide
pub fn chars_per_line(width: f32) -> usize {
    ((width - 4.0 * PADDING) / CHAR_WIDTH).max(0.0) as usize
}

pub fn view(metadata: &SessionMetadata, width: f32) -> Element<'_, Message> {
    let max_chars = chars_per_line(width);
    let lines = metadata.entries().into_iter().map(|(label, value)| {
        text(clip_line(&format!("{label} : {value}"), max_chars))
            .size(FONT_SIZE)
            .color(panel_foreground())
            .into()
    });

    container(Column::with_children(lines).spacing(4))
        .padding(PADDING)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(panel_background().into()),
            border: Border {
                radius: 10.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}
