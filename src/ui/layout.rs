/// Preview placement math
///
/// The preview canvas is given whatever space is left after the info panel
/// and the controls; this finds where the image goes inside it.
use cgmath::Vector2;
use iced::{Point, Rectangle, Size};

use crate::state::data::Resolution;

/// Gap kept between the preview and the canvas edges
pub const PREVIEW_MARGIN: f32 = 20.0;

/// Largest aspect-preserving rectangle that fits in `available` (minus the
/// margin), scaled by `zoom`, centered, then moved by `pan`.
pub fn fit_preview(available: Size, image: Resolution, zoom: f32, pan: Vector2<f32>) -> Rectangle {
    let max_width = (available.width - 2.0 * PREVIEW_MARGIN).max(0.0);
    let max_height = (available.height - 2.0 * PREVIEW_MARGIN).max(0.0);

    let (width, height) = if image.is_valid() {
        let ratio = image.aspect_ratio();
        (
            max_width.min(max_height * ratio),
            max_height.min(max_width / ratio),
        )
    } else {
        (0.0, 0.0)
    };

    let size = Size::new((width * zoom).round().abs(), (height * zoom).round().abs());
    let origin = Point::new(
        (available.width - size.width) / 2.0 + pan.x,
        (available.height - size.height) / 2.0 + pan.y,
    );

    Rectangle::new(origin, size)
}
