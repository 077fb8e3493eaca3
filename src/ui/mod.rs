/// User interface module
///
/// - Preview canvas with zoom/pan (canvas.rs)
/// - Slider controls (slider.rs)
/// - Preview placement math (layout.rs)
/// - Metadata panel (info.rs)
/// - Transient messages (toast.rs)

pub mod canvas;
pub mod info;
pub mod layout;
pub mod slider;
pub mod toast;
