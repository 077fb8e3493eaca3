use cgmath::Vector2;
use iced::event::{self, Event};
use iced::widget::image::Handle;
use iced::widget::{button, canvas, column, container, row, stack};
use iced::{time, window, Alignment, Color, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod codec;
mod config;
mod error;
mod state;
mod ui;

use config::AppConfig;
use state::controller::ControlId;
use state::data::Resolution;
use state::editor::{Editor, Notifier};
use ui::canvas::PreviewCanvas;
use ui::slider::SliderCanvas;
use ui::toast::Toast;

const TITLE: &str = "Image Quality Modifier";
const PAD: f32 = 20.0;
const CONTROL_HEIGHT: f32 = 40.0;
const BUTTON_WIDTH: f32 = 80.0;
/// How often the toast checks whether it should disappear
const TOAST_TICK: Duration = Duration::from_millis(200);

/// Main application state
struct ImageQualityModifier {
    /// Image session and slider/pan/zoom state
    editor: Editor,
    /// Transient messages
    toast: Toast,
    /// GPU handle for the working image, rebuilt when the editor revision moves
    preview: Option<Handle>,
    preview_revision: u64,
    /// Current window width, for clipping the info panel
    window_width: f32,
    accept_png: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    WindowResized(Size),
    /// User clicked the "Open" button
    OpenFile,
    /// Primary press inside a slider, with the pointer ratio along it
    ControlPressed(ControlId, f32),
    ControlDragged(ControlId, f32),
    ControlReleased(ControlId),
    /// Secondary-button drag over the preview
    PanStarted,
    PanMoved(Vector2<f32>),
    PanEnded,
    /// Wheel notches over the preview
    Zoomed(f32),
    Save,
    Tick(Instant),
}

impl ImageQualityModifier {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let mut toast = Toast::new(Duration::from_secs(config.toast_seconds));
        toast.notify("Drag and drop an image here".to_string());

        tracing::info!(
            "Ready (png: {}, policy: {:?}, reset pan: {})",
            config.accept_png,
            config.rederive_policy,
            config.reset_pan_on_release
        );

        (
            ImageQualityModifier {
                editor: Editor::new(&config),
                toast,
                preview: None,
                preview_revision: 0,
                window_width: config.window_width,
                accept_png: config.accept_png,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FileDropped(path) => self.editor.load(&path, &mut self.toast),
            Message::OpenFile => {
                // Show the native file picker dialog
                let extensions = codec::loader::accepted_extensions(self.accept_png);
                let picked = FileDialog::new()
                    .set_title("Open Image")
                    .add_filter("Images", &extensions)
                    .pick_file();

                if let Some(path) = picked {
                    self.editor.load(&path, &mut self.toast);
                }
            }
            Message::WindowResized(size) => self.window_width = size.width,
            Message::ControlPressed(id, ratio) => {
                self.editor.press_control(id, ratio, &mut self.toast)
            }
            Message::ControlDragged(id, ratio) => {
                self.editor.drag_control(id, ratio, &mut self.toast)
            }
            Message::ControlReleased(id) => self.editor.release_control(id, &mut self.toast),
            Message::PanStarted => self.editor.controller_mut().pan_mut().start(),
            Message::PanMoved(delta) => self.editor.controller_mut().pan_mut().move_by(delta),
            Message::PanEnded => self.editor.controller_mut().pan_mut().end(),
            Message::Zoomed(notches) => self.editor.controller_mut().wheel(notches),
            Message::Save => self.editor.save(&mut self.toast),
            Message::Tick(now) => self.toast.tick(now),
        }

        self.sync_preview();
        Task::none()
    }

    /// Rebuild the preview handle if the working image changed
    fn sync_preview(&mut self) {
        if self.editor.revision() == self.preview_revision {
            return;
        }
        self.preview_revision = self.editor.revision();
        self.preview = self.editor.session().derived().map(|derived| {
            let (width, height) = derived.preview.dimensions();
            Handle::from_rgba(width, height, derived.preview.as_raw().clone())
        });
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let sliders = column![
            self.slider(ControlId::Quality, self.editor.quality_caption()),
            self.slider(ControlId::Resolution, self.editor.resolution_caption()),
        ]
        .spacing(PAD / 2.0);

        let buttons = column![
            button("Open")
                .width(BUTTON_WIDTH)
                .height(CONTROL_HEIGHT)
                .padding(10)
                .on_press(Message::OpenFile),
            button("Save")
                .width(BUTTON_WIDTH)
                .height(CONTROL_HEIGHT)
                .padding(10)
                .on_press(Message::Save),
        ]
        .spacing(PAD / 2.0);

        let controls = row![sliders, buttons]
            .spacing(PAD / 2.0)
            .align_y(Alignment::End);

        let content = column![
            ui::info::view(self.editor.session().metadata(), self.window_width),
            self.preview_canvas(),
            controls,
        ]
        .spacing(PAD / 2.0)
        .padding(PAD / 2.0);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(Color::from_rgb8(0x11, 0x13, 0x18).into()),
                ..container::Style::default()
            });

        match self.toast.view() {
            Some(toast) => stack![base, toast].into(),
            None => base.into(),
        }
    }

    fn preview_canvas(&self) -> Element<'_, Message> {
        let controller = self.editor.controller();
        let resolution = self
            .editor
            .session()
            .source()
            .map(|source| source.resolution())
            .unwrap_or(Resolution::new(1, 1));

        canvas(PreviewCanvas {
            image: self.preview.clone(),
            resolution,
            zoom: controller.zoom(),
            offset: controller.pan().offset(),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn slider(&self, id: ControlId, caption: String) -> Element<'_, Message> {
        let control = self.editor.controller().control(id);

        canvas(SliderCanvas::new(id, control.ratio(), caption, control.is_dragging()))
            .width(Length::Fill)
            .height(CONTROL_HEIGHT)
            .into()
    }

    /// Window events (drops, resizes) plus the toast timer while one is showing
    fn subscription(&self) -> Subscription<Message> {
        let window_events = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            _ => None,
        });

        if self.toast.is_visible() {
            Subscription::batch([window_events, time::every(TOAST_TICK).map(Message::Tick)])
        } else {
            window_events
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Log to stderr, filtered by RUST_LOG (info for this crate by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,image_quality_modifier=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_tracing();

    let config = AppConfig::load_or_default();
    let window_size = Size::new(config.window_width, config.window_height);

    iced::application(
        TITLE,
        ImageQualityModifier::update,
        ImageQualityModifier::view,
    )
    .theme(ImageQualityModifier::theme)
    .subscription(ImageQualityModifier::subscription)
    .window_size(window_size)
    .centered()
    .run_with(move || ImageQualityModifier::new(config))
}
