/// The editor ties the session and the controller together
///
/// It is the boundary where every error is caught: failures become a
/// notification and the editor stays interactive.
use std::path::Path;

use super::controller::{ControlId, Controller, DeriveRequest};
use super::data::Resolution;
use super::session::Session;
use crate::config::AppConfig;

/// Something that can show a short-lived message to the user
pub trait Notifier {
    fn notify(&mut self, message: String);
}

#[derive(Debug)]
pub struct Editor {
    session: Session,
    controller: Controller,
    /// Bumped whenever the preview pixels change
    revision: u64,
}

impl Editor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: Session::new(config.accept_png),
            controller: Controller::new(config),
            revision: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load(&mut self, path: &Path, notifier: &mut impl Notifier) {
        match self.session.load(path) {
            Ok(source) => {
                tracing::info!("Loaded {} ({})", source.path().display(), source.resolution());
                self.controller.reset_controls();
                self.revision += 1;
                notifier.notify(format!("Loaded {}", path.display()));
            }
            Err(err @ crate::error::LoadError::InvalidPath { .. }) => {
                tracing::info!("Rejected drop of {}", path.display());
                notifier.notify(err.to_string());
            }
            Err(err) => {
                tracing::warn!("Failed to load {}: {err}", path.display());
                notifier.notify(format!("Error occurred: {err}"));
            }
        }
    }

    pub fn press_control(&mut self, id: ControlId, ratio: f32, notifier: &mut impl Notifier) {
        if let Some(request) = self.controller.press(id, ratio) {
            self.apply(request, notifier);
        }
    }

    pub fn drag_control(&mut self, id: ControlId, ratio: f32, notifier: &mut impl Notifier) {
        if let Some(request) = self.controller.drag(id, ratio) {
            self.apply(request, notifier);
        }
    }

    pub fn release_control(&mut self, id: ControlId, notifier: &mut impl Notifier) {
        if let Some(request) = self.controller.release(id) {
            self.apply(request, notifier);
        }
    }

    pub fn save(&mut self, notifier: &mut impl Notifier) {
        match self.session.save() {
            Ok(_) => notifier.notify("Image saved".to_string()),
            Err(err) => {
                tracing::warn!("Save failed: {err}");
                notifier.notify(format!("Error occurred: {err}"));
            }
        }
    }

    /// Resolution the resolution slider currently points at
    pub fn pending_resolution(&self) -> Option<Resolution> {
        let source = self.session.source()?;
        Some(self.target_for(source.resolution(), self.controller.resolution_percent()))
    }

    pub fn resolution_caption(&self) -> String {
        let resolution = self
            .pending_resolution()
            .unwrap_or(Resolution::new(0, 0));
        format!("Resolution: {resolution}")
    }

    pub fn quality_caption(&self) -> String {
        format!("Quality : {}%", self.controller.quality_percent())
    }

    fn target_for(&self, original: Resolution, percent: u32) -> Resolution {
        original.scaled(percent, 100).at_least_one()
    }

    fn apply(&mut self, request: DeriveRequest, notifier: &mut impl Notifier) {
        // Sliders can be dragged before anything is loaded; nothing to do then
        let Some(source) = self.session.source() else {
            return;
        };
        let target = request
            .resolution_percent
            .map(|percent| self.target_for(source.resolution(), percent));

        match self.session.rederive(request.quality, target) {
            Ok(_) => self.revision += 1,
            Err(err) => {
                tracing::warn!("Re-derive failed: {err}");
                notifier.notify(format!("Error occurred: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures;
    use crate::config::RederivePolicy;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Notifier for Recorder {
        fn notify(&mut self, message: String) {
            self.0.push(message);
        }
    }

    fn editor_with_image(dir: &Path, policy: RederivePolicy) -> (Editor, Recorder) {
        let config = AppConfig {
            rederive_policy: policy,
            ..AppConfig::default()
        };
        let mut editor = Editor::new(&config);
        let mut recorder = Recorder::default();
        let path = fixtures::write_jpeg(dir, "photo.jpg", 400, 300);
        editor.load(&path, &mut recorder);
        (editor, recorder)
    }

    #[test]
    fn test_load_notifies_and_bumps_revision() {
        let dir = tempfile::tempdir().unwrap();
        let (editor, recorder) = editor_with_image(dir.path(), RederivePolicy::OnRelease);

        assert_eq!(editor.revision(), 1);
        assert!(recorder.0[0].starts_with("Loaded "));
        assert_eq!(editor.resolution_caption(), "Resolution: 400 x 300");
        assert_eq!(editor.quality_caption(), "Quality : 100%");
    }

    #[test]
    fn test_release_rederives_final_value() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, mut recorder) = editor_with_image(dir.path(), RederivePolicy::OnRelease);

        editor.press_control(ControlId::Resolution, 1.0, &mut recorder);
        editor.controller_mut().drag(ControlId::Resolution, 0.2);
        assert_eq!(editor.revision(), 1);

        // Drive the slider to exactly 50%.
        editor.drag_control(ControlId::Resolution, 49.0 / 99.0, &mut recorder);
        assert_eq!(editor.controller().resolution_percent(), 50);
        editor.release_control(ControlId::Resolution, &mut recorder);

        assert_eq!(editor.revision(), 2);
        assert_eq!(
            editor.session().derived().unwrap().resolution,
            Resolution::new(200, 150)
        );
    }

    #[test]
    fn test_quality_release_keeps_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, mut recorder) = editor_with_image(dir.path(), RederivePolicy::OnRelease);

        editor.press_control(ControlId::Resolution, 49.0 / 99.0, &mut recorder);
        editor.release_control(ControlId::Resolution, &mut recorder);
        let full_quality = editor.session().derived().unwrap().byte_size;

        editor.press_control(ControlId::Quality, 49.0 / 99.0, &mut recorder);
        editor.release_control(ControlId::Quality, &mut recorder);

        let derived = editor.session().derived().unwrap();
        assert_eq!(derived.resolution, Resolution::new(200, 150));
        assert_eq!(derived.quality, 50);
        assert!(derived.byte_size < full_quality);
    }

    #[test]
    fn test_reload_resets_sliders() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, mut recorder) = editor_with_image(dir.path(), RederivePolicy::OnRelease);

        editor.press_control(ControlId::Resolution, 49.0 / 99.0, &mut recorder);
        editor.release_control(ControlId::Resolution, &mut recorder);
        editor.press_control(ControlId::Quality, 49.0 / 99.0, &mut recorder);
        editor.release_control(ControlId::Quality, &mut recorder);
        assert_eq!(editor.controller().resolution_percent(), 50);

        let second = fixtures::write_jpeg(dir.path(), "second.jpg", 120, 80);
        editor.load(&second, &mut recorder);

        assert_eq!(editor.controller().resolution_percent(), 100);
        assert_eq!(editor.controller().quality_percent(), 100);
        assert_eq!(editor.resolution_caption(), "Resolution: 120 x 80");
        assert_eq!(editor.session().derived().unwrap().quality, 100);
        assert!(recorder.0.last().unwrap().starts_with("Loaded "));
    }

    #[test]
    fn test_continuous_policy_rederives_while_dragging() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, mut recorder) = editor_with_image(dir.path(), RederivePolicy::Continuous);

        editor.press_control(ControlId::Quality, 0.5, &mut recorder);
        editor.drag_control(ControlId::Quality, 0.25, &mut recorder);
        assert_eq!(editor.revision(), 3);
        editor.release_control(ControlId::Quality, &mut recorder);
        assert_eq!(editor.revision(), 4);
        assert_eq!(editor.session().derived().unwrap().quality, 26);
    }

    #[test]
    fn test_minimum_resolution_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = Editor::new(&AppConfig::default());
        let mut recorder = Recorder::default();
        let path = fixtures::write_jpeg(dir.path(), "strip.jpg", 50, 2);
        editor.load(&path, &mut recorder);

        editor.press_control(ControlId::Resolution, 0.0, &mut recorder);
        editor.release_control(ControlId::Resolution, &mut recorder);

        assert_eq!(recorder.0.len(), 1);
        assert_eq!(
            editor.session().derived().unwrap().resolution,
            Resolution::new(1, 1)
        );
    }

    #[test]
    fn test_rejected_drop_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("readme.txt");
        std::fs::write(&readme, "text").unwrap();

        let mut editor = Editor::new(&AppConfig::default());
        let mut recorder = Recorder::default();
        editor.load(&readme, &mut recorder);

        assert_eq!(recorder.0, ["Invalid image: readme.txt. Only JPEGs are supported"]);
        assert!(editor.session().source().is_none());
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_save_without_image_reports_error() {
        let mut editor = Editor::new(&AppConfig::default());
        let mut recorder = Recorder::default();
        editor.save(&mut recorder);

        assert_eq!(recorder.0, ["Error occurred: No image loaded"]);
    }

    #[test]
    fn test_save_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, mut recorder) = editor_with_image(dir.path(), RederivePolicy::OnRelease);
        editor.save(&mut recorder);

        assert_eq!(recorder.0.last().unwrap(), "Image saved");
        assert!(dir.path().join("modified_photo.jpg").is_file());
    }

    #[test]
    fn test_slider_without_image_is_silent() {
        let mut editor = Editor::new(&AppConfig::default());
        let mut recorder = Recorder::default();
        editor.press_control(ControlId::Quality, 0.3, &mut recorder);
        editor.release_control(ControlId::Quality, &mut recorder);

        assert!(recorder.0.is_empty());
        assert_eq!(editor.resolution_caption(), "Resolution: 0 x 0");
    }
}
