/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The loaded image and its working rendition (session.rs)
/// - Slider, pan and zoom interaction (controller.rs)
/// - Error boundary and notifications (editor.rs)

pub mod controller;
pub mod data;
pub mod editor;
pub mod session;
