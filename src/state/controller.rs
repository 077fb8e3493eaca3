/// Slider, pan and zoom interaction state
///
/// Pure input bookkeeping: nothing here decodes or encodes. Slider commits
/// come back as `DeriveRequest`s for the editor to hand to the session.
use cgmath::{Vector2, Zero};

use crate::config::{AppConfig, RederivePolicy};

pub const MIN_ZOOM: f32 = 0.3;
pub const MAX_ZOOM: f32 = 5.0;
/// Zoom change per wheel notch
pub const ZOOM_STEP: f32 = 0.5;

const CONTROL_MIN: u32 = 1;
const CONTROL_MAX: u32 = 100;

/// Which slider an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Resolution,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    Dragging,
}

/// A slider: an integer value in `[min, max]` with a `[0, 1]` ratio view
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    min: u32,
    max: u32,
    value: u32,
    state: ControlState,
}

impl Control {
    /// Bounds are swapped if given backwards; `value` is clamped into them
    pub fn new(min: u32, max: u32, value: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
            state: ControlState::Idle,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.state == ControlState::Dragging
    }

    /// Position of the value along the track
    pub fn ratio(&self) -> f32 {
        if self.max == self.min {
            return 1.0;
        }
        (self.value - self.min) as f32 / (self.max - self.min) as f32
    }

    /// Returns whether the value changed
    pub fn set_value(&mut self, value: u32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Set from a track position. Out-of-range and NaN ratios are clamped.
    pub fn set_ratio(&mut self, ratio: f32) -> bool {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let offset = ((self.max - self.min) as f32 * ratio).round() as u32;
        self.set_value(self.min + offset)
    }

    /// Idle -> Dragging, jumping to the pressed position
    pub fn press(&mut self, ratio: f32) -> bool {
        self.state = ControlState::Dragging;
        self.set_ratio(ratio)
    }

    /// Follow the pointer; ignored unless dragging
    pub fn drag(&mut self, ratio: f32) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.set_ratio(ratio)
    }

    /// Dragging -> Idle. Returns true when there was a drag to commit.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = ControlState::Idle;
        was_dragging
    }
}

/// Ratio of `x` along a track starting at `left` with the given `width`
pub fn pointer_ratio(x: f32, left: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    ((x - left) / width).clamp(0.0, 1.0)
}

/// What the session should re-derive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveRequest {
    pub quality: u8,
    /// Resolution as a percentage of the source, `None` to keep the current one
    pub resolution_percent: Option<u32>,
}

/// Secondary-button drag of the preview
#[derive(Debug, Clone, PartialEq)]
pub struct Pan {
    panning: bool,
    offset: Vector2<f32>,
    reset_on_release: bool,
}

impl Pan {
    pub fn new(reset_on_release: bool) -> Self {
        Self {
            panning: false,
            offset: Vector2::zero(),
            reset_on_release,
        }
    }

    pub fn start(&mut self) {
        self.panning = true;
    }

    /// Accumulate a pointer delta while panning
    pub fn move_by(&mut self, delta: Vector2<f32>) {
        if self.panning {
            self.offset += delta;
        }
    }

    pub fn end(&mut self) {
        self.panning = false;
        if self.reset_on_release {
            self.offset = Vector2::zero();
        }
    }

    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    resolution: Control,
    quality: Control,
    pan: Pan,
    zoom: f32,
    policy: RederivePolicy,
}

impl Controller {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            resolution: Control::new(CONTROL_MIN, CONTROL_MAX, CONTROL_MAX),
            quality: Control::new(CONTROL_MIN, CONTROL_MAX, CONTROL_MAX),
            pan: Pan::new(config.reset_pan_on_release),
            zoom: 1.0,
            policy: config.rederive_policy,
        }
    }

    pub fn control(&self, id: ControlId) -> &Control {
        match id {
            ControlId::Resolution => &self.resolution,
            ControlId::Quality => &self.quality,
        }
    }

    fn control_mut(&mut self, id: ControlId) -> &mut Control {
        match id {
            ControlId::Resolution => &mut self.resolution,
            ControlId::Quality => &mut self.quality,
        }
    }

    /// Both sliders back to 100%, as after loading a fresh image
    pub fn reset_controls(&mut self) {
        for id in [ControlId::Resolution, ControlId::Quality] {
            let control = self.control_mut(id);
            control.release();
            control.set_ratio(1.0);
        }
    }

    pub fn press(&mut self, id: ControlId, ratio: f32) -> Option<DeriveRequest> {
        let changed = self.control_mut(id).press(ratio);
        self.continuous_request(id, changed)
    }

    pub fn drag(&mut self, id: ControlId, ratio: f32) -> Option<DeriveRequest> {
        let changed = self.control_mut(id).drag(ratio);
        self.continuous_request(id, changed)
    }

    /// Commit the final value of a drag, whatever the policy
    pub fn release(&mut self, id: ControlId) -> Option<DeriveRequest> {
        self.control_mut(id).release().then(|| self.request_for(id))
    }

    fn continuous_request(&self, id: ControlId, changed: bool) -> Option<DeriveRequest> {
        (changed && self.policy == RederivePolicy::Continuous).then(|| self.request_for(id))
    }

    /// The resolution slider resizes; the quality slider keeps the current size
    pub fn request_for(&self, id: ControlId) -> DeriveRequest {
        DeriveRequest {
            quality: self.quality_percent(),
            resolution_percent: match id {
                ControlId::Resolution => Some(self.resolution.value()),
                ControlId::Quality => None,
            },
        }
    }

    pub fn quality_percent(&self) -> u8 {
        u8::try_from(self.quality.value()).unwrap_or(100)
    }

    pub fn resolution_percent(&self) -> u32 {
        self.resolution.value()
    }

    /// Apply a vertical wheel delta (in notches)
    pub fn wheel(&mut self, delta: f32) {
        self.zoom = (self.zoom + ZOOM_STEP * delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> &Pan {
        &self.pan
    }

    pub fn pan_mut(&mut self) -> &mut Pan {
        &mut self.pan
    }
}
