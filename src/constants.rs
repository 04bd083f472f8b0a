/// DOM hooks and web input tuning.
///
/// The page provides the canvas and the toggle button; everything else is
/// created by the renderer.
pub const CANVAS_ID: &str = "app-canvas";
pub const TOGGLE_BUTTON_ID: &str = "toggle-btn";
// Status line shown while WebGPU starts up, or when it cannot.
pub const STATUS_ID: &str = "status";

// Wheel deltas per zoom notch, by `WheelEvent.deltaMode`
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0;
pub const WHEEL_LINES_PER_NOTCH: f32 = 3.0;
pub const WHEEL_PAGES_PER_NOTCH: f32 = 1.0;

// Clamp for a single frame's dt, e.g. after the tab was in the background
pub const MAX_FRAME_DT_SEC: f32 = 0.25;
