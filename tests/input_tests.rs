// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::*;
use input::*;

#[test]
fn drag_reports_nothing_until_pressed() {
    let mut drag = DragTracker::default();
    assert!(!drag.is_active());
    assert_eq!(drag.move_to(10.0, 10.0), None);
}

#[test]
fn drag_reports_deltas_between_moves() {
    let mut drag = DragTracker::default();
    drag.press(100.0, 50.0);
    assert!(drag.is_active());
    assert_eq!(drag.move_to(110.0, 45.0), Some((10.0, -5.0)));
    assert_eq!(drag.move_to(110.0, 60.0), Some((0.0, 15.0)));
}

#[test]
fn drag_stops_after_release() {
    let mut drag = DragTracker::default();
    drag.press(0.0, 0.0);
    drag.release();
    assert!(!drag.is_active());
    assert_eq!(drag.move_to(5.0, 5.0), None);
}

#[test]
fn wheel_up_zooms_in() {
    assert!(wheel_notches(-100.0, 0) > 0.0);
    assert!(wheel_notches(100.0, 0) < 0.0);
    assert_eq!(wheel_notches(0.0, 0), 0.0);
}

#[test]
fn wheel_modes_normalize_to_notches() {
    assert!((wheel_notches(-WHEEL_PIXELS_PER_NOTCH as f64, 0) - 1.0).abs() < 1e-6);
    assert!((wheel_notches(-WHEEL_LINES_PER_NOTCH as f64, 1) - 1.0).abs() < 1e-6);
    assert!((wheel_notches(-WHEEL_PAGES_PER_NOTCH as f64, 2) - 1.0).abs() < 1e-6);
}

#[test]
fn only_space_toggles() {
    assert!(is_toggle_key(" "));
    assert!(is_toggle_key("Spacebar"));
    for key in ["Enter", "a", "Escape", "ArrowUp", ""] {
        assert!(!is_toggle_key(key), "{key:?} should not toggle");
    }
}

#[test]
fn frame_dt_is_clamped() {
    assert_eq!(frame_dt(-0.5), 0.0);
    assert_eq!(frame_dt(f32::NAN), 0.0);
    assert!((frame_dt(1.0 / 60.0) - 1.0 / 60.0).abs() < 1e-9);
    assert_eq!(frame_dt(5.0), MAX_FRAME_DT_SEC);
}
