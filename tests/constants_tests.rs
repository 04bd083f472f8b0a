// Host-side tests for web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_distinct_and_non_empty() {
    let ids = [CANVAS_ID, TOGGLE_BUTTON_ID, STATUS_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "ids are passed to getElementById without a selector prefix");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_scales_are_positive_and_ordered() {
    assert!(WHEEL_PAGES_PER_NOTCH > 0.0);
    assert!(WHEEL_LINES_PER_NOTCH >= WHEEL_PAGES_PER_NOTCH);
    assert!(WHEEL_PIXELS_PER_NOTCH > WHEEL_LINES_PER_NOTCH);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_dt_cap_allows_normal_frames() {
    // 30 fps frames must pass through untouched
    assert!(MAX_FRAME_DT_SEC > 1.0 / 30.0);
    assert!(MAX_FRAME_DT_SEC <= 1.0);
}
