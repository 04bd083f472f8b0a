// Pure input helpers, kept free of web-sys so host-side tests can include them.

/// Tracks a primary-button drag and turns pointer moves into orbit deltas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragTracker {
    last: Option<(f32, f32)>,
}

impl DragTracker {
    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
    }

    /// Pixel delta since the previous event while a drag is active.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (lx, ly) = self.last?;
        self.last = Some((x, y));
        Some((x - lx, y - ly))
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

/// Convert a wheel event to zoom notches; scrolling up (negative delta)
/// zooms in.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let per_notch = match delta_mode {
        0 => crate::constants::WHEEL_PIXELS_PER_NOTCH,
        1 => crate::constants::WHEEL_LINES_PER_NOTCH,
        _ => crate::constants::WHEEL_PAGES_PER_NOTCH,
    };
    -(delta_y as f32) / per_notch
}

#[inline]
pub fn is_toggle_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar")
}

/// Clamp a frame delta: negative clock jumps become 0, long stalls are capped.
#[inline]
pub fn frame_dt(seconds: f32) -> f32 {
    if seconds.is_finite() {
        seconds.clamp(0.0, crate::constants::MAX_FRAME_DT_SEC)
    } else {
        0.0
    }
}
