// Build-time tuning constants shared by the native and web front-ends.

use glam::Vec3;

// Element counts
pub const FOLIAGE_COUNT: usize = 12_000;
pub const ORNAMENT_COUNT: usize = 280;
pub const LIGHT_COUNT: usize = 300;
pub const MASCOT_COUNT: usize = 24;

// Tree cone and scatter cloud (world units)
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS_BASE: f32 = 4.5;
pub const SCATTER_RADIUS: f32 = 18.0;

// Fraction of the tree height that sits below the cone's local origin
pub const CONE_BASE_SHIFT: f32 = 0.2;

// Smoothing rates (per second) for each visual group
pub const FOLIAGE_RATE: f32 = 2.5;
pub const LIGHTS_RATE: f32 = 3.0;
pub const ORNAMENTS_RATE: f32 = 2.0;
pub const MASCOTS_RATE: f32 = 2.0;
pub const STAR_RATE: f32 = 2.5;

// Placement tweaks per element kind
pub const ORNAMENT_HEIGHT_SCALE: f32 = 0.9;
pub const ORNAMENT_SHELL_THICKNESS: f32 = 0.5;
pub const ORNAMENT_SCATTER_SPAN: f32 = 2.0; // cube side as a multiple of SCATTER_RADIUS
pub const ORNAMENT_BOX_THRESHOLD: f32 = 0.6; // u > threshold => box
pub const LIGHT_HEIGHT_SCALE: f32 = 0.95;
pub const LIGHT_RECESS: f32 = 0.9;
pub const LIGHT_SCATTER_SPAN: f32 = 1.5;
pub const MASCOT_HEIGHT_SCALE: f32 = 0.8;
pub const MASCOT_STICK_OUT: f32 = 0.8;
pub const MASCOT_SCATTER_SPAN: f32 = 1.8;
pub const STAR_SCATTER_SPAN: f32 = 1.0;
pub const STAR_HEIGHT_FACTOR: f32 = 0.82;
pub const STAR_LIFT: f32 = 1.0;

// Smallest scale written for a light so the instance matrix never degenerates
pub const MIN_LIGHT_SCALE: f32 = 0.001;

// Palette (sRGB hex, converted to linear at load)
pub const EMERALD_DARK: u32 = 0x002816;
pub const EMERALD_LIGHT: u32 = 0x0b6e40;
pub const GOLD: u32 = 0xffd700;
pub const GOLD_HOT: u32 = 0xfff6b5;
pub const RED_LUXURY: u32 = 0x8a1c1c;
pub const BACKGROUND: u32 = 0x000502;
pub const MASCOT_WHITE: u32 = 0xffffff;
pub const FOX_PINK: u32 = 0xff9aa2;
pub const FOX_BODY: u32 = 0xffb7b2;

// Foliage shader colors are used as-is (already linear)
pub const FOLIAGE_BASE_COLOR: Vec3 = Vec3::new(0.02, 0.2, 0.1);
pub const FOLIAGE_HIGHLIGHT_COLOR: Vec3 = Vec3::new(0.8, 0.7, 0.2);

// Device pixel ratio is clamped to this range
pub const MIN_PIXEL_RATIO: f32 = 1.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Everything that morphs is drawn relative to this offset
pub const SCENE_OFFSET: Vec3 = Vec3::new(0.0, -4.0, 0.0);

// Backdrop layers, drawn in world space without the scene offset
pub const STAR_FIELD_COUNT: usize = 5000;
pub const STAR_FIELD_RADIUS: f32 = 100.0;
pub const STAR_FIELD_DEPTH: f32 = 50.0;
pub const STAR_FIELD_FACTOR: f32 = 4.0;
pub const STAR_FIELD_SATURATION: f32 = 0.0;
pub const STAR_FIELD_LIGHTNESS: f32 = 0.9;
pub const STAR_FIELD_SPEED: f32 = 1.0;
pub const SPARKLE_COUNT: usize = 200;
pub const SPARKLE_SCALE: f32 = 20.0;
pub const SPARKLE_SIZE: f32 = 2.0;
pub const SPARKLE_SPEED: f32 = 0.4;
pub const SPARKLE_OPACITY: f32 = 0.5;
pub const SPARKLE_NOISE: f32 = 1.0;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.0, 18.0);
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
// the star shell is projected at twice its radius
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_MIN_DISTANCE: f32 = 8.0;
pub const CAMERA_MAX_DISTANCE: f32 = 25.0;
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI / 1.4;
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.5; // orbit-controls units: 30s per turn at 1.0
pub const CAMERA_DRAG_RADIANS_PER_PX: f32 = 0.005;
pub const CAMERA_ZOOM_PER_NOTCH: f32 = 0.95;

// Lighting for instanced meshes
pub const AMBIENT_COLOR: u32 = 0x001a0f;
pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
pub const KEY_LIGHT_COLOR: u32 = 0xfff0d6;
pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-10.0, -5.0, -10.0);
pub const FILL_LIGHT_COLOR: u32 = 0x0b6e40;
pub const FILL_LIGHT_INTENSITY: f32 = 1.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_THRESHOLD: f32 = 1.4;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 1.1;
pub const GRAIN_OPACITY: f32 = 0.02;

/// Convert a packed `0xRRGGBB` sRGB color to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Decode one sRGB channel in `[0, 1]`.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
