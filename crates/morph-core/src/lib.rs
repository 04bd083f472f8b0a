pub mod animator;
pub mod backdrop;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod instances;
pub mod particles;
pub mod scene;
pub mod smoothing;
pub mod state;
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static INSTANCES_WGSL: &str = include_str!("../shaders/instances.wgsl");
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animator::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use instances::*;
pub use scene::*;
pub use smoothing::*;
pub use state::*;
