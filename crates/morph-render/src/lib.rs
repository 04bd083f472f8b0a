//! GPU renderer for the tree morph scene, shared by the native and web hosts.

pub mod render;

pub use render::GpuState;
