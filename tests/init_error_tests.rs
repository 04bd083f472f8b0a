// The status line shows these messages verbatim, so each failure has to say
// what actually went wrong.

#![allow(dead_code)]
mod error {
    include!("../src/error.rs");
}

use error::InitError;
use morph_core::{ConfigError, MorphError};

#[test]
fn config_failures_name_the_field_not_webgpu() {
    let err = InitError::from(MorphError::from(ConfigError::ZeroCount {
        field: "counts.foliage",
    }));
    let msg = err.to_string();
    assert!(msg.contains("counts.foliage"), "{msg}");
    assert!(!msg.contains("WebGPU"), "{msg}");
}

#[test]
fn gpu_failures_mention_webgpu_and_the_cause() {
    let msg = InitError::Gpu("no suitable adapter".into()).to_string();
    assert!(msg.contains("WebGPU"));
    assert!(msg.contains("no suitable adapter"));
}

#[test]
fn missing_elements_are_named() {
    let msg = InitError::MissingElement("app-canvas").to_string();
    assert_eq!(msg, "page is missing #app-canvas");
    assert!(!InitError::Browser("no window".into()).to_string().contains("WebGPU"));
}
