use morph_core::MorphError;
use thiserror::Error;

/// Why the page failed to start. The message goes straight into the status line.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("page is missing #{0}")]
    MissingElement(&'static str),
    #[error("browser setup failed: {0}")]
    Browser(String),
    #[error(transparent)]
    Scene(#[from] MorphError),
    #[error("WebGPU is not available in this browser ({0})")]
    Gpu(String),
}
