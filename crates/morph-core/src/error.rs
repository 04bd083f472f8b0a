use thiserror::Error;

/// A configuration value that would produce empty or degenerate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be at least 1, got 0")]
    ZeroCount { field: &'static str },
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite number of at least 0, got {value}")]
    Negative { field: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum MorphError {
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),
}
