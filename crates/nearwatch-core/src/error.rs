//! Configuration error types.

use thiserror::Error;

use crate::Kind;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`SimConfig`](crate::SimConfig).
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    /// Spawn bounds have `min > max` on some axis.
    #[error("spawn bounds inverted on {axis} axis: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f32, max: f32 },

    /// A kind's highlight material equals its base material.
    #[error("{kind} highlight material equals its base material")]
    IndistinctPalette { kind: Kind },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
