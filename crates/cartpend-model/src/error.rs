//! Error types for cartpend-model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("link length {name} must be positive, got {value}")]
    NonPositiveLength { name: &'static str, value: f64 },

    #[error("mass {name} must be positive, got {value}")]
    NonPositiveMass { name: &'static str, value: f64 },

    #[error("timestep must be positive, got {0}")]
    NonPositiveTimestep(f64),

    #[error("track half-width must be positive, got {0}")]
    NonPositiveEdge(f64),

    #[error("horizontal damping must be non-negative, got {0}")]
    NegativeDamping(f64),

    #[error("gravity must be finite, got {0}")]
    NonFiniteGravity(f64),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
