//! Error types for cartpend-control.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy has no layers")]
    Empty,

    #[error("layer {layer}: bias has {bias} entries for {rows} weight rows")]
    BiasMismatch {
        layer: usize,
        rows: usize,
        bias: usize,
    },

    #[error("layer {layer}: expects {expected} inputs, previous layer yields {found}")]
    LayerMismatch {
        layer: usize,
        expected: usize,
        found: usize,
    },

    #[error("first layer must take {expected} inputs, got {found}")]
    InputSize { expected: usize, found: usize },

    #[error("last layer must yield 1 output, got {0}")]
    OutputSize(usize),

    #[error("layer {layer}: weight rows have uneven lengths")]
    Ragged { layer: usize },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
