//! Neural controller for the cartpend simulator.
//!
//! Inference only: a stack of dense tanh layers mapping the 8 observation
//! features to one command in `[-1, 1]`. Weights come from JSON or a seeded
//! random draw; how they were trained is not this crate's concern.

pub mod error;
pub mod policy;

pub use error::{PolicyError, Result};
pub use policy::{DenseLayer, FeedForwardPolicy};
