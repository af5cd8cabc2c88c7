//! Configuration and state types for the cartpend simulator.
//!
//! `PhysicalConfig` is the immutable description of the cart and its two
//! links. `SimulationState` is the six numbers that change every tick.

pub mod config;
pub mod error;
pub mod state;

pub use config::{ConfigBuilder, PhysicalConfig};
pub use error::{ConfigError, Result};
pub use state::SimulationState;
