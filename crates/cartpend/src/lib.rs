//! cartpend — double pendulum on a cart, stepped at a fixed tick rate.
//!
//! This is the umbrella crate that provides the `Simulator`, the `Session`
//! driving loop, and re-exports core types from sub-crates.

pub mod command;
pub mod observation;
pub mod session;

pub use cartpend_dynamics::{self, JointPositions, derive, project, total_energy};
pub use cartpend_math::{self, StateVec, Vec2};
pub use cartpend_model::{self, ConfigBuilder, ConfigError, PhysicalConfig, SimulationState};

pub use command::{Command, CommandQueue};
pub use observation::{FEATURE_COUNT, FEATURE_LABELS, Features, Observation};
pub use session::{Controller, Observer, Session, TickOutcome};

use cartpend_dynamics::{clamp_to_track, rk4_step};

/// Pluggable solver trait.
///
/// Implementations define how to advance the state by one tick. The
/// result must already satisfy the track limits.
pub trait Solver {
    /// Advance `state` by `config.dt()` and return the new state.
    fn step(&self, config: &PhysicalConfig, state: &SimulationState) -> SimulationState;
}

/// Classical RK4 followed by the track clamp.
pub struct Rk4Solver;

impl Solver for Rk4Solver {
    fn step(&self, config: &PhysicalConfig, state: &SimulationState) -> SimulationState {
        clamp_to_track(&rk4_step(state, config), config)
    }
}

/// Main simulation driver.
pub struct Simulator {
    solver: Box<dyn Solver>,
}

impl Simulator {
    /// Create a simulator with the RK4 solver.
    pub fn new() -> Self {
        Self {
            solver: Box::new(Rk4Solver),
        }
    }

    /// Create a simulator with a custom solver.
    pub fn with_solver(solver: Box<dyn Solver>) -> Self {
        Self { solver }
    }

    /// Advance by one tick.
    pub fn step(&self, config: &PhysicalConfig, state: &SimulationState) -> SimulationState {
        self.solver.step(config, state)
    }

    /// Run `n` ticks with no commands.
    pub fn simulate(
        &self,
        config: &PhysicalConfig,
        state: &SimulationState,
        n: usize,
    ) -> SimulationState {
        (0..n).fold(*state, |s, _| self.step(config, &s))
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// The default at-rest state: links hanging, cart centered and still.
pub fn reset() -> SimulationState {
    SimulationState::at_rest()
}

/// One fixed-tick advance (RK4 + track clamp).
pub fn step(state: &SimulationState, config: &PhysicalConfig) -> SimulationState {
    Rk4Solver.step(config, state)
}

/// Apply one commanded cart acceleration immediately.
pub fn apply_acceleration(
    command: f64,
    state: &SimulationState,
    config: &PhysicalConfig,
) -> SimulationState {
    cartpend_dynamics::apply_acceleration(command, state, config)
}

/// Read-only snapshot of the state and its projected joints.
pub fn observe(state: &SimulationState, config: &PhysicalConfig) -> Observation {
    Observation::new(state, &project(state, config))
}
