//! Classical fixed-step 4th-order Runge-Kutta.

use cartpend_model::{PhysicalConfig, SimulationState};

use crate::eom::derive_vector;

/// Advance `state` by one tick of `config.dt()`.
///
/// Four derivative evaluations (start, two midpoints, end) combined with
/// weights (1, 2, 2, 1)/6. Pure and deterministic. Does not clamp the cart
/// to the track; see [`crate::clamp_to_track`].
pub fn rk4_step(state: &SimulationState, config: &PhysicalConfig) -> SimulationState {
    let dt = config.dt();
    let half = 0.5 * dt;
    let s = state.to_vector();

    let k1 = derive_vector(&s, config);
    let k2 = derive_vector(&(s + k1 * half), config);
    let k3 = derive_vector(&(s + k2 * half), config);
    let k4 = derive_vector(&(s + k3 * dt), config);

    let next = s + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
    SimulationState::from_vector(&next)
}
