//! Track limits and the explicit acceleration-command update.
//!
//! Both functions here touch only the cart; angles pass through unchanged.

use cartpend_model::{PhysicalConfig, SimulationState};

/// Zero a commanded acceleration that pushes the cart further into a wall
/// it is already resting against. Inward commands pass through.
#[inline]
pub fn gate_command(command: f64, state: &SimulationState, config: &PhysicalConfig) -> f64 {
    let edge = config.edge();
    let pushing_out =
        (command < 0.0 && state.cart_x <= -edge) || (command > 0.0 && state.cart_x >= edge);
    if pushing_out { 0.0 } else { command }
}

/// Apply one commanded horizontal acceleration (m/s²) to the cart.
///
/// An immediate explicit update, independent of the integrator tick:
/// the command is gated at the walls, reduced by the current drag
/// `horizontal_damping · cart_v`, then applied for exactly one `dt`
/// regardless of how much real time has passed. Every arriving command
/// is applied this way, so several commands within one tick stack.
pub fn apply_acceleration(
    command: f64,
    state: &SimulationState,
    config: &PhysicalConfig,
) -> SimulationState {
    let mut a = gate_command(command, state, config);
    a -= config.horizontal_damping() * state.cart_v;
    SimulationState {
        cart_v: state.cart_v + a * config.dt(),
        ..*state
    }
}

/// Clamp the cart to `[-edge, edge]`, stopping it if the clamp engages.
pub fn clamp_to_track(state: &SimulationState, config: &PhysicalConfig) -> SimulationState {
    let edge = config.edge();
    if state.cart_x < -edge {
        SimulationState {
            cart_x: -edge,
            cart_v: 0.0,
            ..*state
        }
    } else if state.cart_x > edge {
        SimulationState {
            cart_x: edge,
            cart_v: 0.0,
            ..*state
        }
    } else {
        *state
    }
}
