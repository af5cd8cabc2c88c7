//! Equations of motion: state derivative of the cart-mounted double pendulum.

use cartpend_math::StateVec;
use cartpend_model::{PhysicalConfig, SimulationState};

/// Compute the time derivative of `state`.
///
/// Returns `[dθ0, dω0, dθ1, dω1, dx, dv]`. The system is autonomous, so no
/// time argument is needed.
///
/// The cart couples into the links through a reaction term `2·v²` built from
/// cart *velocity*, not from the cart's instantaneous acceleration. This is
/// the model, not an oversight, and is kept exactly. Externally commanded
/// accelerations never appear here; the only cart force is viscous decay.
///
/// Nothing is guarded. The shared denominator is
/// `l·(2·m0 + m1 − m1·cos(2θ0 − 2θ1))`, which stays at or above `2·m0·l`
/// for any valid configuration, but non-finite or overflowing inputs
/// produce non-finite output. Callers detect that and reset.
pub fn derive(state: &SimulationState, config: &PhysicalConfig) -> StateVec {
    derive_vector(&state.to_vector(), config)
}

/// [`derive`] on the packed layout used by the integrator.
pub fn derive_vector(s: &StateVec, config: &PhysicalConfig) -> StateVec {
    let (theta0, omega0, theta1, omega1, v) = (s[0], s[1], s[2], s[3], s[5]);
    let g = config.gravity();
    let (l0, l1) = (config.l0(), config.l1());
    let (m0, m1) = (config.m0(), config.m1());

    let horizontal_acc = 2.0 * v * v;
    let delta = theta0 - theta1;
    let (sin_d, cos_d) = delta.sin_cos();
    let mass_term = 2.0 * m0 + m1 - m1 * (2.0 * theta0 - 2.0 * theta1).cos();

    // Inner link
    let gravity_torque = -g * (2.0 * m0 + m1) * theta0.sin();
    let coupling = -m1 * g * (theta0 - 2.0 * theta1).sin();
    let velocity_coupling =
        -2.0 * sin_d * m1 * (omega1 * omega1 * l1 + omega0 * omega0 * l0 * cos_d);
    let cart_reaction = -m0 * horizontal_acc * theta0.cos();
    let domega0 =
        (gravity_torque + coupling + velocity_coupling + cart_reaction) / (l0 * mass_term);

    // Outer link
    let inner_swing = omega0 * omega0 * l0 * (m0 + m1);
    let gravity_term = g * (m0 + m1) * theta0.cos();
    let outer_swing = omega1 * omega1 * l1 * m1 * cos_d;
    let cart_reaction = m1 * horizontal_acc * theta1.cos();
    let domega1 = 2.0 * sin_d * (inner_swing + gravity_term + outer_swing + cart_reaction)
        / (l1 * mass_term);

    let dv = -v * config.horizontal_damping();

    StateVec::new(omega0, domega0, omega1, domega1, v, dv)
}
