//! Mechanical energy of the two links.
//!
//! The cart is ignored: only the point masses contribute, with velocities
//! taken relative to the hinge and potential measured from hinge height.

use cartpend_math::Vec2;
use cartpend_model::{PhysicalConfig, SimulationState};

use crate::project;

/// Kinetic energy: ½·m0·|v0|² + ½·m1·|v1|².
pub fn kinetic_energy(state: &SimulationState, config: &PhysicalConfig) -> f64 {
    let v0 = tangent(config.l0(), state.theta0, state.omega0);
    let v1 = v0 + tangent(config.l1(), state.theta1, state.omega1);
    0.5 * config.m0() * v0.norm_squared() + 0.5 * config.m1() * v1.norm_squared()
}

/// Gravitational potential energy: g·(m0·y0 + m1·y1).
pub fn potential_energy(state: &SimulationState, config: &PhysicalConfig) -> f64 {
    let j = project(state, config);
    config.gravity() * (config.m0() * j.p0.y + config.m1() * j.p1.y)
}

/// Total mechanical energy (kinetic + potential).
pub fn total_energy(state: &SimulationState, config: &PhysicalConfig) -> f64 {
    kinetic_energy(state, config) + potential_energy(state, config)
}

// d/dt of (l·sinθ, −l·cosθ)
fn tangent(length: f64, theta: f64, omega: f64) -> Vec2 {
    let (s, c) = theta.sin_cos();
    Vec2::new(length * c, length * s) * omega
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rest_energy_is_pure_potential() {
        let config = PhysicalConfig::default();
        let s = SimulationState::at_rest();
        assert_eq!(kinetic_energy(&s, &config), 0.0);
        // −g·(m0·l0 + m1·(l0 + l1)) = −9.81·(0.05 + 0.1)
        assert_relative_eq!(potential_energy(&s, &config), -9.81 * 0.15, epsilon = 1e-12);
    }

    #[test]
    fn rigid_rotation_kinetic_energy() {
        // Both links aligned and spinning together: a rigid two-mass rod.
        let config = PhysicalConfig::default();
        let s = SimulationState {
            theta0: 0.4,
            omega0: 2.0,
            theta1: 0.4,
            omega1: 2.0,
            ..SimulationState::at_rest()
        };
        let inertia = 0.1 * 0.5_f64.powi(2) + 0.1 * 1.0_f64.powi(2);
        assert_relative_eq!(
            kinetic_energy(&s, &config),
            0.5 * inertia * 4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn cart_motion_does_not_count() {
        let config = PhysicalConfig::default();
        let s = SimulationState {
            theta0: 0.2,
            cart_x: 0.5,
            cart_v: 3.0,
            ..SimulationState::at_rest()
        };
        let still = SimulationState {
            cart_x: 0.0,
            cart_v: 0.0,
            ..s
        };
        assert_eq!(total_energy(&s, &config), total_energy(&still, &config));
    }
}
