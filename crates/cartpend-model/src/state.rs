//! Simulation state — the six numbers that change every tick.

use cartpend_math::{StateVec, all_finite};

/// Mutable simulation state.
///
/// Angles are measured from the hanging-down vertical and are not wrapped.
/// `theta1` is absolute, not relative to `theta0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationState {
    /// Inner link angle (rad).
    pub theta0: f64,
    /// Inner link angular velocity (rad/s).
    pub omega0: f64,
    /// Outer link angle (rad).
    pub theta1: f64,
    /// Outer link angular velocity (rad/s).
    pub omega1: f64,
    /// Cart offset from track center (m).
    pub cart_x: f64,
    /// Cart velocity (m/s).
    pub cart_v: f64,
}

impl SimulationState {
    /// Pendulum hanging straight down, cart at rest at the center.
    pub fn at_rest() -> Self {
        Self::default()
    }

    /// Pack into `[θ0, ω0, θ1, ω1, cart_x, cart_v]`.
    pub fn to_vector(&self) -> StateVec {
        StateVec::new(
            self.theta0,
            self.omega0,
            self.theta1,
            self.omega1,
            self.cart_x,
            self.cart_v,
        )
    }

    /// Unpack from the layout used by [`to_vector`](Self::to_vector).
    pub fn from_vector(v: &StateVec) -> Self {
        Self {
            theta0: v[0],
            omega0: v[1],
            theta1: v[2],
            omega1: v[3],
            cart_x: v[4],
            cart_v: v[5],
        }
    }

    /// False once the simulation has diverged into NaN or infinity.
    pub fn is_finite(&self) -> bool {
        all_finite(&self.to_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_rest_is_all_zero() {
        let s = SimulationState::at_rest();
        assert_eq!(s.to_vector(), StateVec::zeros());
    }

    #[test]
    fn vector_layout() {
        let s = SimulationState {
            theta0: 1.0,
            omega0: 2.0,
            theta1: 3.0,
            omega1: 4.0,
            cart_x: 5.0,
            cart_v: 6.0,
        };
        let v = s.to_vector();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(SimulationState::from_vector(&v), s);
    }

    #[test]
    fn non_finite_detection() {
        let mut s = SimulationState::at_rest();
        assert!(s.is_finite());
        s.omega1 = f64::NAN;
        assert!(!s.is_finite());
    }
}
