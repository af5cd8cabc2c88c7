//! Joint positions from link angles.

use cartpend_math::{Vec2, link_offset};
use cartpend_model::{PhysicalConfig, SimulationState};

/// Cartesian positions of the two link ends, relative to the cart hinge.
///
/// Derived on demand; never stored alongside the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPositions {
    /// End of the inner link.
    pub p0: Vec2,
    /// End of the outer link.
    pub p1: Vec2,
}

impl JointPositions {
    /// Shift both joints by the cart offset to get track coordinates.
    pub fn on_track(&self, cart_x: f64) -> Self {
        let offset = Vec2::new(cart_x, 0.0);
        Self {
            p0: self.p0 + offset,
            p1: self.p1 + offset,
        }
    }
}

/// Project the link angles onto the plane.
///
/// `p0 = (l0·sinθ0, −l0·cosθ0)`, `p1 = p0 + (l1·sinθ1, −l1·cosθ1)`.
pub fn project(state: &SimulationState, config: &PhysicalConfig) -> JointPositions {
    let p0 = link_offset(config.l0(), state.theta0);
    let p1 = p0 + link_offset(config.l1(), state.theta1);
    JointPositions { p0, p1 }
}
