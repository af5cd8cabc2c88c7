//! Read-only snapshots handed to renderers and controllers.

use cartpend_dynamics::JointPositions;
use cartpend_math::Vec2;
use cartpend_model::SimulationState;

/// Number of controller input features.
pub const FEATURE_COUNT: usize = 8;

/// Controller feature vector, ordered as [`FEATURE_LABELS`].
pub type Features = [f64; FEATURE_COUNT];

/// Names of the controller features, in order.
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "cart_x", "cart_v", "p0_x", "p0_y", "omega0", "p1_x", "p1_y", "omega1",
];

/// State plus projected joint positions at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub theta0: f64,
    pub omega0: f64,
    pub theta1: f64,
    pub omega1: f64,
    pub cart_x: f64,
    pub cart_v: f64,
    /// Inner joint, relative to the cart hinge.
    pub p0: Vec2,
    /// Outer joint, relative to the cart hinge.
    pub p1: Vec2,
}

impl Observation {
    pub fn new(state: &SimulationState, joints: &JointPositions) -> Self {
        Self {
            theta0: state.theta0,
            omega0: state.omega0,
            theta1: state.theta1,
            omega1: state.omega1,
            cart_x: state.cart_x,
            cart_v: state.cart_v,
            p0: joints.p0,
            p1: joints.p1,
        }
    }

    /// `(cart_x, cart_v, p0.x, p0.y, ω0, p1.x, p1.y, ω1)`
    pub fn features(&self) -> Features {
        [
            self.cart_x,
            self.cart_v,
            self.p0.x,
            self.p0.y,
            self.omega0,
            self.p1.x,
            self.p1.y,
            self.omega1,
        ]
    }

    /// Outer joint in track coordinates (cart offset applied).
    pub fn outer_on_track(&self) -> Vec2 {
        self.p1 + Vec2::new(self.cart_x, 0.0)
    }
}
