//! Dynamics of a two-link point-mass pendulum hinged to a cart on a bounded track.
//!
//! Implements:
//! - Closed-form equations of motion
//! - Classical fixed-step 4th-order Runge-Kutta
//! - Track clamping and the explicit acceleration-command update
//! - Cartesian projection of the joints
//! - Mechanical energy of the links

pub mod boundary;
pub mod energy;
pub mod eom;
pub mod integrator;
pub mod kinematics;

pub use boundary::{apply_acceleration, clamp_to_track, gate_command};
pub use energy::{kinetic_energy, potential_energy, total_energy};
pub use eom::{derive, derive_vector};
pub use integrator::rk4_step;
pub use kinematics::{JointPositions, project};
