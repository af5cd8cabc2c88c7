//! Math primitives for the cartpend simulator.
//!
//! Everything here is a plain value: vectors are `Copy`, arithmetic returns
//! new values, and nothing is mutated in place.

use nalgebra as na;

/// 2D vector alias (x to the right, y up).
pub type Vec2 = na::Vector2<f64>;

/// Dynamic vector.
pub type DVec = na::DVector<f64>;

/// Dynamic matrix.
pub type DMat = na::DMatrix<f64>;

/// Packed simulation state: `[θ0, ω0, θ1, ω1, cart_x, cart_v]`.
pub type StateVec = na::Vector6<f64>;

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Default fixed tick length (s).
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Unit vector pointing at `angle` radians, counter-clockwise from +x.
#[inline]
pub fn from_angle(angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c, s)
}

/// Offset of a link end from its hinge.
///
/// `theta` is measured from the hanging-down vertical, so `theta = 0`
/// points straight down and positive angles swing toward +x.
#[inline]
pub fn link_offset(length: f64, theta: f64) -> Vec2 {
    let (s, c) = theta.sin_cos();
    Vec2::new(length * s, -length * c)
}

/// True when every component is finite (neither NaN nor infinite).
#[inline]
pub fn all_finite(v: &StateVec) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn from_angle_cardinal_directions() {
        assert_abs_diff_eq!(from_angle(0.0), Vec2::new(1.0, 0.0), epsilon = 1e-15);
        assert_abs_diff_eq!(from_angle(FRAC_PI_2), Vec2::new(0.0, 1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(from_angle(PI), Vec2::new(-1.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn link_offset_hangs_down_at_zero() {
        let p = link_offset(0.5, 0.0);
        assert_eq!(p, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn link_offset_matches_rotated_from_angle() {
        // Hanging convention is from_angle rotated by -π/2.
        let theta = 0.7;
        let a = link_offset(2.0, theta);
        let b = from_angle(theta - FRAC_PI_2) * 2.0;
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn vector_ops_do_not_alias() {
        let a = Vec2::new(1.0, 2.0);
        let b = a + Vec2::new(0.5, 0.5);
        let c = b * 2.0;
        assert_eq!(a, Vec2::new(1.0, 2.0));
        assert_eq!(b, Vec2::new(1.5, 2.5));
        assert_eq!(c, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn all_finite_detects_nan_and_inf() {
        let mut v = StateVec::zeros();
        assert!(all_finite(&v));
        v[3] = f64::NAN;
        assert!(!all_finite(&v));
        v[3] = f64::INFINITY;
        assert!(!all_finite(&v));
    }

    proptest! {
        #[test]
        fn link_offset_has_link_length(len in 0.01..10.0_f64, theta in -20.0..20.0_f64) {
            let p = link_offset(len, theta);
            prop_assert!((p.norm() - len).abs() < 1e-9 * len.max(1.0));
        }

        #[test]
        fn from_angle_is_unit(angle in -100.0..100.0_f64) {
            prop_assert!((from_angle(angle).norm() - 1.0).abs() < 1e-12);
        }
    }
}
