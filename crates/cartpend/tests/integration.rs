//! Integration tests for the cartpend simulator.

use approx::assert_relative_eq;
use cartpend::{
    Command, ConfigBuilder, PhysicalConfig, Session, SimulationState, Simulator, StateVec,
    apply_acceleration, derive, observe, reset, step, total_energy,
};
use proptest::prelude::*;

fn frictionless() -> PhysicalConfig {
    ConfigBuilder::new().horizontal_damping(0.0).build().unwrap()
}

#[test]
fn rest_is_an_exact_equilibrium() {
    let config = PhysicalConfig::default();
    let rest = reset();
    assert_eq!(derive(&rest, &config), StateVec::zeros());

    let mut s = rest;
    for _ in 0..1000 {
        s = step(&s, &config);
    }
    assert_eq!(s, rest);
}

#[test]
fn inner_link_is_pulled_back_toward_vertical() {
    let config = PhysicalConfig::default();
    let s = SimulationState {
        theta0: 0.1,
        ..reset()
    };
    assert!(derive(&s, &config)[1] < 0.0);
}

#[test]
fn step_is_bit_deterministic() {
    let config = PhysicalConfig::default();
    let s = SimulationState {
        theta0: 2.0,
        omega0: 1.0,
        theta1: -1.0,
        omega1: 4.0,
        cart_x: 0.9,
        cart_v: 1.5,
    };
    let a = step(&s, &config);
    let b = step(&s, &config);
    for (x, y) in a.to_vector().iter().zip(b.to_vector().iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn wall_ignores_outward_and_honors_inward() {
    let config = PhysicalConfig::default();
    let s = SimulationState {
        cart_x: config.edge(),
        cart_v: 0.0,
        ..reset()
    };
    assert_eq!(apply_acceleration(10.0, &s, &config).cart_v, 0.0);

    let inward = apply_acceleration(-10.0, &s, &config);
    assert_relative_eq!(inward.cart_v, -10.0 * config.dt());
}

#[test]
fn energy_drift_is_bounded_without_friction() {
    let config = frictionless();
    let mut s = SimulationState {
        theta0: 0.1,
        theta1: 0.1,
        ..reset()
    };
    let rest_energy = total_energy(&reset(), &config);
    let e0 = total_energy(&s, &config);
    let swing = e0 - rest_energy;
    assert!(swing > 0.0);

    let mut max_drift: f64 = 0.0;
    for _ in 0..1000 {
        s = step(&s, &config);
        let drift = ((total_energy(&s, &config) - e0) / swing).abs();
        max_drift = max_drift.max(drift);
    }

    assert!(
        max_drift < 1e-3,
        "relative energy drift {max_drift:.2e} exceeds 1e-3"
    );
    assert_eq!(s.cart_x, 0.0);
}

#[test]
fn friction_bleeds_cart_velocity() {
    let config = PhysicalConfig::default();
    let s = apply_acceleration(30.0, &reset(), &config);
    let later = Simulator::new().simulate(&config, &s, 60);
    assert!(later.cart_v.abs() < s.cart_v.abs());
}

#[test]
fn simulate_matches_repeated_step() {
    let config = PhysicalConfig::default();
    let s = SimulationState {
        theta0: 0.5,
        cart_v: 0.4,
        ..reset()
    };
    let mut manual = s;
    for _ in 0..25 {
        manual = step(&manual, &config);
    }
    assert_eq!(Simulator::new().simulate(&config, &s, 25), manual);
}

#[test]
fn pushed_cart_hits_the_wall_and_stops() {
    let config = PhysicalConfig::default();
    let mut session = Session::new(config);
    for _ in 0..200 {
        session.push(Command::Accelerate(40.0));
        session.tick(&mut []);
        let s = session.state();
        assert!(s.cart_x <= config.edge());
    }
    assert_eq!(session.state().cart_x, config.edge());
}

#[test]
fn observe_reports_state_and_joints() {
    let config = PhysicalConfig::default();
    let s = SimulationState {
        theta0: 0.2,
        omega0: 0.1,
        theta1: 0.3,
        omega1: -0.1,
        cart_x: 0.05,
        cart_v: 0.0,
    };
    let obs = observe(&s, &config);
    assert_eq!(obs.theta0, 0.2);
    assert_eq!(obs.omega1, -0.1);
    assert_relative_eq!(obs.p0.x, 0.5 * 0.2_f64.sin());
    assert_relative_eq!(obs.p1.y, -0.5 * 0.2_f64.cos() - 0.5 * 0.3_f64.cos());
}

fn arb_command() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-200.0..200.0_f64).prop_map(Some)]
}

proptest! {
    #[test]
    fn cart_never_leaves_the_track(
        commands in prop::collection::vec(arb_command(), 1..300),
        theta0 in -3.0..3.0_f64,
        theta1 in -3.0..3.0_f64,
    ) {
        let config = PhysicalConfig::default();
        let mut s = SimulationState { theta0, theta1, ..reset() };
        for command in commands {
            if let Some(a) = command {
                s = apply_acceleration(a, &s, &config);
            }
            s = step(&s, &config);
            prop_assert!(s.cart_x >= -config.edge() && s.cart_x <= config.edge(),
                "cart_x = {}", s.cart_x);
        }
    }
}
