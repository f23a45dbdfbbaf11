use std::f64::consts::TAU;

use approx::assert_relative_eq;

use migsim::simulation::constants::C;
use migsim::simulation::initial::PlanetElements;
use migsim::simulation::orbit::{
    cartesian_from_elements, mean_from_true, orbit_from_cartesian, true_from_mean, wrap_angle,
};
use migsim::{AccelSet3, Body3, ForceSpec, GrPotential, NBodyEngine, NVec3, NewtonianGravity3, PhysicsEngine, System3};

/// Build a simple 2-body System3 separated along x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System3 {
    let b1 = Body3 {
        x: [-dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        m: m1,
        radius: 0.0,
    };
    let b2 = Body3 {
        x: [dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        m: m2,
        radius: 0.0,
    };
    System3 {
        bodies: vec![b1, b2],
        t: 0.0,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set() -> AccelSet3 {
    AccelSet3::new().with(NewtonianGravity3 { g: 1.0 })
}

/// Star of unit mass with one light planet at period 2π (a = 1)
fn one_planet_engine(e: f64, dt: f64) -> NBodyEngine {
    let mut engine = NBodyEngine::new(dt);
    engine.add_star(1.0, 0.0).unwrap();
    engine
        .add_planet(
            1.0e-6,
            0.0,
            &PlanetElements {
                period: TAU,
                e,
                inc: 0.0,
                node: 0.0,
                pomega: 0.3,
                l: 1.1,
            },
        )
        .unwrap();
    engine
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set();

    let mut acc = vec![NVec3::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set();

    let mut acc = vec![NVec3::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set();

    let mut acc_r = vec![NVec3::zeros(); 2];
    let mut acc_2r = vec![NVec3::zeros(); 2];

    forces.accumulate_accels(sys_r.t, &sys_r, &mut acc_r);
    forces.accumulate_accels(sys_2r.t, &sys_2r, &mut acc_2r);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();
    assert_relative_eq!(ratio, 4.0, epsilon = 1e-12);
}

// ==================================================================================
// GR potential tests
// ==================================================================================

#[test]
fn gr_is_attractive_and_inverse_cube() {
    let gr = AccelSet3::new().with(GrPotential { g: 1.0, c: C });

    let near = two_body_system(1.0, 1.0, 1e-6);
    let far = two_body_system(2.0, 1.0, 1e-6);

    let mut acc_near = vec![NVec3::zeros(); 2];
    let mut acc_far = vec![NVec3::zeros(); 2];
    gr.accumulate_accels(0.0, &near, &mut acc_near);
    gr.accumulate_accels(0.0, &far, &mut acc_far);

    // planet (body 1) sits at +x, pulled toward -x
    assert!(acc_near[1].x < 0.0);
    assert_relative_eq!(acc_near[1].norm() / acc_far[1].norm(), 8.0, max_relative = 1e-12);

    // reaction on the star conserves momentum
    let net = acc_near[0] * near.bodies[0].m + acc_near[1] * near.bodies[1].m;
    assert!(net.norm() < 1e-20);
}

// ==================================================================================
// Orbit conversion tests
// ==================================================================================

#[test]
fn elements_survive_cartesian_round_trip() {
    let mu = 1.0 + 3e-6;
    let (a, e, inc, node, omega, f) = (1.3, 0.2, 0.3, 1.0, 2.0, 0.5);

    let (x, v) = cartesian_from_elements(mu, a, e, inc, node, omega, f);
    let o = orbit_from_cartesian(mu, x, v);

    assert_relative_eq!(o.a, a, max_relative = 1e-12);
    assert_relative_eq!(o.e, e, epsilon = 1e-12);
    assert_relative_eq!(o.inc, inc, epsilon = 1e-12);
    assert_relative_eq!(o.node, node, epsilon = 1e-10);
    assert_relative_eq!(o.omega, omega, epsilon = 1e-10);
    assert_relative_eq!(o.f, f, epsilon = 1e-10);
    assert_relative_eq!(o.pomega, wrap_angle(node + omega), epsilon = 1e-10);
}

#[test]
fn planar_orbit_reports_longitude_of_pericentre() {
    let mu = 0.0898;
    let (x, v) = cartesian_from_elements(mu, 0.02, 0.05, 0.0, 0.0, 4.0, 1.0);
    let o = orbit_from_cartesian(mu, x, v);

    assert_eq!(o.node, 0.0);
    assert_relative_eq!(o.pomega, 4.0, epsilon = 1e-10);
    assert_relative_eq!(o.period, TAU * (0.02f64.powi(3) / mu).sqrt(), max_relative = 1e-10);
}

#[test]
fn kepler_solver_inverts_mean_anomaly() {
    for &e in &[0.0, 1e-4, 0.3, 0.9] {
        for k in 0..12 {
            let m = k as f64 * TAU / 12.0;
            let f = true_from_mean(m, e);
            assert_relative_eq!(mean_from_true(f, e), wrap_angle(m), epsilon = 1e-9);
        }
    }
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn engine_places_planet_on_requested_orbit() {
    let engine = one_planet_engine(0.1, TAU / 200.0);
    let orbits = engine.orbits().unwrap();

    assert_eq!(orbits.len(), 1);
    assert_relative_eq!(orbits[0].period, TAU, max_relative = 1e-10);
    assert_relative_eq!(orbits[0].e, 0.1, epsilon = 1e-12);
    assert_relative_eq!(orbits[0].pomega, 0.3, epsilon = 1e-9);
    assert_relative_eq!(orbits[0].l, 1.1, epsilon = 1e-9);

    // system starts in the centre-of-mass frame
    assert!(engine.system().momentum().norm() < 1e-15);
}

#[test]
fn advance_lands_exactly_on_target_time() {
    let mut engine = one_planet_engine(0.0, 0.07);
    engine.advance_to(1.0).unwrap();
    assert_eq!(engine.time(), 1.0);

    engine.advance_to(1.0).unwrap();
    assert_eq!(engine.time(), 1.0);

    assert!(engine.advance_to(0.5).is_err());
}

#[test]
fn keplerian_orbit_keeps_its_size() {
    let mut engine = one_planet_engine(0.05, TAU / 500.0);
    engine.advance_to(10.0 * TAU).unwrap();

    let o = engine.orbits().unwrap()[0];
    assert_relative_eq!(o.a, 1.0, max_relative = 1e-3);
    assert_relative_eq!(o.e, 0.05, epsilon = 1e-3);
}

#[test]
fn migration_force_shrinks_orbit() {
    let mut engine = one_planet_engine(0.0, TAU / 200.0);
    engine
        .add_force(ForceSpec::ModifyOrbits {
            tau_a: vec![-100.0 * TAU],
            tau_e: vec![0.0],
        })
        .unwrap();

    engine.advance_to(10.0 * TAU).unwrap();

    // a(t) = a0 exp(t / tau_a) ~ 0.905
    let a = engine.orbits().unwrap()[0].a;
    assert!(a < 0.95 && a > 0.85, "a = {a}");
}

#[test]
fn eccentricity_damping_reduces_eccentricity() {
    let mut engine = one_planet_engine(0.1, TAU / 200.0);
    engine
        .add_force(ForceSpec::ModifyOrbits {
            tau_a: vec![0.0],
            tau_e: vec![-10.0 * TAU],
        })
        .unwrap();

    engine.advance_to(10.0 * TAU).unwrap();

    let e = engine.orbits().unwrap()[0].e;
    assert!(e < 0.07, "e = {e}");
}

#[test]
fn force_shape_must_match_planets() {
    let mut engine = one_planet_engine(0.0, 0.01);
    let err = engine.add_force(ForceSpec::ModifyOrbits {
        tau_a: vec![0.0, 0.0],
        tau_e: vec![0.0],
    });
    assert!(err.is_err());
}

#[test]
fn planets_need_a_star() {
    let mut engine = NBodyEngine::new(0.01);
    let el = PlanetElements {
        period: 1.0,
        e: 0.0,
        inc: 0.0,
        node: 0.0,
        pomega: 0.0,
        l: 0.0,
    };
    assert!(engine.add_planet(1e-6, 0.0, &el).is_err());
}
