//! Fixed-step time integrator for the reference engine
//!
//! Drift-kick-drift leapfrog driven by `AccelSet3`. Forces are evaluated once
//! per step at the mid-point, which keeps velocity-dependent terms (migration
//! and damping) consistent with the drifted positions.

use super::forces::AccelSet3;
use super::states::{NVec3, System3};

/// Advance the 3D system by one step of size `dt` using drift-kick-drift
/// leapfrog; updates positions, velocities and `sys.t` in-place
pub fn leapfrog_dkd(sys: &mut System3, forces: &AccelSet3, dt: f64, acc: &mut Vec<NVec3>) {
    let n = sys.bodies.len();
    if n == 0 {
        // no bodies, only time moves
        sys.t += dt;
        return;
    }
    let half_dt = 0.5 * dt;

    // Drift: x_half = x_n + (dt/2) * v_n
    for b in sys.bodies.iter_mut() {
        b.x += half_dt * b.v;
    }
    let t_mid = sys.t + half_dt;

    // Kick: v_n+1 = v_n + dt * a(x_half)
    acc.resize(n, NVec3::zeros());
    forces.accumulate_accels(t_mid, &*sys, acc);
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += dt * *a;
    }

    // Second drift: x_n+1 = x_half + (dt/2) * v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += half_dt * b.v;
    }

    sys.t += dt;
}

/// Integrate up to exactly `t_target` with steps of at most `dt`.
/// The final step is shortened so the system lands on `t_target`.
/// Returns the number of steps taken.
pub fn integrate_to(sys: &mut System3, forces: &AccelSet3, dt: f64, t_target: f64) -> usize {
    let mut acc = vec![NVec3::zeros(); sys.bodies.len()];
    let mut steps = 0;

    while t_target - sys.t > 1e-12 * dt {
        let h = dt.min(t_target - sys.t);
        leapfrog_dkd(sys, forces, h, &mut acc);
        steps += 1;
    }
    sys.t = t_target;

    steps
}
