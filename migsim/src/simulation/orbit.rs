//! Keplerian orbital elements and conversions to/from Cartesian state
//!
//! All conversions are relative to a primary (in the engine: the centre of mass
//! of every body interior to the one being converted) with gravitational
//! parameter `mu = G (M_primary + m)`, G = 1.
//!
//! Angle conventions:
//! - `node`   – longitude of the ascending node (Ω)
//! - `omega`  – argument of pericentre (ω)
//! - `pomega` – longitude of pericentre (ϖ = Ω + ω)
//! - `l`      – mean longitude (λ = ϖ + M)

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use super::states::NVec3;

const KEPLER_TOL: f64 = 1e-15;
const KEPLER_MAX_ITER: usize = 64;
const TINY: f64 = 1e-14;

/// Osculating orbit of one body relative to its primary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orbit {
    pub a: f64,
    pub e: f64,
    pub inc: f64,
    pub node: f64,
    pub omega: f64,
    pub pomega: f64,
    pub f: f64,            // true anomaly
    pub mean_anomaly: f64, // M
    pub l: f64,            // mean longitude
    pub period: f64,       // infinite for unbound orbits
}

impl Orbit {
    /// Orbit carrying only `a` and `e`; angles are zero.
    pub fn with_ae(a: f64, e: f64) -> Self {
        Self {
            a,
            e,
            inc: 0.0,
            node: 0.0,
            omega: 0.0,
            pomega: 0.0,
            f: 0.0,
            mean_anomaly: 0.0,
            l: 0.0,
            period: TAU * a.abs().powf(1.5),
        }
    }
}

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(x: f64) -> f64 {
    let w = x.rem_euclid(TAU);
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Semi-major axis of a bound orbit with period `period`
pub fn sma_from_period(mu: f64, period: f64) -> f64 {
    (mu * period * period / (4.0 * PI * PI)).cbrt()
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly (e < 1)
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let m = wrap_angle(mean_anomaly);
    let mut ea = if e < 0.8 { m } else { PI };

    for _ in 0..KEPLER_MAX_ITER {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let delta = f / fp;
        ea -= delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }
    ea
}

/// True anomaly from mean anomaly (e < 1)
pub fn true_from_mean(mean_anomaly: f64, e: f64) -> f64 {
    let ea = eccentric_anomaly(mean_anomaly, e);
    let f = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (0.5 * ea).tan()).atan();
    wrap_angle(f)
}

/// Mean anomaly from true anomaly (e < 1)
pub fn mean_from_true(f: f64, e: f64) -> f64 {
    let ea = ((1.0 - e * e).sqrt() * f.sin()).atan2(e + f.cos());
    wrap_angle(ea - e * ea.sin())
}

/// Position and velocity relative to the primary for a bound orbit
///
/// `a` must be positive and `0 <= e < 1`.
pub fn cartesian_from_elements(
    mu: f64,
    a: f64,
    e: f64,
    inc: f64,
    node: f64,
    omega: f64,
    f: f64,
) -> (NVec3, NVec3) {
    let p = a * (1.0 - e * e);
    let r = p / (1.0 + e * f.cos());
    let v0 = (mu / p).sqrt();

    let (s_node, c_node) = node.sin_cos();
    let (s_om, c_om) = omega.sin_cos();
    let (s_f, c_f) = f.sin_cos();
    let (s_i, c_i) = inc.sin_cos();

    // argument of latitude u = omega + f
    let cu = c_om * c_f - s_om * s_f;
    let su = s_om * c_f + c_om * s_f;

    let x = NVec3::new(
        r * (c_node * cu - s_node * su * c_i),
        r * (s_node * cu + c_node * su * c_i),
        r * su * s_i,
    );
    let v = NVec3::new(
        v0 * ((e + c_f) * (-c_i * c_om * s_node - c_node * s_om) - s_f * (c_om * c_node - c_i * s_om * s_node)),
        v0 * ((e + c_f) * (c_i * c_om * c_node - s_node * s_om) - s_f * (c_om * s_node + c_i * s_om * c_node)),
        v0 * ((e + c_f) * c_om * s_i - s_f * s_i * s_om),
    );

    (x, v)
}

/// Osculating orbit from position `dx` and velocity `dv` relative to the primary
pub fn orbit_from_cartesian(mu: f64, dx: NVec3, dv: NVec3) -> Orbit {
    let r = dx.norm();
    let v2 = dv.norm_squared();
    let rdotv = dx.dot(&dv);

    let h = dx.cross(&dv);
    let hn = h.norm();

    let a = -mu / (v2 - 2.0 * mu / r);
    let ev = ((v2 - mu / r) * dx - rdotv * dv) / mu;
    let e = ev.norm();

    let inc = (h.x.hypot(h.y)).atan2(h.z);

    // ascending node n = z x h
    let n = NVec3::new(-h.y, h.x, 0.0);
    let node = if n.norm() > TINY * hn.max(1.0) {
        wrap_angle(n.y.atan2(n.x))
    } else {
        0.0
    };

    // in-plane frame: n_hat along the node line, q_hat 90 degrees ahead of it
    let n_hat = NVec3::new(node.cos(), node.sin(), 0.0);
    let q_hat = (h / hn).cross(&n_hat);

    let u = dx.dot(&q_hat).atan2(dx.dot(&n_hat));
    let omega = if e > TINY {
        wrap_angle(ev.dot(&q_hat).atan2(ev.dot(&n_hat)))
    } else {
        0.0
    };
    let f = wrap_angle(u - omega);
    let pomega = wrap_angle(node + omega);

    let (mean_anomaly, period) = if e < 1.0 && a > 0.0 {
        (mean_from_true(f, e), TAU * (a * a * a / mu).sqrt())
    } else {
        (f, f64::INFINITY)
    };

    Orbit {
        a,
        e,
        inc,
        node,
        omega,
        pomega,
        f,
        mean_anomaly,
        l: wrap_angle(pomega + mean_anomaly),
        period,
    }
}
