//! Force / acceleration contributors for the reference engine
//!
//! Defines the 3D acceleration trait and its terms: direct Newtonian gravity,
//! a GR correction potential around the star and the orbit-modifying
//! migration/damping force. Body 0 is always the central star.

use crate::simulation::states::{NVec3, System3};

/// Collection of 3D acceleration terms (gravity, GR, migration)
/// Each term implements [`Acceleration3`] and their contributions are summed
/// into a single acceleration vector per body
#[derive(Default)]
pub struct AccelSet3 {
    terms: Vec<Box<dyn Acceleration3 + Send + Sync>>,
}

impl AccelSet3 {
    /// Constructor
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration3 + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Add an acceleration term in place
    pub fn push(&mut self, term: impl Acceleration3 + Send + Sync + 'static) {
        self.terms.push(Box::new(term));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System3, out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for 3D acceleration sources operating on [`System3`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration3 {
    fn acceleration(&self, t: f64, sys: &System3, out: &mut [NVec3]);
}

/// 3D Newtonian gravity (direct n^2 sum, no softening)
pub struct NewtonianGravity3 {
    pub g: f64,
}

impl Acceleration3 for NewtonianGravity3 {
    fn acceleration(&self, _t: f64, sys: &System3, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.x - bi.x;
                let r2 = r.norm_squared();
                let inv_r = r2.sqrt().recip();
                let coef = self.g * inv_r * inv_r * inv_r;

                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }
    }
}

/// GR correction around the star (Nobili & Roxburgh 1986)
///
/// Potential `phi = -3 (G M)^2 / (c^2 r^2)` acting on every planet, with the
/// equal and opposite reaction on the star. Reproduces the GR apsidal
/// precession rate without velocity-dependent terms.
pub struct GrPotential {
    pub g: f64,
    pub c: f64,
}

impl Acceleration3 for GrPotential {
    fn acceleration(&self, _t: f64, sys: &System3, out: &mut [NVec3]) {
        let Some(star) = sys.bodies.first() else {
            return;
        };
        let gm = self.g * star.m;
        let prefac1 = 6.0 * gm * gm / (self.c * self.c);

        for i in 1..sys.bodies.len() {
            let p = &sys.bodies[i];
            let dx = p.x - star.x;
            let r2 = dx.norm_squared();
            let a = prefac1 / (r2 * r2) * dx;

            out[i] -= a;
            out[0] += (p.m / star.m) * a;
        }
    }
}

/// Orbit-modifying force (Papaloizou & Larwood 2000)
///
/// For body `i` with timescales `tau_a[i]`, `tau_e[i]` (negative = damping,
/// zero = off), relative to its Jacobi primary:
///
/// `a = dv / (2 tau_a) + 2 (dv . dx) dx / (r^2 tau_e)`
///
/// Index 0 (the star) is ignored.
pub struct ModifyOrbits {
    pub tau_a: Vec<f64>,
    pub tau_e: Vec<f64>,
}

impl ModifyOrbits {
    fn inv(tau: Option<&f64>) -> f64 {
        match tau {
            Some(&t) if t != 0.0 => t.recip(),
            _ => 0.0,
        }
    }
}

impl Acceleration3 for ModifyOrbits {
    fn acceleration(&self, _t: f64, sys: &System3, out: &mut [NVec3]) {
        // running centre of mass of bodies 0..i (Jacobi primary of body i)
        let mut m_in = 0.0;
        let mut mx = NVec3::zeros();
        let mut mv = NVec3::zeros();

        for (i, p) in sys.bodies.iter().enumerate() {
            if i > 0 {
                let inv_a = Self::inv(self.tau_a.get(i));
                let inv_e = Self::inv(self.tau_e.get(i));

                if inv_a != 0.0 || inv_e != 0.0 {
                    let dx = p.x - mx / m_in;
                    let dv = p.v - mv / m_in;
                    let r2 = dx.norm_squared();

                    let mut a = 0.5 * inv_a * dv;
                    if inv_e != 0.0 {
                        a += (2.0 * dv.dot(&dx) / r2 * inv_e) * dx;
                    }
                    out[i] += a;
                }
            }

            m_in += p.m;
            mx += p.m * p.x;
            mv += p.m * p.v;
        }
    }
}
