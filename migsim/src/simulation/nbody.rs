//! Built-in reference engine
//!
//! Direct-summation gravity plus optional GR and migration forces, advanced
//! with the fixed-step leapfrog in [`super::integrator`]. Planets are placed
//! and reported in Jacobi coordinates: each planet's primary is the centre of
//! mass of the star and all planets interior to it.

use std::path::Path;

use tracing::{debug, trace};

use super::archive::{Snapshot, SnapshotArchive};
use super::engine::{EngineError, ForceSpec, PhysicsEngine};
use super::forces::{AccelSet3, GrPotential, ModifyOrbits, NewtonianGravity3};
use super::initial::PlanetElements;
use super::integrator::integrate_to;
use super::orbit::{cartesian_from_elements, orbit_from_cartesian, sma_from_period, true_from_mean, wrap_angle, Orbit};
use super::states::{Body3, NVec3, System3};

const G: f64 = 1.0;

pub struct NBodyEngine {
    system: System3,
    forces: AccelSet3,
    dt: f64,
}

impl NBodyEngine {
    /// Empty engine stepping with a fixed `dt` (code time units)
    pub fn new(dt: f64) -> Self {
        Self {
            system: System3::default(),
            forces: AccelSet3::new().with(NewtonianGravity3 { g: G }),
            dt,
        }
    }

    pub fn system(&self) -> &System3 {
        &self.system
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    fn n_planets(&self) -> usize {
        self.system.bodies.len().saturating_sub(1)
    }
}

impl PhysicsEngine for NBodyEngine {
    fn add_star(&mut self, mass: f64, radius: f64) -> Result<(), EngineError> {
        self.system.bodies.insert(
            0,
            Body3 {
                x: NVec3::zeros(),
                v: NVec3::zeros(),
                m: mass,
                radius,
            },
        );
        Ok(())
    }

    fn add_planet(&mut self, mass: f64, radius: f64, el: &PlanetElements) -> Result<(), EngineError> {
        if self.system.bodies.is_empty() {
            return Err(EngineError::NoCentralBody);
        }
        let index = self.system.bodies.len();
        if !(0.0..1.0).contains(&el.e) {
            return Err(EngineError::InvalidElements {
                index,
                reason: format!("eccentricity {} outside [0, 1)", el.e),
            });
        }
        if !(el.period > 0.0) {
            return Err(EngineError::InvalidElements {
                index,
                reason: format!("non-positive period {}", el.period),
            });
        }

        let (m_in, x_in, v_in) = self.system.com_of_first(index);
        let mu = G * (m_in + mass);

        let a = sma_from_period(mu, el.period);
        let omega = wrap_angle(el.pomega - el.node);
        let f = true_from_mean(el.l - el.pomega, el.e);
        let (dx, dv) = cartesian_from_elements(mu, a, el.e, el.inc, el.node, omega, f);

        self.system.bodies.push(Body3 {
            x: x_in + dx,
            v: v_in + dv,
            m: mass,
            radius,
        });
        self.system.move_to_com();

        debug!(index, a, e = el.e, "added planet");
        Ok(())
    }

    fn add_force(&mut self, force: ForceSpec) -> Result<(), EngineError> {
        if self.system.bodies.is_empty() {
            return Err(EngineError::NoCentralBody);
        }
        match force {
            ForceSpec::GrPotential { c } => {
                self.forces.push(GrPotential { g: G, c });
            }
            ForceSpec::ModifyOrbits { tau_a, tau_e } => {
                let np = self.n_planets();
                for got in [tau_a.len(), tau_e.len()] {
                    if got != np {
                        return Err(EngineError::ForceShape { expected: np, got });
                    }
                }
                // star slot first so indices match body indices
                let tau_a = std::iter::once(0.0).chain(tau_a).collect();
                let tau_e = std::iter::once(0.0).chain(tau_e).collect();
                self.forces.push(ModifyOrbits { tau_a, tau_e });
            }
        }
        Ok(())
    }

    fn advance_to(&mut self, t: f64) -> Result<(), EngineError> {
        if !(self.dt > 0.0) {
            return Err(EngineError::InvalidTimestep(self.dt));
        }
        if t < self.system.t {
            return Err(EngineError::BackwardsInTime {
                from: self.system.t,
                to: t,
            });
        }
        let steps = integrate_to(&mut self.system, &self.forces, self.dt, t);
        trace!(t, steps, "advanced");
        Ok(())
    }

    fn orbits(&self) -> Result<Vec<Orbit>, EngineError> {
        let bodies = &self.system.bodies;
        if bodies.is_empty() {
            return Err(EngineError::NoCentralBody);
        }

        let mut m_in = 0.0;
        let mut mx = NVec3::zeros();
        let mut mv = NVec3::zeros();
        let mut out = Vec::with_capacity(bodies.len() - 1);

        for (i, b) in bodies.iter().enumerate() {
            if i > 0 {
                let dx = b.x - mx / m_in;
                let dv = b.v - mv / m_in;
                out.push(orbit_from_cartesian(G * (m_in + b.m), dx, dv));
            }
            m_in += b.m;
            mx += b.m * b.x;
            mv += b.m * b.v;
        }
        Ok(out)
    }

    fn snapshot_append(&mut self, path: &Path) -> Result<(), EngineError> {
        SnapshotArchive::append(path, &Snapshot::from(&self.system))
    }

    fn time(&self) -> f64 {
        self.system.t
    }
}
