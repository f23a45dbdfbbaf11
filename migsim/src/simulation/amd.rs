//! Angular-momentum-deficit diagnostic
//!
//! Compares the dynamical excitation of the current state to the observed one,
//! assuming coplanar orbits: `AMD = sum m sqrt(a) (1 - sqrt(1 - e^2))`.
//! Eccentricities must stay below 1.

use super::orbit::Orbit;
use super::params::{ObservedReference, SystemParameters};

/// AMD contribution of one planet
pub fn amd_term(m: f64, a: f64, e: f64) -> f64 {
    m * a.sqrt() * (1.0 - (1.0 - e * e).sqrt())
}

/// Total AMD over paired `(m, a, e)` slices
pub fn amd(masses: &[f64], sma: &[f64], ecc: &[f64]) -> f64 {
    masses
        .iter()
        .zip(sma.iter().zip(ecc.iter()))
        .map(|(&m, (&a, &e))| amd_term(m, a, e))
        .sum()
}

/// AMD ratio against a fixed observed baseline
#[derive(Debug, Clone)]
pub struct AmdDiagnostic {
    masses: Vec<f64>,
    amd_obs: f64,
}

impl AmdDiagnostic {
    /// Precomputes the observed AMD; never recomputed afterwards
    pub fn new(params: &SystemParameters, reference: &ObservedReference) -> Self {
        let amd_obs = amd(&params.mass, &reference.sma, &reference.ecc);
        Self {
            masses: params.mass.clone(),
            amd_obs,
        }
    }

    pub fn observed(&self) -> f64 {
        self.amd_obs
    }

    /// Current AMD from per-planet orbits, innermost first
    pub fn current(&self, orbits: &[Orbit]) -> f64 {
        self.masses
            .iter()
            .zip(orbits.iter())
            .map(|(&m, o)| amd_term(m, o.a, o.e))
            .sum()
    }

    /// `amd / amd_obs`
    pub fn ratio(&self, orbits: &[Orbit]) -> f64 {
        self.current(orbits) / self.amd_obs
    }
}
