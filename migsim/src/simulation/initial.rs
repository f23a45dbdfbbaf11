//! Initial-condition synthesis
//!
//! Starts every planet wider than observed: `P_init[k] = spacing^k * distance * P_obs[k]`,
//! with a small seed eccentricity/inclination and random orientation and phase.

use std::f64::consts::TAU;

use rand::Rng;

use crate::configuration::config::InitialConfig;

use super::params::SystemParameters;

/// Orbital elements handed to the engine for one planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetElements {
    pub period: f64,
    pub e: f64,
    pub inc: f64,
    pub node: f64,   // longitude of ascending node
    pub pomega: f64, // longitude of pericentre
    pub l: f64,      // mean longitude
}

/// Initial elements for all planets, innermost first
#[derive(Debug, Clone)]
pub struct InitialElements {
    pub planets: Vec<PlanetElements>,
}

impl InitialElements {
    /// Synthesize initial elements from the observed table
    ///
    /// Draws 3 * NP angles from `rng`, uniformly in [0, 2π): all node longitudes
    /// first, then all pericentre longitudes, then all mean longitudes.
    pub fn synthesize<R: Rng>(params: &SystemParameters, init: &InitialConfig, rng: &mut R) -> Self {
        let np = params.np();

        let node: Vec<f64> = (0..np).map(|_| rng.random_range(0.0..TAU)).collect();
        let pomega: Vec<f64> = (0..np).map(|_| rng.random_range(0.0..TAU)).collect();
        let l: Vec<f64> = (0..np).map(|_| rng.random_range(0.0..TAU)).collect();

        let planets = (0..np)
            .map(|k| PlanetElements {
                period: inflated_period(params.period[k], k, init.spacing, init.distance),
                e: init.e_seed,
                inc: init.i_seed,
                node: node[k],
                pomega: pomega[k],
                l: l[k],
            })
            .collect();

        Self { planets }
    }

    pub fn periods(&self) -> Vec<f64> {
        self.planets.iter().map(|p| p.period).collect()
    }

    /// Innermost initial period
    pub fn inner_period(&self) -> f64 {
        self.planets[0].period
    }
}

/// `spacing^k * distance * period`
pub fn inflated_period(period: f64, k: usize, spacing: f64, distance: f64) -> f64 {
    spacing.powi(k as i32) * distance * period
}
