//! Static system parameters and the observed reference state
//!
//! `SystemParameters` is the observational table converted into code units.
//! `ObservedReference` holds the semi-major axes and eccentricities the run is
//! measured against; both are built once per run and never mutated.

use std::f64::consts::PI;

use crate::configuration::config::{ConfigError, ScenarioConfig};

use super::constants::{DAY2YEAR, ME, RE, RSUN};

/// Star and planets in code units, planets innermost first
#[derive(Debug, Clone)]
pub struct SystemParameters {
    pub star_mass: f64,
    pub star_radius: f64,
    pub mass: Vec<f64>,
    pub radius: Vec<f64>,
    pub period: Vec<f64>,
    pub ecosw: Vec<f64>,
    pub esinw: Vec<f64>,
}

impl SystemParameters {
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let np = cfg.planets.len();
        if np == 0 {
            return Err(ConfigError::PlanetCount(np));
        }

        Ok(Self {
            star_mass: cfg.star.mass_msun,
            star_radius: cfg.star.radius_rsun * RSUN,
            mass: cfg.planets.iter().map(|p| p.mass_mearth * ME).collect(),
            radius: cfg.planets.iter().map(|p| p.radius_rearth * RE).collect(),
            period: cfg.planets.iter().map(|p| p.period_days * DAY2YEAR).collect(),
            ecosw: cfg.planets.iter().map(|p| p.ecosw).collect(),
            esinw: cfg.planets.iter().map(|p| p.esinw).collect(),
        })
    }

    /// Number of planets
    pub fn np(&self) -> usize {
        self.mass.len()
    }
}

/// Semi-major axis from Kepler's third law, `a^3 = P^2 M / (4 pi^2)` with G = 1
pub fn kepler_sma(period: f64, star_mass: f64) -> f64 {
    (period * period * star_mass / (4.0 * PI * PI)).cbrt()
}

/// Observed semi-major axes and eccentricities
#[derive(Debug, Clone)]
pub struct ObservedReference {
    pub sma: Vec<f64>,
    pub ecc: Vec<f64>,
}

impl ObservedReference {
    pub fn new(params: &SystemParameters) -> Self {
        let sma = params
            .period
            .iter()
            .map(|&p| kepler_sma(p, params.star_mass))
            .collect();
        let ecc = params
            .ecosw
            .iter()
            .zip(params.esinw.iter())
            .map(|(c, s)| c.hypot(*s))
            .collect();

        Self { sma, ecc }
    }

    /// Observed semi-major axis of the innermost planet
    pub fn inner_sma(&self) -> f64 {
        self.sma[0]
    }
}
