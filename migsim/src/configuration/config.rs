//! Configuration types for loading migration scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! migration run. A scenario consists of:
//!
//! - [`StarConfig`]        – central star mass and radius
//! - [`PlanetConfig`]      – observed parameters for each planet, innermost first
//! - [`InitialConfig`]     – knobs for synthesizing initial orbital elements
//! - [`MigrationConfig`]   – base migration timescale and exponent range
//! - [`IntegrationConfig`] – output grid and engine step size
//! - [`StoppingConfig`]    – early-termination thresholds for the inner planet
//! - [`ForcesConfig`]      – which extra forces are switched on
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! The TRAPPIST-1 table ships embedded in the binary (`scenarios/trappist1.yaml`)
//! and is what [`ScenarioConfig::trappist1`] returns.
//!
//! # YAML format
//!
//! ```yaml
//! star:
//!   mass_msun: 0.0898
//!   radius_rsun: 0.1234
//!
//! planets:
//!   - { name: b, mass_mearth: 1.374, radius_rearth: 1.116, period_days: 1.510826, ecosw: -0.00215, esinw: 0.00217 }
//!
//! initial:     { spacing: 1.02, distance: 1.2, e_seed: 1.0e-4, i_seed: 0.0 }
//! migration:   { base_timescale_yr: 3.0e4, exponent_min: 2.0, exponent_max: 3.5 }
//! integration: { t_end_yr: 5.0e5, n_out: 5001, dt_fraction: 0.05 }
//! stopping:    { max_inner_sma: 1.0, max_inner_ecc: 0.5 }
//! forces:      { gr: true, migration: true }
//! ```
//!
//! Units are the observer's (solar/Earth masses and radii, days, years); the
//! conversion into code units happens in [`crate::simulation::params`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const TRAPPIST1_YAML: &str = include_str!("../../scenarios/trappist1.yaml");

/// Errors raised while loading or validating a scenario
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scenario must list at least one planet, found {0}")]
    PlanetCount(usize),

    #[error("output grid needs at least one point, got n_out = {0}")]
    EmptyGrid(usize),
}

/// Central star
#[derive(Deserialize, Debug, Clone)]
pub struct StarConfig {
    pub mass_msun: f64,   // stellar mass in solar masses
    pub radius_rsun: f64, // stellar radius in solar radii
}

/// Observed parameters of one planet
#[derive(Deserialize, Debug, Clone)]
pub struct PlanetConfig {
    #[serde(default)]
    pub name: String,
    pub mass_mearth: f64,
    pub radius_rearth: f64,
    pub period_days: f64,
    pub ecosw: f64, // e cos(omega)
    pub esinw: f64, // e sin(omega)
}

/// How initial orbits are spread relative to the observed ones
#[derive(Deserialize, Debug, Clone)]
pub struct InitialConfig {
    pub spacing: f64,  // per-index period inflation, compounded outward
    pub distance: f64, // global period inflation
    pub e_seed: f64,   // initial eccentricity of every planet
    pub i_seed: f64,   // initial inclination of every planet (radians)
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            spacing: 1.02,
            distance: 1.2,
            e_seed: 1.0e-4,
            i_seed: 0.0,
        }
    }
}

/// Migration model: `ta = base`, `te = ta / 10^x` with `x` drawn in [min, max]
#[derive(Deserialize, Debug, Clone)]
pub struct MigrationConfig {
    pub base_timescale_yr: f64,
    pub exponent_min: f64,
    pub exponent_max: f64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            base_timescale_yr: 3.0e4,
            exponent_min: 2.0,
            exponent_max: 3.5,
        }
    }
}

/// Output grid and engine timestep
#[derive(Deserialize, Debug, Clone)]
pub struct IntegrationConfig {
    pub t_end_yr: f64,    // final output time in years
    pub n_out: usize,     // number of output times, 0 and t_end included
    pub dt_fraction: f64, // engine step as a fraction of the innermost initial period
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            t_end_yr: 5.0e5,
            n_out: 5001,
            dt_fraction: 0.05,
        }
    }
}

/// Termination thresholds applied to the innermost planet
#[derive(Deserialize, Debug, Clone)]
pub struct StoppingConfig {
    pub max_inner_sma: f64,
    pub max_inner_ecc: f64,
}

impl Default for StoppingConfig {
    fn default() -> Self {
        Self {
            max_inner_sma: 1.0,
            max_inner_ecc: 0.5,
        }
    }
}

/// Extra (non-Newtonian) forces
#[derive(Deserialize, Debug, Clone)]
pub struct ForcesConfig {
    pub gr: bool,        // `true` - add the GR potential around the star
    pub migration: bool, // `true` - add migration and eccentricity damping
}

impl Default for ForcesConfig {
    fn default() -> Self {
        Self {
            gr: true,
            migration: true,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub star: StarConfig,
    pub planets: Vec<PlanetConfig>,
    #[serde(default)]
    pub initial: InitialConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub stopping: StoppingConfig,
    #[serde(default)]
    pub forces: ForcesConfig,
}

impl ScenarioConfig {
    /// The embedded TRAPPIST-1 scenario
    pub fn trappist1() -> Result<Self, ConfigError> {
        Self::from_yaml_str(TRAPPIST1_YAML)
    }

    /// Parse and validate a scenario from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Shape checks only; values are taken as given
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planets.is_empty() {
            return Err(ConfigError::PlanetCount(0));
        }
        if self.integration.n_out == 0 {
            return Err(ConfigError::EmptyGrid(0));
        }
        Ok(())
    }
}
