//! Build fully-initialized migration runs from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and a random source and produces a
//! [`Scenario`] containing:
//! - static system parameters and the observed reference (`SystemParameters`, `ObservedReference`)
//! - randomized initial elements (`InitialElements`)
//! - migration timescales drawn once for the run (`MigrationTimescales`)
//! - the output-time grid, engine timestep and stop thresholds
//!
//! [`Scenario::configure`] then loads bodies and forces into any [`PhysicsEngine`].

use rand::Rng;
use tracing::info;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::amd::AmdDiagnostic;
use crate::simulation::constants::{C, YR};
use crate::simulation::engine::{EngineError, ForceSpec, PhysicsEngine};
use crate::simulation::initial::InitialElements;
use crate::simulation::migration::{draw_exponent, migration_time_with_base, MigrationTimescales};
use crate::simulation::nbody::NBodyEngine;
use crate::simulation::params::{ObservedReference, SystemParameters};

/// Termination thresholds, all on the innermost planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopCriteria {
    pub max_inner_sma: f64, // unstable above this semi-major axis
    pub max_inner_ecc: f64, // unstable above this eccentricity
    pub min_inner_sma: f64, // converged below this (observed) semi-major axis
}

/// A fully-initialized run, ready to be loaded into an engine
#[derive(Debug, Clone)]
pub struct Scenario {
    pub params: SystemParameters,
    pub reference: ObservedReference,
    pub initial: InitialElements,
    pub migration: Option<MigrationTimescales>,
    pub gr: bool,
    pub times: Vec<f64>,
    pub stop: StopCriteria,
    pub dt: f64,
}

impl Scenario {
    /// Draws from `rng` in a fixed order: the 3 * NP initial angles, then the
    /// migration exponent (only when migration is enabled).
    pub fn build_scenario<R: Rng>(cfg: &ScenarioConfig, rng: &mut R) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let params = SystemParameters::from_config(cfg)?;
        let reference = ObservedReference::new(&params);
        let initial = InitialElements::synthesize(&params, &cfg.initial, rng);

        let migration = cfg.forces.migration.then(|| {
            let m = &cfg.migration;
            let x = draw_exponent(rng, m.exponent_min..=m.exponent_max);
            migration_time_with_base(m.base_timescale_yr * YR, x)
        });

        let times = output_times(cfg.integration.t_end_yr * YR, cfg.integration.n_out);
        let dt = cfg.integration.dt_fraction * initial.inner_period();

        let stop = StopCriteria {
            max_inner_sma: cfg.stopping.max_inner_sma,
            max_inner_ecc: cfg.stopping.max_inner_ecc,
            min_inner_sma: reference.inner_sma(),
        };

        if let Some(mig) = &migration {
            info!(exponent = mig.exponent, ta_yr = mig.ta / YR, te_yr = mig.te / YR, "drew migration timescales");
        }

        Ok(Self {
            params,
            reference,
            initial,
            migration,
            gr: cfg.forces.gr,
            times,
            stop,
            dt,
        })
    }

    /// Star, then planets innermost first, then the enabled extra forces.
    ///
    /// Migration pulls only the outermost planet inward (`tau_a = -ta`);
    /// eccentricity damping (`tau_e = -te`) applies to every planet.
    pub fn configure<E: PhysicsEngine>(&self, engine: &mut E) -> Result<(), EngineError> {
        let p = &self.params;
        engine.add_star(p.star_mass, p.star_radius)?;
        for (k, el) in self.initial.planets.iter().enumerate() {
            engine.add_planet(p.mass[k], p.radius[k], el)?;
        }

        if self.gr {
            engine.add_force(ForceSpec::GrPotential { c: C })?;
        }

        if let Some(mig) = &self.migration {
            let np = p.np();
            let mut tau_a = vec![0.0; np];
            tau_a[np - 1] = -mig.ta;
            let tau_e = vec![-mig.te; np];
            engine.add_force(ForceSpec::ModifyOrbits { tau_a, tau_e })?;
        }
        Ok(())
    }

    /// Reference engine with this scenario's timestep, fully configured
    pub fn build_engine(&self) -> Result<NBodyEngine, EngineError> {
        let mut engine = NBodyEngine::new(self.dt);
        self.configure(&mut engine)?;
        Ok(engine)
    }

    /// AMD diagnostic against this scenario's observed reference
    pub fn amd_diagnostic(&self) -> AmdDiagnostic {
        AmdDiagnostic::new(&self.params, &self.reference)
    }
}

/// `n` evenly spaced times from 0 to `t_end`, both included
pub fn output_times(t_end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = t_end / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { t_end } else { i as f64 * step })
                .collect()
        }
    }
}
