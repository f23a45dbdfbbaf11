//! Integration-loop controller
//!
//! Walks the output-time grid, keeping the engine and the AMD diagnostic in
//! lockstep. Per step: advance, read orbits, snapshot, AMD, optional progress
//! line, then the termination checks (instability before convergence).

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use super::amd::AmdDiagnostic;
use super::constants::YR;
use super::engine::{EngineError, PhysicsEngine};
use super::migration::MigrationTimescales;
use super::orbit::Orbit;
use super::scenario::{Scenario, StopCriteria};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// Every output time was consumed
    Completed,
    /// Innermost planet exceeded the eccentricity or semi-major-axis bound
    Unstable,
    /// Innermost planet moved inside its observed semi-major axis
    ConvergedToPresent,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Unstable => "unstable",
            RunOutcome::ConvergedToPresent => "converged to present",
        };
        f.write_str(s)
    }
}

/// Structured result of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub steps: usize,      // output steps processed, the terminating one included
    pub last_time: f64,    // code time units
    pub amd_ratio: f64,    // at the last processed step
    pub migration: Option<MigrationTimescales>,
}

/// Termination check on the innermost planet's orbit
pub fn check_termination(inner: &Orbit, stop: &StopCriteria) -> Option<RunOutcome> {
    if inner.a > stop.max_inner_sma || inner.e > stop.max_inner_ecc {
        return Some(RunOutcome::Unstable);
    }
    if inner.a < stop.min_inner_sma {
        return Some(RunOutcome::ConvergedToPresent);
    }
    None
}

/// One verbose progress record
///
/// `step t_yr --  a_0 .. a_n --  (a_1/a_0)^1.5 .. --  amd_ratio`
pub struct ProgressLine<'a> {
    pub step: usize,
    pub time: f64,
    pub orbits: &'a [Orbit],
    pub amd_ratio: f64,
}

impl fmt::Display for ProgressLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2} -- ", self.step, self.time / YR)?;
        for o in self.orbits {
            write!(f, " {:.4}", o.a)?;
        }
        write!(f, " -- ")?;
        for pair in self.orbits.windows(2) {
            write!(f, " {:.4}", (pair[1].a / pair[0].a).powf(1.5))?;
        }
        write!(f, " --  {:.4}", self.amd_ratio)
    }
}

pub struct Controller {
    times: Vec<f64>,
    stop: StopCriteria,
    amd: AmdDiagnostic,
    artifact: PathBuf,
    migration: Option<MigrationTimescales>,
    verbose: bool,
}

impl Controller {
    pub fn new(scenario: &Scenario, artifact: PathBuf, verbose: bool) -> Self {
        Self {
            times: scenario.times.clone(),
            stop: scenario.stop,
            amd: scenario.amd_diagnostic(),
            artifact,
            migration: scenario.migration,
            verbose,
        }
    }

    /// Replace the output grid
    pub fn with_times(mut self, times: Vec<f64>) -> Self {
        self.times = times;
        self
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Run to completion or early termination.
    ///
    /// `on_progress` receives one line per step when verbose mode is on. Any
    /// engine error aborts the run at that step.
    pub fn run<E, F>(&self, engine: &mut E, mut on_progress: F) -> Result<RunSummary, EngineError>
    where
        E: PhysicsEngine,
        F: FnMut(&ProgressLine<'_>),
    {
        let mut summary = RunSummary {
            outcome: RunOutcome::Completed,
            steps: 0,
            last_time: engine.time(),
            amd_ratio: f64::NAN,
            migration: self.migration,
        };

        for (step, &time) in self.times.iter().enumerate() {
            engine.advance_to(time)?;
            let orbits = engine.orbits()?;
            engine.snapshot_append(&self.artifact)?;

            let amd_ratio = self.amd.ratio(&orbits);
            summary.steps = step + 1;
            summary.last_time = time;
            summary.amd_ratio = amd_ratio;

            if self.verbose {
                let line = ProgressLine {
                    step,
                    time,
                    orbits: &orbits,
                    amd_ratio,
                };
                debug!(target: "migsim::progress", "{line}");
                on_progress(&line);
            }

            let inner = orbits.first().ok_or(EngineError::MissingOrbits)?;
            match check_termination(inner, &self.stop) {
                Some(RunOutcome::Unstable) => {
                    info!(step, a = inner.a, e = inner.e, "system went unstable");
                    summary.outcome = RunOutcome::Unstable;
                    return Ok(summary);
                }
                Some(outcome) => {
                    info!(step, a = inner.a, "inner planet reached its current location");
                    summary.outcome = outcome;
                    return Ok(summary);
                }
                None => {}
            }
        }

        info!(steps = summary.steps, t_yr = summary.last_time / YR, "run completed");
        Ok(summary)
    }
}
