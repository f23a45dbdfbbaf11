//! Physics-engine contract used by the run controller
//!
//! The controller never touches dynamical state directly: it asks an engine to
//! advance to a time, reads back per-planet orbits and asks for a snapshot.
//! [`crate::simulation::nbody::NBodyEngine`] is the built-in implementation.

use std::path::Path;

use thiserror::Error;

use super::initial::PlanetElements;
use super::orbit::Orbit;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no central body: add the star before planets or forces")]
    NoCentralBody,

    #[error("invalid orbital elements for body {index}: {reason}")]
    InvalidElements { index: usize, reason: String },

    #[error("cannot advance backwards from t = {from} to t = {to}")]
    BackwardsInTime { from: f64, to: f64 },

    #[error("timestep must be positive, got {0}")]
    InvalidTimestep(f64),

    #[error("engine returned no orbits")]
    MissingOrbits,

    #[error("force parameters do not match body count: expected {expected}, got {got}")]
    ForceShape { expected: usize, got: usize },

    #[error("snapshot write failed: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Extra forces an engine can be asked to load
#[derive(Debug, Clone, PartialEq)]
pub enum ForceSpec {
    /// Nobili–Roxburgh GR potential around the central body, `c` in code units
    GrPotential { c: f64 },

    /// Migration and eccentricity damping. One entry per planet, innermost
    /// first; negative values damp, zero disables the term.
    ModifyOrbits { tau_a: Vec<f64>, tau_e: Vec<f64> },
}

/// Blocking, single-threaded physics engine
pub trait PhysicsEngine {
    /// Add the central body; must come first
    fn add_star(&mut self, mass: f64, radius: f64) -> Result<(), EngineError>;

    /// Add a planet relative to all bodies added so far
    fn add_planet(&mut self, mass: f64, radius: f64, elements: &PlanetElements) -> Result<(), EngineError>;

    fn add_force(&mut self, force: ForceSpec) -> Result<(), EngineError>;

    /// Advance the state to time `t` under the configured forces
    fn advance_to(&mut self, t: f64) -> Result<(), EngineError>;

    /// Orbits of every planet relative to the central mass, innermost first
    fn orbits(&self) -> Result<Vec<Orbit>, EngineError>;

    /// Append the current full state to the archive at `path`
    fn snapshot_append(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Current simulation time
    fn time(&self) -> f64;
}
