pub mod simulation;
pub mod configuration;

pub use simulation::states::{Body3, System3, NVec3};
pub use simulation::forces::{AccelSet3, Acceleration3, NewtonianGravity3, GrPotential, ModifyOrbits};
pub use simulation::integrator::{leapfrog_dkd, integrate_to};
pub use simulation::scenario::{Scenario, StopCriteria, output_times};
pub use simulation::engine::{PhysicsEngine, EngineError, ForceSpec};
pub use simulation::nbody::NBodyEngine;
pub use simulation::controller::{Controller, RunOutcome, RunSummary, ProgressLine, check_termination};
pub use simulation::run::RunIdentity;
pub use simulation::amd::AmdDiagnostic;
pub use simulation::migration::{migration_time, MigrationTimescales};
pub use simulation::orbit::Orbit;

pub use configuration::config::{ScenarioConfig, ConfigError, StarConfig, PlanetConfig, InitialConfig,
    MigrationConfig, IntegrationConfig, StoppingConfig, ForcesConfig};
