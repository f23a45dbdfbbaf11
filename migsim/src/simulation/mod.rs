pub mod constants;
pub mod params;
pub mod migration;
pub mod initial;
pub mod orbit;
pub mod amd;
pub mod engine;
pub mod states;
pub mod forces;
pub mod integrator;
pub mod archive;
pub mod nbody;
pub mod scenario;
pub mod controller;
pub mod run;
