//! Physical constants and the code unit system
//!
//! Units: G = 1, masses in solar masses, lengths in AU. One time unit is
//! yr / 2π, so a unit-mass, unit-distance two-body orbit takes `YR` = 2π.

use std::f64::consts::PI;

pub const RAD: f64 = PI / 180.0; // degrees -> radians
pub const DEG: f64 = 180.0 / PI; // radians -> degrees

pub const YR: f64 = 2.0 * PI; // one year in code time units
pub const AU: f64 = 1.0;
pub const DAY2YEAR: f64 = 2.0 * PI / 365.25; // one day in code time units

pub const MSUN: f64 = 1.0;
pub const RSUN: f64 = 0.00465047; // AU
pub const MJ: f64 = 0.000954588; // Jupiter mass in solar masses
pub const ME: f64 = 3.003e-6; // Earth mass in solar masses
pub const RJ: f64 = 0.10045 * RSUN;
pub const RE: f64 = RJ / 11.209;

/// Speed of light in AU per (yr / 2π)
pub const C: f64 = 10065.3201686;

/// Base semi-major-axis migration timescale (3e4 yr)
pub const BASE_MIGRATION_TIME: f64 = 3.0e4 * YR;
