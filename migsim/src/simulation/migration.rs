//! Migration and eccentricity-damping timescales
//!
//! A single exponent `x` controls how strongly eccentricity is damped relative
//! to migration: `te = ta / 10^x`, so larger `x` gives faster damping.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use super::constants::BASE_MIGRATION_TIME;

/// Damping timescales applied for the whole run (code time units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MigrationTimescales {
    pub exponent: f64, // drawn x
    pub ta: f64,       // semi-major-axis timescale
    pub te: f64,       // eccentricity timescale
}

/// Timescales for exponent `x` using the default base timescale.
///
/// The range of `x` is not checked.
pub fn migration_time(x: f64) -> MigrationTimescales {
    migration_time_with_base(BASE_MIGRATION_TIME, x)
}

/// Timescales for exponent `x` with an explicit base timescale `ta`
pub fn migration_time_with_base(ta: f64, x: f64) -> MigrationTimescales {
    let k = 10f64.powf(x);
    MigrationTimescales {
        exponent: x,
        ta,
        te: ta / k,
    }
}

/// Draw the migration exponent uniformly from `range`
pub fn draw_exponent<R: Rng>(rng: &mut R, range: RangeInclusive<f64>) -> f64 {
    if range.start() >= range.end() {
        return *range.start();
    }
    rng.random_range(range)
}
