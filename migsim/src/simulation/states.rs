//! Core state types for the reference engine.
//!
//! `Body3` / `System3` use `NVec3`. Body 0 is the central star; planets follow
//! innermost first. The system holds the list of bodies and the current
//! simulation time `t`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body3 {
    pub x: NVec3,    // 3d position
    pub v: NVec3,    // 3d velocity
    pub m: f64,      // mass
    pub radius: f64, // physical radius
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct System3 {
    pub bodies: Vec<Body3>, // star first, then planets
    pub t: f64,             // time
}

impl System3 {
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass, position and velocity of the centre of mass of the first `n` bodies
    pub fn com_of_first(&self, n: usize) -> (f64, NVec3, NVec3) {
        let mut m = 0.0;
        let mut x = NVec3::zeros();
        let mut v = NVec3::zeros();
        for b in self.bodies.iter().take(n) {
            m += b.m;
            x += b.m * b.x;
            v += b.m * b.v;
        }
        if m > 0.0 {
            x /= m;
            v /= m;
        }
        (m, x, v)
    }

    /// Shift to the centre-of-mass frame
    pub fn move_to_com(&mut self) {
        let (_, x, v) = self.com_of_first(self.bodies.len());
        for b in self.bodies.iter_mut() {
            b.x -= x;
            b.v -= v;
        }
    }

    /// Total linear momentum
    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().fold(NVec3::zeros(), |p, b| p + b.m * b.v)
    }
}
