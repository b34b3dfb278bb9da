//! Core state types for the simulation.
//!
//! - `Body`   : a point mass with position, velocity and mass
//! - `System` : every body of a run plus the current simulation time `t`
//!
//! Bodies are identified by their index in `System::bodies`; the octree only
//! stores those indices in its buckets.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass
}

impl Body {
    /// Body at rest at `x` with mass `m`
    pub fn at_rest(x: NVec3, m: f64) -> Self {
        Self {
            x,
            v: NVec3::zeros(),
            m,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // every body of the run, indexed by body id
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Total kinetic energy `sum(m v^2 / 2)`
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }

    /// Largest speed over all bodies, 0 for an empty system
    pub fn max_speed(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.v.norm())
            .fold(0.0, f64::max)
    }
}
