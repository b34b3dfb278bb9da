//! Force contributors for the simulation
//!
//! Defines the [`ForceField`] trait used by the integrator, the octree-backed
//! Barnes–Hut field and a direct all-pairs field used as a reference.
//!
//! Every interaction uses the same point-mass law: `G m M / d^2` directed from
//! the query body toward the source, with `d` floored at 1 distance unit.

use crate::configuration::config::LeafForces;
use crate::simulation::barnes_hut::Octree;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, System};

/// Smallest distance used in the force law
pub const MIN_DISTANCE: f64 = 1.0;

/// Trait for force sources operating on a [`System`]
/// Implementations write the net force on body `i` into `out[i]`
pub trait ForceField {
    fn forces(&self, sys: &System, out: &mut [NVec3]);
}

/// Force on a body of mass `m` at `pos` from a point mass `source_m` at `source`.
///
/// The direction is `(source - pos) / d` with the floored `d`, so inside the
/// floor the returned vector is shorter than the unfloored law would give.
pub fn point_mass_force(g: f64, m: f64, pos: &NVec3, source: &NVec3, source_m: f64) -> NVec3 {
    let r = source - pos;
    let d = r.norm().max(MIN_DISTANCE);
    let magnitude = g * m * source_m / (d * d);
    r * (magnitude / d)
}

/// Barnes–Hut force law: constant, opening angle and leaf handling
#[derive(Debug, Clone)]
pub struct BarnesHutGravity {
    pub g: f64, // gravitational constant
    pub theta: f64, // opening angle threshold
    pub leaf_forces: LeafForces,
}

impl BarnesHutGravity {
    pub fn new(engine: &Engine, params: &Parameters) -> Self {
        Self {
            g: params.g,
            theta: engine.theta,
            leaf_forces: engine.leaf_forces,
        }
    }
}

/// Barnes–Hut field evaluated against a built octree
pub struct TreeForces<'a> {
    pub tree: &'a Octree,
    pub gravity: &'a BarnesHutGravity,
}

impl ForceField for TreeForces<'_> {
    fn forces(&self, sys: &System, out: &mut [NVec3]) {
        for (i, f) in out.iter_mut().enumerate().take(sys.bodies.len()) {
            *f = self.tree.compute_force(i, &sys.bodies, self.gravity);
        }
    }
}

/// Exact all-pairs gravity with the same distance floor (n^2)
pub struct DirectGravity {
    pub g: f64,
}

impl ForceField for DirectGravity {
    fn forces(&self, sys: &System, out: &mut [NVec3]) {
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }

        let n = sys.bodies.len();
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                // equal and opposite
                let f = point_mass_force(self.g, bi.m, &bi.x, &bj.x, bj.m);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Body;

    #[test]
    fn point_mass_force_is_inverse_square() {
        let pos = NVec3::zeros();
        let near = point_mass_force(1.0, 1.0, &pos, &NVec3::new(2.0, 0.0, 0.0), 1.0);
        let far = point_mass_force(1.0, 1.0, &pos, &NVec3::new(4.0, 0.0, 0.0), 1.0);
        assert!((near.x / far.x - 4.0).abs() < 1e-12);
        assert_eq!(near.y, 0.0);
    }

    #[test]
    fn distance_floor_caps_the_force() {
        let pos = NVec3::zeros();
        let f = point_mass_force(1.0, 1.0, &pos, &NVec3::new(0.5, 0.0, 0.0), 1.0);
        // d is floored to 1, direction is r / 1
        assert!((f.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn direct_gravity_conserves_momentum() {
        let sys = System::new(vec![
            Body::at_rest(NVec3::new(0.0, 0.0, 0.0), 2.0),
            Body::at_rest(NVec3::new(3.0, 1.0, 0.0), 1.0),
            Body::at_rest(NVec3::new(-2.0, 4.0, 5.0), 3.0),
        ]);
        let mut out = vec![NVec3::zeros(); 3];
        DirectGravity { g: 1.0 }.forces(&sys, &mut out);

        let net: NVec3 = out.iter().sum();
        assert!(net.norm() < 1e-12, "net force not zero: {:?}", net);
    }
}
