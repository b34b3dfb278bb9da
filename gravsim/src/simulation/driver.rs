//! Simulation driver
//!
//! Owns the bodies, the octree built over them and the force law, and runs
//! the phases of a run in order:
//!
//! 1. insert every candidate body (bodies outside the boundary are discarded)
//! 2. aggregate masses once
//! 3. alternate [`Simulation::step`] and [`Simulation::collect_bodies`]
//!
//! The tree topology and its aggregates are never rebuilt while stepping.
//! Aggregates go stale as bodies move; [`Simulation::recompute_aggregates`]
//! refreshes them on request only.

use crate::simulation::barnes_hut::Octree;
use crate::simulation::boundary::Boundary;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, TreeForces};
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

pub struct Simulation {
    pub system: System,
    pub tree: Octree,
    pub gravity: BarnesHutGravity,
    pub parameters: Parameters,
    discarded: usize,
}

impl Simulation {
    /// Insert `candidates` into a fresh tree over `boundary` and aggregate
    /// masses. Only accepted bodies are kept in the system.
    pub fn new(boundary: Boundary, engine: &Engine, parameters: Parameters, candidates: Vec<Body>) -> Self {
        // Bodies outside the root are dropped first, so tree indices are
        // positions in the accepted list
        let (bodies, outside): (Vec<Body>, Vec<Body>) = candidates.into_iter().partition(|b| boundary.contains(&b.x));
        let (tree, rejected) = Octree::build(boundary, engine.capacity, &bodies);
        debug_assert!(rejected.is_empty());
        let discarded = outside.len();

        let total_mass = tree.root_node().total_mass;
        let stats = tree.stats();

        if discarded > 0 {
            log::info!("discarded {} bodies outside the octree boundary", discarded);
        }
        log::info!(
            "octree built: {} bodies, {} nodes ({} internal), depth {}, total mass {:e}",
            bodies.len(),
            stats.nodes,
            stats.internal,
            stats.max_depth,
            total_mass
        );

        Self {
            system: System::new(bodies),
            tree,
            gravity: BarnesHutGravity::new(engine, &parameters),
            parameters,
            discarded,
        }
    }

    /// Bodies rejected at insertion
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// One explicit Euler step of every body against the octree root
    pub fn step(&mut self) {
        let Simulation { system, tree, gravity, parameters, .. } = self;
        let forces = TreeForces { tree, gravity };
        euler_step(system, &forces, parameters.dt);
    }

    /// Run `steps` steps, logging a summary every `log_every` steps
    pub fn run(&mut self, steps: usize, log_every: usize) {
        for n in 1..=steps {
            self.step();
            if log_every > 0 && n % log_every == 0 {
                log::info!(
                    "step {:>6}  t = {:.3e}  ke = {:.6e}  max |v| = {:.6e}",
                    n,
                    self.system.t,
                    self.system.kinetic_energy(),
                    self.system.max_speed()
                );
            }
        }
    }

    /// Every resident body, depth first in bucket order
    pub fn collect_bodies(&self) -> Vec<&Body> {
        self.tree
            .collect_bodies()
            .into_iter()
            .map(|i| &self.system.bodies[i])
            .collect()
    }

    /// Current positions in the same order as [`Simulation::collect_bodies`]
    pub fn collect_positions(&self) -> Vec<NVec3> {
        self.collect_bodies().into_iter().map(|b| b.x).collect()
    }

    /// Re-aggregate masses from current positions without touching topology.
    /// Not called by `step`.
    pub fn recompute_aggregates(&mut self) -> (f64, NVec3) {
        self.tree.aggregate_mass(&self.system.bodies)
    }
}
