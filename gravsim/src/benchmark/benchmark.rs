use std::time::Instant;

use crate::configuration::config::{LeafForces, DEFAULT_G, DEFAULT_THETA};
use crate::simulation::barnes_hut::Octree;
use crate::simulation::boundary::Boundary;
use crate::simulation::driver::Simulation;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, DirectGravity, ForceField, TreeForces};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

const HALF_SIZE: f64 = 5.0;

fn bench_boundary() -> Boundary {
    Boundary::new(NVec3::repeat(-HALF_SIZE), NVec3::repeat(2.0 * HALF_SIZE))
}

/// Deterministic bodies inside the bench boundary, no rand needed
fn bench_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * HALF_SIZE,
                (i_f * 0.13).cos() * HALF_SIZE,
                (i_f * 0.07).sin() * HALF_SIZE,
            );
            Body::at_rest(x, 1.0)
        })
        .collect()
}

/// Time tree build, tree forces and direct forces for growing N
pub fn bench_gravity(capacity: usize) {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = System::new(bench_bodies(n));
        let mut out = vec![NVec3::zeros(); n];

        let t0 = Instant::now();
        let (tree, rejected) = Octree::build(bench_boundary(), capacity, &sys.bodies);
        let dt_build = t0.elapsed().as_secs_f64();

        let gravity = BarnesHutGravity {
            g: DEFAULT_G,
            theta: DEFAULT_THETA,
            leaf_forces: LeafForces::Direct,
        };
        let tree_forces = TreeForces { tree: &tree, gravity: &gravity };
        let direct = DirectGravity { g: DEFAULT_G };

        let t1 = Instant::now();
        tree_forces.forces(&sys, &mut out);
        let dt_tree = t1.elapsed().as_secs_f64();

        let t2 = Instant::now();
        direct.forces(&sys, &mut out);
        let dt_direct = t2.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, build = {:8.6} s, tree forces = {:8.6} s, direct = {:8.6} s, rejected = {}",
            dt_build,
            dt_tree,
            dt_direct,
            rejected.len()
        );
    }
}

/// Time full driver steps for growing N
pub fn bench_steps(capacity: usize, steps: usize) {
    let ns = [1000, 4000, 16000, 64000];

    for n in ns {
        let engine = Engine {
            capacity,
            theta: DEFAULT_THETA,
            leaf_forces: LeafForces::Ignore,
        };
        let parameters = Parameters {
            dt: 1.0,
            steps,
            seed: 0,
            g: DEFAULT_G,
        };
        let mut sim = Simulation::new(bench_boundary(), &engine, parameters, bench_bodies(n));

        let t0 = Instant::now();
        for _ in 0..steps {
            sim.step();
        }
        let per_step = t0.elapsed().as_secs_f64() / steps.max(1) as f64;

        println!("N = {n:6}, {:8.6} s / step over {steps} steps", per_step);
    }
}
