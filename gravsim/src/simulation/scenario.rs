//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`: a [`Simulation`] with its octree built and aggregated, plus the
//! viewer settings.
//!
//! `Scenario` is inserted into Bevy as a `Resource` and consumed by the
//! integration and drawing systems of the viewer.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{vec3, CloudConfig, ConfigError, ScenarioConfig, ViewConfig, DEFAULT_G};
use crate::simulation::boundary::Boundary;
use crate::simulation::driver::Simulation;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

#[derive(Resource)]
pub struct Scenario {
    pub simulation: Simulation,
    pub view: ViewConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let boundary = Boundary::new(
            vec3("boundary.origin", &cfg.boundary.origin)?,
            vec3("boundary.extents", &cfg.boundary.extents)?,
        );

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            dt: cfg.parameters.dt,
            steps: cfg.parameters.steps,
            seed: cfg.parameters.seed,
            g: cfg.parameters.g.unwrap_or(DEFAULT_G),
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine::from(&cfg.engine);

        // Cloud bodies first, then explicit ones, in one candidate list
        let mut candidates = match &cfg.cloud {
            Some(cloud) => generate_cloud(cloud, parameters.seed)?,
            None => Vec::new(),
        };
        for bc in &cfg.bodies {
            let v = if bc.v.is_empty() {
                NVec3::zeros()
            } else {
                vec3("bodies.v", &bc.v)?
            };
            candidates.push(Body {
                x: vec3("bodies.x", &bc.x)?,
                v,
                m: bc.m,
            });
        }

        log::info!(
            "scenario: {} candidate bodies, capacity {}, theta {}, leaf forces {:?}",
            candidates.len(),
            engine.capacity,
            engine.theta,
            engine.leaf_forces
        );

        Ok(Self {
            simulation: Simulation::new(boundary, &engine, parameters, candidates),
            view: cfg.view,
        })
    }
}

/// Uniformly random bodies at rest inside `[min, max)` on each axis
pub fn generate_cloud(cloud: &CloudConfig, seed: u64) -> Result<Vec<Body>, ConfigError> {
    let min = vec3("cloud.min", &cloud.min)?;
    let max = vec3("cloud.max", &cloud.max)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let bodies = (0..cloud.count)
        .map(|_| {
            let x = NVec3::new(
                rng.random_range(min.x..max.x),
                rng.random_range(min.y..max.y),
                rng.random_range(min.z..max.z),
            );
            Body::at_rest(x, cloud.mass)
        })
        .collect();

    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> CloudConfig {
        CloudConfig {
            count: 50,
            min: vec![-1.0, -2.0, -3.0],
            max: vec![1.0, 2.0, 3.0],
            mass: 1.0,
        }
    }

    #[test]
    fn cloud_is_seeded_and_in_range() {
        let a = generate_cloud(&cloud(), 7).unwrap();
        let b = generate_cloud(&cloud(), 7).unwrap();

        assert_eq!(a.len(), 50);
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x, q.x);
            assert!(p.x.x >= -1.0 && p.x.x < 1.0);
            assert!(p.x.y >= -2.0 && p.x.y < 2.0);
            assert!(p.x.z >= -3.0 && p.x.z < 3.0);
            assert_eq!(p.v, NVec3::zeros());
        }
    }
}
