//! Octree and force evaluation settings
//!
//! Selects the bucket capacity, the opening angle and how leaf buckets
//! act on query bodies

use crate::configuration::config::{EngineConfig, LeafForces, DEFAULT_THETA};

#[derive(Debug, Clone)]
pub struct Engine {
    pub capacity: usize, // bodies per bucket before a node subdivides
    pub theta: f64, // opening angle threshold
    pub leaf_forces: LeafForces, // ignore or direct
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            capacity: cfg.capacity,
            theta: cfg.theta.unwrap_or(DEFAULT_THETA),
            leaf_forces: cfg.leaf_forces,
        }
    }
}
