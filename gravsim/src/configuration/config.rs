//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – octree bucket capacity, opening angle, leaf force mode
//! - [`ParametersConfig`] – time step, headless step count, seed, gravitational constant
//! - [`BoundaryConfig`]   – the box covered by the octree root
//! - [`CloudConfig`]      – optional uniformly random body cloud
//! - [`BodyConfig`]       – optional explicit bodies
//! - [`ViewConfig`]       – viewer window size and initial zoom
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   capacity: 2500          # bodies per bucket before a node subdivides
//!   theta: 6.0              # opening angle threshold (width / distance)
//!   leaf_forces: "ignore"   # or "direct"
//!
//! parameters:
//!   dt: 1.0e5               # time step
//!   steps: 100              # steps for a headless run
//!   seed: 42                # seed for the cloud generator
//!   G: 6.67e-11             # gravitational constant
//!
//! boundary:
//!   origin: [0.0, 0.0, 0.0]
//!   extents: [500.0, 400.0, 400.0]
//!
//! cloud:
//!   count: 20000
//!   min: [-250.0, -400.0, -200.0]
//!   max: [500.0, 800.0, 400.0]
//!   mass: 1.0
//!
//! bodies:
//!   - x: [10.0, 10.0, 10.0]
//!     m: 5.0
//!
//! view:
//!   width: 1000
//!   height: 800
//!   zoom: 1.0
//! ```
//!
//! Bodies generated or listed outside the boundary are discarded when the
//! octree is built.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::states::NVec3;

/// Gravitational constant used when a scenario does not set `G`
pub const DEFAULT_G: f64 = 6.67e-11;

/// Opening angle used when a scenario does not set `theta`
pub const DEFAULT_THETA: f64 = 6.0;

/// Errors raised while loading or validating a scenario
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{field}` must have 3 components, got {len}")]
    BadVector { field: &'static str, len: usize },

    #[error("`{field}` must be finite, got {values:?}")]
    NonFinite { field: &'static str, values: [f64; 3] },

    #[error("boundary extents must be non-negative, got {0:?}")]
    NegativeExtents([f64; 3]),

    #[error("bucket capacity must be at least 1")]
    ZeroCapacity,

    #[error("theta must be finite and non-negative, got {0}")]
    NegativeTheta(f64),

    #[error("time step must be finite, got {0}")]
    BadTimeStep(f64),

    #[error("body {index} must have a finite positive mass, got {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("cloud mass must be finite and positive, got {0}")]
    NonPositiveCloudMass(f64),

    #[error("cloud range is empty on axis {axis}: min {min} >= max {max}")]
    EmptyCloudRange { axis: usize, min: f64, max: f64 },

    #[error("cloud range on axis {axis} is not finite: min {min}, max {max}")]
    NonFiniteCloudRange { axis: usize, min: f64, max: f64 },

    #[error("scenario defines no bodies")]
    NoBodies,
}

/// How leaf buckets act on a query body during force evaluation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafForces {
    #[serde(rename = "ignore")] // leaves exert no force; only opened-or-approximated internal nodes count
    #[default]
    Ignore,

    #[serde(rename = "direct")] // resident bodies of leaves and opened nodes act as exact point masses
    Direct,
}

/// Octree and force evaluation settings
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize, // max bodies per bucket before subdivision
    pub theta: Option<f64>, // width / distance below which a node is a single mass
    #[serde(default)]
    pub leaf_forces: LeafForces,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64, // time step size
    #[serde(default = "default_steps")]
    pub steps: usize, // steps for a headless run
    #[serde(default)]
    pub seed: u64, // cloud generator seed
    #[serde(rename = "G")]
    pub g: Option<f64>, // gravitational constant
}

/// Box covered by the octree root
#[derive(Deserialize, Debug, Clone)]
pub struct BoundaryConfig {
    pub origin: Vec<f64>,
    pub extents: Vec<f64>,
}

/// Uniformly random bodies, all with the same mass and zero velocity
#[derive(Deserialize, Debug, Clone)]
pub struct CloudConfig {
    pub count: usize,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
    #[serde(default = "default_mass")]
    pub mass: f64,
}

/// Initial state of one explicit body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position
    #[serde(default)]
    pub v: Vec<f64>, // velocity, zero when omitted
    pub m: f64, // mass
}

/// Viewer window and initial zoom
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            zoom: 1.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub cloud: Option<CloudConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub view: ViewConfig,
}

fn default_capacity() -> usize {
    2500
}

fn default_steps() -> usize {
    100
}

fn default_mass() -> f64 {
    1.0
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if let Some(theta) = self.engine.theta {
            if !theta.is_finite() || theta < 0.0 {
                return Err(ConfigError::NegativeTheta(theta));
            }
        }
        if !self.parameters.dt.is_finite() {
            return Err(ConfigError::BadTimeStep(self.parameters.dt));
        }

        finite_vec3("boundary.origin", &self.boundary.origin)?;
        let extents = finite_vec3("boundary.extents", &self.boundary.extents)?;
        if extents.iter().any(|e| *e < 0.0) {
            return Err(ConfigError::NegativeExtents([extents.x, extents.y, extents.z]));
        }

        if let Some(cloud) = &self.cloud {
            let min = vec3("cloud.min", &cloud.min)?;
            let max = vec3("cloud.max", &cloud.max)?;
            for axis in 0..3 {
                // the sampler needs a finite span, not just finite ends
                if !min[axis].is_finite() || !max[axis].is_finite() || !(max[axis] - min[axis]).is_finite() {
                    return Err(ConfigError::NonFiniteCloudRange { axis, min: min[axis], max: max[axis] });
                }
                if min[axis] >= max[axis] {
                    return Err(ConfigError::EmptyCloudRange { axis, min: min[axis], max: max[axis] });
                }
            }
            if !cloud.mass.is_finite() || cloud.mass <= 0.0 {
                return Err(ConfigError::NonPositiveCloudMass(cloud.mass));
            }
        }

        for (index, body) in self.bodies.iter().enumerate() {
            finite_vec3("bodies.x", &body.x)?;
            if !body.v.is_empty() {
                finite_vec3("bodies.v", &body.v)?;
            }
            if !body.m.is_finite() || body.m <= 0.0 {
                return Err(ConfigError::NonPositiveMass { index, mass: body.m });
            }
        }

        let cloud_count = self.cloud.as_ref().map_or(0, |c| c.count);
        if cloud_count + self.bodies.len() == 0 {
            return Err(ConfigError::NoBodies);
        }

        Ok(())
    }
}

/// Convert a YAML list into a 3-vector, naming the field on failure
pub fn vec3(field: &'static str, values: &[f64]) -> Result<NVec3, ConfigError> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(ConfigError::BadVector { field, len: values.len() }),
    }
}

/// Like [`vec3`], also rejecting NaN and infinite components
fn finite_vec3(field: &'static str, values: &[f64]) -> Result<NVec3, ConfigError> {
    let v = vec3(field, values)?;
    if v.iter().all(|c| c.is_finite()) {
        Ok(v)
    } else {
        Err(ConfigError::NonFinite { field, values: [v.x, v.y, v.z] })
    }
}
