//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and headless step count,
//! - gravitational constant `g`,
//! - seed for the body generator

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub steps: usize, // steps for a headless run
    pub seed: u64, // deterministic seed
    pub g: f64, // gravitational constant
}
