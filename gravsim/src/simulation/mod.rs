pub mod states;
pub mod params;
pub mod engine;
pub mod boundary;
pub mod barnes_hut;
pub mod forces;
pub mod integrator;
pub mod driver;
pub mod scenario;
