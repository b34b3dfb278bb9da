pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::boundary::Boundary;
pub use simulation::barnes_hut::{Octree, OctreeNode, OctreeStats};
pub use simulation::forces::{ForceField, BarnesHutGravity, TreeForces, DirectGravity};
pub use simulation::integrator::euler_step;
pub use simulation::driver::Simulation;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ConfigError, LeafForces};

pub use visualization::{projection::{project, Projection, ViewState}, viewer::run_viewer};

pub use benchmark::benchmark::{bench_gravity, bench_steps};
