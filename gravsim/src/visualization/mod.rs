pub mod projection;
pub mod viewer;
