pub mod backend;
pub mod config;
pub mod dashboard;
pub mod map;
pub mod tracing;
