pub mod controller;
pub mod format;
pub mod log_view;
pub mod model;
pub mod profile;
