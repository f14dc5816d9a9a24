//! Route data and configuration loading

mod config;
mod kigali;
mod route_file;

pub use config::TrackerConfig;
pub use kigali::kigali_route;
pub use route_file::{route_from_path, route_from_reader};
