//! Data model for the tracked bus route
//!
//! Contains the stop sequence and spatial queries over it.

pub mod route;

pub use route::{BusRoute, Stop};
