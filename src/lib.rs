//! Live tracking of a fixed bus route
//!
//! Models a single-route map view: the ordered stop sequence, the device's
//! current position, distance/ETA to the next upcoming stop, marker and
//! info-window state, and driving-direction alternatives fetched from an
//! external provider. Rendering is left to a map frontend, which consumes
//! the snapshots (and GeoJSON) this crate produces.

pub mod directions;
pub mod geocode;
pub mod loading;
pub mod location;
pub mod model;
pub mod prelude;
pub mod proximity;
pub mod session;
pub mod view;

mod error;

pub use error::Error;

/// Index of a stop within its route's ordered sequence
pub type RouteStopId = usize;

/// Great-circle distance, kilometers
pub type Kilometers = f64;

/// Travel time estimate, minutes
pub type Minutes = f64;

/// Candidates taken from the spatial index before haversine refinement
pub const MAX_CANDIDATE_STOPS: usize = 5;

/// Assumed average driving speed when no live speed is available, km/h
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 60.0;
