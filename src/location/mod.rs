//! Device location acquisition
//!
//! A platform-agnostic contract for one-shot and continuous position
//! requests, and a tracker that publishes the latest fix and its
//! reverse-geocoded address.

pub mod provider;
pub mod tracker;

pub use provider::{
    Coordinates, LocationProvider, PositionError, PositionErrorCode, PositionFix,
    PositionOptions, PositionWatch,
};
pub use tracker::{LocationState, LocationTracker, TrackerHandle};
