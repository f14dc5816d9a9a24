//! Driving directions between the route's endpoints
//!
//! The route itself comes from an external provider; this module holds the
//! wire types, the query client and the alternatives panel.

pub mod client;
pub mod panel;
pub mod types;

pub use client::{DirectionsApi, HttpDirections};
pub use panel::{DirectionsPanel, DirectionsRenderer, PanelSummary};
pub use types::{
    DirectionsRequest, DirectionsResponse, RouteAlternative, RouteLeg, TextValue, TravelMode,
};
