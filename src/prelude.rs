pub use crate::{DEFAULT_AVERAGE_SPEED_KMH, MAX_CANDIDATE_STOPS};

// Re-export key components
pub use crate::directions::{
    DirectionsApi, DirectionsPanel, DirectionsRenderer, DirectionsRequest, DirectionsResponse,
    HttpDirections, PanelSummary, RouteAlternative, TravelMode,
};
pub use crate::geocode::{HttpGeocoder, ReverseGeocode};
pub use crate::loading::{TrackerConfig, kigali_route, route_from_path};
pub use crate::location::{
    LocationProvider, LocationState, LocationTracker, PositionFix, TrackerHandle,
};
pub use crate::model::{BusRoute, Stop};
pub use crate::proximity::{ProximityEstimate, ProximityEstimator, distance_km};
pub use crate::session::{MapSession, ViewSnapshot};
pub use crate::view::{MapCamera, MapView, Marker, route_to_geojson};

// Core types of the tracked route
pub use crate::Error;
pub use crate::Kilometers;
pub use crate::Minutes;
pub use crate::RouteStopId;
