//! Map view state and its export for the rendering frontend

pub mod map_view;
pub mod to_geojson;

pub use map_view::{
    DEFAULT_ZOOM, LocationInfoWindow, MapCamera, MapView, Marker, StopInfoWindow,
};
pub use to_geojson::{route_to_geojson, route_to_geojson_string};
