//! GeoJSON export of the route and markers for the map frontend

use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::model::{BusRoute, Stop};
use crate::{Kilometers, RouteStopId};

/// Converts the route polyline, stop markers and (when known) the
/// current-location marker to a `FeatureCollection`
pub fn route_to_geojson(
    route: &BusRoute,
    location: Option<Point<f64>>,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(route.len() + 2);

    features.push(route_line_feature(route)?);
    for (id, stop) in route.stops().iter().enumerate() {
        features.push(stop_feature(id, stop)?);
    }
    if let Some(position) = location {
        features.push(location_feature(position)?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn route_to_geojson_string(
    route: &BusRoute,
    location: Option<Point<f64>>,
) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(route, location)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn route_line_feature(route: &BusRoute) -> Result<Feature, Error> {
    let coords: Vec<Coord<f64>> = route
        .stops()
        .iter()
        .map(|stop| stop.position.into())
        .collect();
    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));
    let length: Kilometers = route.length_km();

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "route",
            "stop_count": route.len(),
            "length_km": length,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn stop_feature(id: RouteStopId, stop: &Stop) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&stop.position));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "stop",
            "stop_index": id,
            "name": stop.name,
            "info": stop.info,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn location_feature(position: Point<f64>) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&position));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "current_location",
            "title": "Current Location",
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
