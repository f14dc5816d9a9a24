use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::Error;
use crate::model::{BusRoute, Stop};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawStop {
    name: String,
    lat: f64,
    lng: f64,
    info: String,
}

/// Loads a route from a `name,lat,lng,info` CSV file
///
/// Rows that fail to parse are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fewer than two stops
/// survive parsing.
pub fn route_from_path(path: &Path) -> Result<BusRoute, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open route file '{}': {}", path.display(), e),
        )
    })?;
    route_from_reader(file)
}

/// Loads a route from CSV data
///
/// # Errors
///
/// Returns [`Error::RouteTooShort`] when fewer than two stops parse.
pub fn route_from_reader<R: Read>(reader: R) -> Result<BusRoute, Error> {
    let stops = csv::Reader::from_reader(reader)
        .deserialize::<RawStop>()
        .filter_map(Result::ok)
        .map(|raw| Stop::new(raw.name, raw.lat, raw.lng, raw.info))
        .collect();

    BusRoute::new(stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_stops_in_order() {
        let data = "\
name,lat,lng,info
Nyabugogo,-1.9398,30.0445,Starting Point
Stop A,-1.9355,30.0602,
Kimironko,-1.9366,30.1302,Ending Point
";
        let route = route_from_reader(data.as_bytes()).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.origin().name, "Nyabugogo");
        assert_eq!(route.terminus().info, "Ending Point");
        assert!((route.stops()[1].position.x() - 30.0602).abs() < 1e-9);
    }

    #[test]
    fn bad_rows_are_skipped() {
        let data = "\
name,lat,lng,info
Nyabugogo,-1.9398,30.0445,Starting Point
Broken,not-a-number,30.0,oops
Kimironko,-1.9366,30.1302,Ending Point
";
        let route = route_from_reader(data.as_bytes()).unwrap();
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn too_few_stops_is_an_error() {
        let data = "name,lat,lng,info\nOnly,-1.9,30.0,\n";
        assert!(matches!(
            route_from_reader(data.as_bytes()),
            Err(Error::RouteTooShort)
        ));
    }
}
