//! Markers, info windows and camera of the route map

use geo::Point;

use crate::location::LocationState;
use crate::model::BusRoute;
use crate::{Error, RouteStopId};

pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy)]
pub struct MapCamera {
    pub center: Point<f64>,
    pub zoom: u8,
}

#[derive(Debug, Clone)]
pub enum Marker {
    Stop {
        id: RouteStopId,
        name: String,
        position: Point<f64>,
    },
    CurrentLocation {
        position: Point<f64>,
    },
}

/// Open info window of the selected stop
#[derive(Debug, Clone)]
pub struct StopInfoWindow {
    pub id: RouteStopId,
    pub name: String,
    pub info: String,
    pub position: Point<f64>,
}

/// Open info window anchored to the current-location marker
#[derive(Debug, Clone)]
pub struct LocationInfoWindow {
    pub position: Point<f64>,
    pub address: Option<String>,
}

/// Selection state of the map
///
/// At most one stop info window is open at a time; the current-location
/// window toggles independently of stop selection. Both start closed.
#[derive(Debug, Clone)]
pub struct MapView {
    camera: MapCamera,
    selected_stop: Option<RouteStopId>,
    location_window_open: bool,
}

impl MapView {
    /// Camera starts centered on the first stop
    pub fn new(route: &BusRoute) -> Self {
        Self {
            camera: MapCamera {
                center: route.origin().position,
                zoom: DEFAULT_ZOOM,
            },
            selected_stop: None,
            location_window_open: false,
        }
    }

    pub fn camera(&self) -> MapCamera {
        self.camera
    }

    /// Opens the stop's info window, closing any previously open one
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStop`] for an index outside the route.
    pub fn select_stop(&mut self, route: &BusRoute, id: RouteStopId) -> Result<(), Error> {
        if id >= route.len() {
            return Err(Error::InvalidStop(id));
        }
        self.selected_stop = Some(id);
        Ok(())
    }

    pub fn close_stop_window(&mut self) {
        self.selected_stop = None;
    }

    pub fn selected_stop(&self) -> Option<RouteStopId> {
        self.selected_stop
    }

    pub fn toggle_location_window(&mut self) {
        self.location_window_open = !self.location_window_open;
    }

    pub fn close_location_window(&mut self) {
        self.location_window_open = false;
    }

    pub fn location_window_open(&self) -> bool {
        self.location_window_open
    }

    /// One marker per stop, plus the current-location marker when known
    pub fn markers(&self, route: &BusRoute, location: Option<Point<f64>>) -> Vec<Marker> {
        let mut markers: Vec<Marker> = route
            .stops()
            .iter()
            .enumerate()
            .map(|(id, stop)| Marker::Stop {
                id,
                name: stop.name.clone(),
                position: stop.position,
            })
            .collect();

        if let Some(position) = location {
            markers.push(Marker::CurrentLocation { position });
        }

        markers
    }

    pub fn stop_window(&self, route: &BusRoute) -> Option<StopInfoWindow> {
        let id = self.selected_stop?;
        let stop = route.get(id)?;
        Some(StopInfoWindow {
            id,
            name: stop.name.clone(),
            info: stop.info.clone(),
            position: stop.position,
        })
    }

    /// The current-location window; needs an open toggle and a known fix
    pub fn location_window(&self, state: &LocationState) -> Option<LocationInfoWindow> {
        if !self.location_window_open {
            return None;
        }
        let position = state.position.as_ref()?.point();
        Some(LocationInfoWindow {
            position,
            address: state.address.clone(),
        })
    }
}
