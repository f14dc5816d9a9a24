//! Ordered stop sequence of a fixed bus route

use std::cmp::Ordering;

use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use rstar::{RTree, primitives::GeomWithData};

use crate::{Error, Kilometers, MAX_CANDIDATE_STOPS, RouteStopId};

type IndexedStop = GeomWithData<[f64; 2], RouteStopId>;

/// A named, geolocated waypoint on the route
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    /// WGS-84, x = longitude, y = latitude
    pub position: Point<f64>,
    pub info: String,
}

impl Stop {
    pub fn new(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        info: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: Point::new(lng, lat),
            info: info.into(),
        }
    }
}

/// Immutable ordered sequence of stops, first to last
///
/// Stops are identified by their index in the sequence. An R-tree over the
/// stop positions answers nearest-stop queries; candidates from the tree are
/// refined with haversine distance.
#[derive(Debug, Clone)]
pub struct BusRoute {
    stops: Vec<Stop>,
    index: RTree<IndexedStop>,
}

impl BusRoute {
    /// Builds a route from an ordered stop sequence
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteTooShort`] for fewer than two stops.
    pub fn new(stops: Vec<Stop>) -> Result<Self, Error> {
        if stops.len() < 2 {
            return Err(Error::RouteTooShort);
        }

        let indexed = stops
            .iter()
            .enumerate()
            .map(|(id, stop)| IndexedStop::new([stop.position.x(), stop.position.y()], id))
            .collect();

        Ok(Self {
            stops,
            index: RTree::bulk_load(indexed),
        })
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn get(&self, id: RouteStopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// First stop of the route
    pub fn origin(&self) -> &Stop {
        &self.stops[0]
    }

    /// Last stop of the route
    pub fn terminus(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    /// Stop closest to the given position
    pub fn nearest_stop(&self, position: Point<f64>) -> RouteStopId {
        self.index
            .nearest_neighbor_iter(&[position.x(), position.y()])
            .take(MAX_CANDIDATE_STOPS)
            .map(|candidate| {
                let stop = &self.stops[candidate.data];
                let meters = Haversine.distance(position, stop.position);
                (candidate.data, meters)
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map_or(0, |(id, _)| id)
    }

    /// Next upcoming stop along the route, or `None` at the terminus
    pub fn next_stop(&self, position: Point<f64>) -> Option<RouteStopId> {
        let nearest = self.nearest_stop(position);
        (nearest + 1 < self.stops.len()).then_some(nearest + 1)
    }

    /// Straight-line length of the route, stop to stop
    pub fn length_km(&self) -> Kilometers {
        self.stops
            .iter()
            .tuple_windows()
            .map(|(a, b)| Haversine.distance(a.position, b.position))
            .sum::<f64>()
            / 1000.0
    }
}
