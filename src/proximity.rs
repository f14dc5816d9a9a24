//! Distance and ETA to the next upcoming stop

use std::fmt;

use geo::{Distance, Haversine, Point};
use log::warn;

use crate::model::BusRoute;
use crate::{DEFAULT_AVERAGE_SPEED_KMH, Kilometers, Minutes, RouteStopId};

/// Great-circle distance between two points, kilometers
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> Kilometers {
    Haversine.distance(a, b) / 1000.0
}

/// Straight-line estimate toward the next upcoming stop
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityEstimate {
    pub next_stop: RouteStopId,
    pub next_stop_name: String,
    pub distance_km: Kilometers,
    pub eta_minutes: Minutes,
}

impl fmt::Display for ProximityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next Stop: {}", self.next_stop_name)?;
        writeln!(f, "Distance to Next Stop: {:.2} km", self.distance_km)?;
        write!(f, "ETA to Next Stop: {:.2} minutes", self.eta_minutes)
    }
}

/// Estimate at a position, `None` once the terminus is the nearest stop
pub fn estimate_at(
    route: &BusRoute,
    position: Point<f64>,
    average_speed_kmh: f64,
) -> Option<ProximityEstimate> {
    let next = route.next_stop(position)?;
    let stop = &route.stops()[next];
    let distance = distance_km(position, stop.position);

    Some(ProximityEstimate {
        next_stop: next,
        next_stop_name: stop.name.clone(),
        distance_km: distance,
        eta_minutes: (distance / average_speed_kmh) * 60.0,
    })
}

/// Recomputes the estimate whenever the position changes
///
/// A pure function of (route, position), memoized on the last position so
/// repeated reads between updates cost nothing.
#[derive(Debug, Clone)]
pub struct ProximityEstimator {
    average_speed_kmh: f64,
    last: Option<(Point<f64>, Option<ProximityEstimate>)>,
}

impl ProximityEstimator {
    pub fn new(average_speed_kmh: f64) -> Self {
        let speed = if average_speed_kmh > 0.0 {
            average_speed_kmh
        } else {
            warn!("ignoring non-positive average speed {average_speed_kmh} km/h");
            DEFAULT_AVERAGE_SPEED_KMH
        };

        Self {
            average_speed_kmh: speed,
            last: None,
        }
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    pub fn estimate(
        &mut self,
        route: &BusRoute,
        position: Point<f64>,
    ) -> Option<ProximityEstimate> {
        if let Some((last_position, cached)) = &self.last
            && *last_position == position
        {
            return cached.clone();
        }

        let estimate = estimate_at(route, position, self.average_speed_kmh);
        self.last = Some((position, estimate.clone()));
        estimate
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::loading::kigali_route;

    #[test]
    fn distance_is_symmetric_and_zero_at_identity() {
        let nyabugogo = Point::new(30.0445426438232, -1.939826787816454);
        let kimironko = Point::new(30.13020167024439, -1.9365670876910166);

        assert_relative_eq!(
            distance_km(nyabugogo, kimironko),
            distance_km(kimironko, nyabugogo)
        );
        assert_eq!(distance_km(nyabugogo, nyabugogo), 0.0);
    }

    #[test]
    fn eta_equals_distance_at_sixty() {
        let route = kigali_route();
        let estimate = estimate_at(&route, route.origin().position, 60.0).unwrap();
        assert_relative_eq!(estimate.eta_minutes, estimate.distance_km);
    }

    #[test]
    fn at_the_origin_the_next_stop_is_stop_a() {
        let route = kigali_route();
        let estimate = estimate_at(&route, route.origin().position, 60.0).unwrap();

        assert_eq!(estimate.next_stop_name, "Stop A");
        let expected = distance_km(route.origin().position, route.stops()[1].position);
        assert_relative_eq!(estimate.distance_km, expected);
        assert_relative_eq!(estimate.eta_minutes, expected);
    }

    #[test]
    fn at_the_terminus_there_is_no_estimate() {
        let route = kigali_route();
        assert!(estimate_at(&route, route.terminus().position, 60.0).is_none());
    }

    #[test]
    fn slower_speed_stretches_the_eta() {
        let route = kigali_route();
        let fast = estimate_at(&route, route.origin().position, 60.0).unwrap();
        let slow = estimate_at(&route, route.origin().position, 30.0).unwrap();
        assert_relative_eq!(slow.eta_minutes, fast.eta_minutes * 2.0);
    }

    #[test]
    fn estimator_memoizes_on_the_position() {
        let route = kigali_route();
        let mut estimator = ProximityEstimator::new(60.0);
        let position = route.origin().position;

        let first = estimator.estimate(&route, position).unwrap();
        let second = estimator.estimate(&route, position).unwrap();
        assert_eq!(first, second);

        let moved = estimator.estimate(&route, route.stops()[1].position).unwrap();
        assert_eq!(moved.next_stop_name, "Stop B");
    }

    #[test]
    fn non_positive_speed_falls_back_to_the_default() {
        let estimator = ProximityEstimator::new(0.0);
        assert_eq!(estimator.average_speed_kmh(), DEFAULT_AVERAGE_SPEED_KMH);
    }

    #[test]
    fn display_rounds_to_two_decimals() {
        let estimate = ProximityEstimate {
            next_stop: 1,
            next_stop_name: "Stop A".to_string(),
            distance_km: 1.2345,
            eta_minutes: 1.2345,
        };
        let text = estimate.to_string();
        assert!(text.contains("Distance to Next Stop: 1.23 km"));
        assert!(text.contains("ETA to Next Stop: 1.23 minutes"));
    }
}
