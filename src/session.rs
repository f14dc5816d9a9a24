//! The map-view session: one state store, derived snapshots
//!
//! Holds the discrete pieces of state (route, selection, latest fix,
//! alternatives) and derives everything the frontend renders as pure
//! functions of them.

use geojson::FeatureCollection;
use log::warn;

use crate::directions::{DirectionsApi, DirectionsPanel, DirectionsRenderer, PanelSummary};
use crate::geocode::ReverseGeocode;
use crate::loading::TrackerConfig;
use crate::location::{
    LocationProvider, LocationState, LocationTracker, PositionFix, TrackerHandle,
};
use crate::model::BusRoute;
use crate::proximity::{ProximityEstimate, ProximityEstimator};
use crate::view::{
    LocationInfoWindow, MapCamera, MapView, Marker, StopInfoWindow, route_to_geojson,
};
use crate::{Error, RouteStopId};

/// Render model derived from the current session state
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub camera: MapCamera,
    pub markers: Vec<Marker>,
    pub stop_window: Option<StopInfoWindow>,
    pub location_window: Option<LocationInfoWindow>,
    /// Present only when a position fix exists and a stop is still ahead
    pub next_stop_panel: Option<ProximityEstimate>,
    pub directions: Option<PanelSummary>,
    /// Labels of the selectable route alternatives, in provider order
    pub route_labels: Vec<String>,
}

pub struct MapSession<R: DirectionsRenderer> {
    config: TrackerConfig,
    route: BusRoute,
    view: MapView,
    panel: DirectionsPanel<R>,
    tracker: TrackerHandle,
    estimator: ProximityEstimator,
}

impl<R: DirectionsRenderer> MapSession<R> {
    /// Starts tracking and issues the directions query
    ///
    /// A failed directions query degrades to an empty panel; location
    /// failures degrade to a map without the current-location overlays.
    /// Must be called from within a tokio runtime.
    pub async fn start<P, G, A>(
        config: TrackerConfig,
        route: BusRoute,
        provider: P,
        geocoder: G,
        directions: &A,
        renderer: R,
    ) -> Self
    where
        P: LocationProvider + 'static,
        G: ReverseGeocode + 'static,
        A: DirectionsApi + ?Sized,
    {
        let tracker = LocationTracker::start(provider, geocoder);
        let view = MapView::new(&route);
        let estimator = ProximityEstimator::new(config.average_speed_kmh);

        let mut panel = DirectionsPanel::new(renderer);
        if let Err(e) = panel.load(directions, &route).await {
            warn!("directions query failed: {e}");
        }

        Self {
            config,
            route,
            view,
            panel,
            tracker,
            estimator,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn route(&self) -> &BusRoute {
        &self.route
    }

    /// Latest position and address published by the tracker
    pub fn location(&self) -> LocationState {
        self.tracker.state()
    }

    /// Opens a stop's info window, closing any previously open one
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStop`] for an index outside the route.
    pub fn select_stop(&mut self, id: RouteStopId) -> Result<(), Error> {
        self.view.select_stop(&self.route, id)
    }

    pub fn close_stop_window(&mut self) {
        self.view.close_stop_window();
    }

    pub fn toggle_location_window(&mut self) {
        self.view.toggle_location_window();
    }

    /// Switches the rendered route alternative without re-querying
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRouteIndex`] for an index outside the set.
    pub fn select_route(&mut self, index: usize) -> Result<(), Error> {
        self.panel.select(index)
    }

    /// Derives the render model from the current state
    pub fn snapshot(&mut self) -> ViewSnapshot {
        let location = self.tracker.state();
        let position = location.position.as_ref().map(PositionFix::point);
        let next_stop_panel =
            position.and_then(|p| self.estimator.estimate(&self.route, p));

        ViewSnapshot {
            camera: self.view.camera(),
            markers: self.view.markers(&self.route, position),
            stop_window: self.view.stop_window(&self.route),
            location_window: self.view.location_window(&location),
            next_stop_panel,
            directions: self.panel.summary(),
            route_labels: self
                .panel
                .alternatives()
                .iter()
                .map(|route| route.summary.clone())
                .collect(),
        }
    }

    /// Route and markers for the map frontend
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJsonError`] if feature construction fails.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let state = self.tracker.state();
        let position = state.position.as_ref().map(PositionFix::point);
        route_to_geojson(&self.route, position)
    }

    /// Ends the session: cancels the position watch, detaches the renderer
    pub fn close(mut self) {
        self.tracker.stop();
        self.panel.detach();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::DateTime;
    use tokio::sync::mpsc;

    use super::*;
    use crate::directions::{
        DirectionsRequest, DirectionsResponse, RouteAlternative, RouteLeg, TextValue,
    };
    use crate::loading::kigali_route;
    use crate::location::{PositionError, PositionOptions, PositionWatch};
    use crate::proximity::distance_km;

    fn fix(lat: f64, lng: f64) -> PositionFix {
        PositionFix::new(lat, lng, DateTime::from_timestamp(1_700_000_000, 0).unwrap())
    }

    struct StaticProvider {
        fix: Option<PositionFix>,
        watch: Mutex<Option<PositionWatch>>,
        _updates: Option<mpsc::Sender<PositionFix>>,
    }

    impl StaticProvider {
        fn denied() -> Self {
            Self {
                fix: None,
                watch: Mutex::new(None),
                _updates: None,
            }
        }

        fn at(fix: PositionFix) -> Self {
            // The held sender keeps the subscription open without updates
            let (tx, rx) = mpsc::channel(1);
            Self {
                fix: Some(fix),
                watch: Mutex::new(Some(PositionWatch::new(rx))),
                _updates: Some(tx),
            }
        }
    }

    #[async_trait]
    impl LocationProvider for StaticProvider {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<PositionFix, PositionError> {
            self.fix.clone().ok_or_else(PositionError::permission_denied)
        }

        async fn watch_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<PositionWatch, PositionError> {
            self.watch
                .lock()
                .unwrap()
                .take()
                .ok_or_else(PositionError::permission_denied)
        }
    }

    struct StaticGeocoder(Option<String>);

    #[async_trait]
    impl ReverseGeocode for StaticGeocoder {
        async fn reverse(&self, _position: geo::Point<f64>) -> Result<String, Error> {
            self.0.clone().ok_or(Error::EmptyProviderResponse)
        }
    }

    struct StaticApi(Option<DirectionsResponse>);

    #[async_trait]
    impl DirectionsApi for StaticApi {
        async fn route(
            &self,
            _request: &DirectionsRequest,
        ) -> Result<DirectionsResponse, Error> {
            self.0.clone().ok_or(Error::EmptyProviderResponse)
        }
    }

    #[derive(Clone, Default)]
    struct TestRenderer {
        detached: Arc<Mutex<bool>>,
        rendered: Arc<Mutex<usize>>,
    }

    impl DirectionsRenderer for TestRenderer {
        fn render(&mut self, _response: &DirectionsResponse) {
            *self.rendered.lock().unwrap() += 1;
        }

        fn set_route_index(&mut self, _index: usize) {}

        fn detach(&mut self) {
            *self.detached.lock().unwrap() = true;
        }
    }

    fn directions_response() -> DirectionsResponse {
        DirectionsResponse {
            routes: vec![
                RouteAlternative {
                    summary: "KN 1 Rd".to_string(),
                    legs: vec![RouteLeg {
                        start_address: "Nyabugogo, Kigali, Rwanda".to_string(),
                        end_address: "Kimironko, Kigali, Rwanda".to_string(),
                        distance: Some(TextValue {
                            text: "12.3 km".to_string(),
                            value: 12300,
                        }),
                        duration: Some(TextValue {
                            text: "25 mins".to_string(),
                            value: 1500,
                        }),
                    }],
                },
                RouteAlternative {
                    summary: "KG 11 Ave".to_string(),
                    legs: vec![RouteLeg::default()],
                },
            ],
            status: "OK".to_string(),
        }
    }

    // Lets the tracker tasks run; paused time makes this deterministic
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn tracks_the_kigali_scenario() {
        let route = kigali_route();
        let origin = route.origin().position;
        let api = StaticApi(Some(directions_response()));

        let mut session = MapSession::start(
            TrackerConfig::default(),
            route,
            StaticProvider::at(fix(-1.939826787816454, 30.0445426438232)),
            StaticGeocoder(Some("Nyabugogo Taxi Park, Kigali, Rwanda".to_string())),
            &api,
            TestRenderer::default(),
        )
        .await;
        settle().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.markers.len(), 8);

        let panel = snapshot.next_stop_panel.unwrap();
        assert_eq!(panel.next_stop_name, "Stop A");
        let expected = distance_km(origin, session.route().stops()[1].position);
        assert!((panel.distance_km - expected).abs() < 1e-9);
        assert!((panel.eta_minutes - expected).abs() < 1e-9);

        let directions = snapshot.directions.unwrap();
        assert_eq!(directions.route_summary, "KN 1 Rd");
        assert_eq!(directions.start, "Nyabugogo");
        assert_eq!(snapshot.route_labels, vec!["KN 1 Rd", "KG 11 Ave"]);

        // The location window opens once toggled, showing the address
        assert!(snapshot.location_window.is_none());
        session.toggle_location_window();
        let window = session.snapshot().location_window.unwrap();
        assert_eq!(
            window.address.as_deref(),
            Some("Nyabugogo Taxi Park, Kigali, Rwanda")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn permission_denied_degrades_to_a_bare_map() {
        let api = StaticApi(Some(directions_response()));
        let mut session = MapSession::start(
            TrackerConfig::default(),
            kigali_route(),
            StaticProvider::denied(),
            StaticGeocoder(Some("unused".to_string())),
            &api,
            TestRenderer::default(),
        )
        .await;
        settle().await;

        session.toggle_location_window();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.markers.len(), 7);
        assert!(snapshot.next_stop_panel.is_none());
        assert!(snapshot.location_window.is_none());
        assert!(session.location().address.is_none());
        // Directions do not depend on geolocation
        assert!(snapshot.directions.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn a_failed_directions_query_leaves_the_panel_empty() {
        let api = StaticApi(None);
        let mut session = MapSession::start(
            TrackerConfig::default(),
            kigali_route(),
            StaticProvider::denied(),
            StaticGeocoder(None),
            &api,
            TestRenderer::default(),
        )
        .await;
        settle().await;

        let snapshot = session.snapshot();
        assert!(snapshot.directions.is_none());
        assert!(snapshot.route_labels.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_stops_and_routes_goes_through_the_session() {
        let api = StaticApi(Some(directions_response()));
        let mut session = MapSession::start(
            TrackerConfig::default(),
            kigali_route(),
            StaticProvider::denied(),
            StaticGeocoder(None),
            &api,
            TestRenderer::default(),
        )
        .await;

        session.select_stop(3).unwrap();
        assert_eq!(session.snapshot().stop_window.unwrap().name, "Stop C");
        assert!(session.select_stop(9).is_err());

        session.select_route(1).unwrap();
        assert_eq!(
            session.snapshot().directions.unwrap().route_summary,
            "KG 11 Ave"
        );
        assert!(session.select_route(2).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn close_detaches_the_renderer() {
        let api = StaticApi(Some(directions_response()));
        let renderer = TestRenderer::default();
        let detached = renderer.detached.clone();

        let session = MapSession::start(
            TrackerConfig::default(),
            kigali_route(),
            StaticProvider::denied(),
            StaticGeocoder(None),
            &api,
            renderer,
        )
        .await;

        session.close();
        assert!(*detached.lock().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn geojson_reflects_the_location() {
        let api = StaticApi(Some(directions_response()));
        let session = MapSession::start(
            TrackerConfig::default(),
            kigali_route(),
            StaticProvider::at(fix(-1.94, 30.05)),
            StaticGeocoder(None),
            &api,
            TestRenderer::default(),
        )
        .await;
        settle().await;

        let collection = session.to_geojson().unwrap();
        // Route line, seven stops, one location marker
        assert_eq!(collection.features.len(), 9);
    }
}
