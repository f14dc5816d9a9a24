//! Route alternatives panel
//!
//! Owns the alternative list and the selected index, and drives an external
//! renderer. Selection re-renders without re-querying.

use super::client::DirectionsApi;
use super::types::{DirectionsRequest, DirectionsResponse, RouteAlternative, RouteLeg};
use crate::Error;
use crate::model::BusRoute;

/// The map SDK surface the panel drives
pub trait DirectionsRenderer {
    /// Draws the full route set on the map
    fn render(&mut self, response: &DirectionsResponse);
    /// Switches the rendered route
    fn set_route_index(&mut self, index: usize);
    /// Removes the rendering from the map
    fn detach(&mut self);
}

/// What the panel displays for the selected alternative
///
/// All strings are provider-supplied; addresses are truncated at the first
/// comma.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSummary {
    pub route_summary: String,
    pub start: String,
    pub end: String,
    pub distance: Option<String>,
    pub duration: Option<String>,
}

pub struct DirectionsPanel<R: DirectionsRenderer> {
    renderer: R,
    routes: Vec<RouteAlternative>,
    selected: usize,
    detached: bool,
}

impl<R: DirectionsRenderer> DirectionsPanel<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            routes: Vec::new(),
            selected: 0,
            detached: false,
        }
    }

    /// Queries driving directions between the route's endpoints
    ///
    /// On success the full set is rendered and the first alternative
    /// selected; on failure the panel keeps showing nothing.
    ///
    /// # Errors
    ///
    /// Propagates transport errors and empty/rejected provider responses.
    pub async fn load<A>(&mut self, api: &A, route: &BusRoute) -> Result<(), Error>
    where
        A: DirectionsApi + ?Sized,
    {
        let request = DirectionsRequest::driving(
            route.origin().name.clone(),
            route.terminus().name.clone(),
        );
        let response = api.route(&request).await?;

        self.renderer.render(&response);
        self.routes = response.routes;
        self.selected = 0;
        Ok(())
    }

    pub fn alternatives(&self) -> &[RouteAlternative] {
        &self.routes
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_route(&self) -> Option<&RouteAlternative> {
        self.routes.get(self.selected)
    }

    /// First leg of the selected alternative
    pub fn leg(&self) -> Option<&RouteLeg> {
        self.selected_route()?.first_leg()
    }

    /// Switches the rendered alternative without re-querying
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRouteIndex`] for an index outside the set.
    pub fn select(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.routes.len() {
            return Err(Error::InvalidRouteIndex(index));
        }
        self.selected = index;
        self.renderer.set_route_index(index);
        Ok(())
    }

    /// Summary of the selected alternative, `None` while the panel is empty
    pub fn summary(&self) -> Option<PanelSummary> {
        let route = self.selected_route()?;
        let leg = route.first_leg()?;

        Some(PanelSummary {
            route_summary: route.summary.clone(),
            start: truncate_address(&leg.start_address).to_string(),
            end: truncate_address(&leg.end_address).to_string(),
            distance: leg.distance.as_ref().map(|d| d.text.clone()),
            duration: leg.duration.as_ref().map(|d| d.text.clone()),
        })
    }

    /// Detaches the renderer from the map
    pub fn detach(&mut self) {
        if !self.detached {
            self.detached = true;
            self.renderer.detach();
        }
    }
}

impl<R: DirectionsRenderer> Drop for DirectionsPanel<R> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Text before the first comma, the way the panel abbreviates addresses
fn truncate_address(address: &str) -> &str {
    address.split(',').next().unwrap_or(address)
}
