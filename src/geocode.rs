//! Reverse geocoding of coordinates to human-readable addresses

use async_trait::async_trait;
use geo::Point;
use serde::Deserialize;

use crate::Error;
use crate::loading::TrackerConfig;

#[async_trait]
pub trait ReverseGeocode: Send + Sync {
    /// Resolves the given position to an address
    async fn reverse(&self, position: Point<f64>) -> Result<String, Error>;
}

/// Client for the `/geocode/json` endpoint
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.maps_base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GeocodeResponse {
    pub results: Vec<GeocodeResult>,
    pub status: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GeocodeResult {
    pub formatted_address: String,
}

impl GeocodeResponse {
    /// Address of the first result, the one the view displays
    pub fn first_address(self) -> Result<String, Error> {
        self.results
            .into_iter()
            .next()
            .map(|result| result.formatted_address)
            .ok_or(Error::EmptyProviderResponse)
    }
}

#[async_trait]
impl ReverseGeocode for HttpGeocoder {
    async fn reverse(&self, position: Point<f64>) -> Result<String, Error> {
        let url = format!("{}/geocode/json", self.base_url);
        let latlng = format!("{},{}", position.y(), position.x());

        let response: GeocodeResponse = self
            .client
            .get(&url)
            .query(&[("latlng", latlng.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.first_address()
    }
}
