//! Query client for the external directions endpoint

use async_trait::async_trait;

use super::types::{DirectionsRequest, DirectionsResponse};
use crate::Error;
use crate::loading::TrackerConfig;

#[async_trait]
pub trait DirectionsApi: Send + Sync {
    /// Resolves a directions request to a set of route alternatives
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, Error>;
}

/// Client for the `/directions/json` endpoint
#[derive(Debug, Clone)]
pub struct HttpDirections {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpDirections {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.maps_base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl DirectionsApi for HttpDirections {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, Error> {
        let url = format!("{}/directions/json", self.base_url);
        let alternatives = if request.provide_alternatives {
            "true"
        } else {
            "false"
        };

        let response: DirectionsResponse = self
            .client
            .get(&url)
            .query(&[
                ("origin", request.origin.as_str()),
                ("destination", request.destination.as_str()),
                ("mode", request.travel_mode.as_str()),
                ("alternatives", alternatives),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.routes.is_empty() {
            if !response.status.is_empty() && response.status != "OK" {
                return Err(Error::ProviderRejected(response.status));
            }
            return Err(Error::EmptyProviderResponse);
        }

        Ok(response)
    }
}
