use serde::Deserialize;

use crate::DEFAULT_AVERAGE_SPEED_KMH;

const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Configuration for the tracking session
///
/// Deserializable so it can come from a TOML/JSON file; `from_env` reads the
/// two provider secrets from the environment. Values are passed to the
/// provider as-is, so a missing key surfaces as a rejected request rather
/// than at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Mapping provider API key
    pub api_key: String,
    /// Map style identifier handed to the map frontend
    pub map_id: String,
    /// Assumed average driving speed for ETA estimates, km/h
    pub average_speed_kmh: f64,
    /// Base URL of the geocoding and directions endpoints
    pub maps_base_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            map_id: String::new(),
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Reads `GOOGLE_MAPS_API_KEY` and `GOOGLE_MAPS_MAP_ID` from the
    /// environment, leaving the rest at defaults
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            map_id: std::env::var("GOOGLE_MAPS_MAP_ID").unwrap_or_default(),
            ..Self::default()
        }
    }
}
