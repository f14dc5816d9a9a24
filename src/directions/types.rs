//! Wire types of the external directions provider

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
    pub provide_alternatives: bool,
}

impl DirectionsRequest {
    /// Driving request with alternatives, the shape the panel issues
    pub fn driving(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: TravelMode::Driving,
            provide_alternatives: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DirectionsResponse {
    pub routes: Vec<RouteAlternative>,
    pub status: String,
}

/// One possible driving path, as supplied by the provider
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RouteAlternative {
    pub summary: String,
    pub legs: Vec<RouteLeg>,
}

impl RouteAlternative {
    pub fn first_leg(&self) -> Option<&RouteLeg> {
        self.legs.first()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// A quantity as the provider formats it, plus the raw value
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}
