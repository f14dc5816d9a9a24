use thiserror::Error;

use crate::RouteStopId;
use crate::location::PositionError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] PositionError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider returned no results")]
    EmptyProviderResponse,
    #[error("Provider rejected the request: {0}")]
    ProviderRejected(String),
    #[error("A route needs at least two stops")]
    RouteTooShort,
    #[error("Stop index {0} is out of bounds")]
    InvalidStop(RouteStopId),
    #[error("Route alternative {0} is out of bounds")]
    InvalidRouteIndex(usize),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
