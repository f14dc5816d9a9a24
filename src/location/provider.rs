//! Platform location service contract
//!
//! Mirrors the usual platform surface: a one-shot position request and a
//! continuous watch that is released when its handle is dropped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geo::Point;
use thiserror::Error;
use tokio::sync::mpsc;

/// Geographic coordinates as reported by the platform
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy, meters
    pub accuracy: f64,
    pub altitude: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
}

/// A single position report
#[derive(Debug, Clone)]
pub struct PositionFix {
    pub coords: Coordinates,
    pub timestamp: DateTime<Utc>,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            coords: Coordinates {
                latitude,
                longitude,
                accuracy: 0.0,
                altitude: None,
                heading: None,
                speed: None,
            },
            timestamp,
        }
    }

    /// The fix as a WGS-84 point, x = longitude, y = latitude
    pub fn point(&self) -> Point<f64> {
        Point::new(self.coords.longitude, self.coords.latitude)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Option<Duration>,
    pub maximum_age: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied = 1,
    PositionUnavailable = 2,
    Timeout = 3,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PositionError {
    pub code: PositionErrorCode,
    pub message: String,
}

impl PositionError {
    pub fn permission_denied() -> Self {
        Self {
            code: PositionErrorCode::PermissionDenied,
            message: "location permission denied".to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: PositionErrorCode::PositionUnavailable,
            message: message.into(),
        }
    }

    pub fn timeout() -> Self {
        Self {
            code: PositionErrorCode::Timeout,
            message: "position request timed out".to_string(),
        }
    }
}

/// Continuous stream of position updates
///
/// Dropping the stream releases the underlying platform watch; providers
/// must stop producing once the receiver is gone.
pub struct PositionWatch {
    updates: mpsc::Receiver<PositionFix>,
}

impl PositionWatch {
    pub fn new(updates: mpsc::Receiver<PositionFix>) -> Self {
        Self { updates }
    }

    pub async fn next(&mut self) -> Option<PositionFix> {
        self.updates.recv().await
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// One-shot position request
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<PositionFix, PositionError>;

    /// Starts a continuous position subscription
    async fn watch_position(
        &self,
        options: &PositionOptions,
    ) -> Result<PositionWatch, PositionError>;
}
