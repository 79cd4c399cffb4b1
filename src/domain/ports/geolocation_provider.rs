//! Geolocation Provider Port
//!
//! Defines the interface for asking the host platform for the device position.

use crate::domain::errors::LocationError;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;

/// Source of the device's current position.
///
/// This is an outbound port that abstracts the platform location service.
/// Implementations may prompt the user, so callers bound the wait.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Request the current position.
    ///
    /// Returns `PermissionDenied` when the user refused or the platform
    /// has no position to offer.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}
