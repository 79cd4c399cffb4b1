//! Configured Geolocation Provider
//!
//! Implements GeolocationProvider for hosts without a location service:
//! the position comes from configuration, and its absence is treated as a
//! refusal.

use crate::domain::errors::LocationError;
use crate::domain::ports::GeolocationProvider;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;

/// Geolocation provider answering with a fixed, configured position.
pub struct ConfiguredGeolocation {
    position: Option<Coordinates>,
}

impl ConfiguredGeolocation {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    /// Provider that always refuses, as when the user denies the prompt.
    pub fn denied() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl GeolocationProvider for ConfiguredGeolocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::PermissionDenied)
    }
}
