//! HTTP Client Port
//!
//! Defines the interface for the outbound JSON GET requests made by the
//! reverse-geocoding and IP-geolocation adapters.

use crate::domain::errors::LocationError;
use async_trait::async_trait;

/// Minimal JSON-over-HTTP client.
///
/// Timeouts are applied by the callers, which drop the returned future on
/// expiry; implementations must therefore be cancel-safe.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx statuses map to `Transport`, undecodable bodies to `Malformed`.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, LocationError>;
}
