//! Reverse Geocoding Adapter
//!
//! Turns device coordinates into a catalog country with one bounded HTTP
//! call: coordinates -> country name -> country code.

use crate::domain::errors::LocationError;
use crate::domain::ports::HttpClient;
use crate::domain::services::CountryCatalog;
use crate::domain::value_objects::{Coordinates, CountryCode};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Default reverse-geocoding endpoint (free client-side API, no key).
pub const DEFAULT_REVERSE_GEOCODE_URL: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// JSON field holding the country name in the geocoder's response.
const COUNTRY_NAME_FIELD: &str = "countryName";

/// Reverse-geocoding adapter.
///
/// Every failure (non-2xx, timeout, bad payload, unmapped name) becomes
/// `None` for callers of [`reverse_geocode`](Self::reverse_geocode).
pub struct GeocodingAdapter {
    http: Arc<dyn HttpClient>,
    catalog: Arc<CountryCatalog>,
    base_url: String,
    timeout: Duration,
}

impl GeocodingAdapter {
    pub fn new(
        http: Arc<dyn HttpClient>,
        catalog: Arc<CountryCatalog>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            catalog,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Country at `(lat, lon)`, or None.
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Option<CountryCode> {
        match self.try_reverse_geocode(Coordinates::new(lat, lon)).await {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::debug!("reverse geocoding failed ({}): {}", e.kind(), e);
                None
            }
        }
    }

    /// Like [`reverse_geocode`](Self::reverse_geocode) but keeps the failure reason.
    pub async fn try_reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<CountryCode, LocationError> {
        if !coords.is_valid() {
            return Err(LocationError::Malformed(format!(
                "coordinates out of range: {}, {}",
                coords.latitude, coords.longitude
            )));
        }

        let url = self.request_url(coords)?;

        // Dropping the request future on expiry cancels the request.
        let body = tokio::time::timeout(self.timeout, self.http.get_json(url.as_str()))
            .await
            .map_err(|_| LocationError::Timeout(self.timeout))??;

        let name = body
            .get(COUNTRY_NAME_FIELD)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                LocationError::Malformed(format!("missing {} field", COUNTRY_NAME_FIELD))
            })?;

        let code = self
            .catalog
            .code_for_name(name)
            .ok_or_else(|| LocationError::UnknownCountry(name.to_string()))?;

        tracing::debug!(
            "reverse geocoded {:.3},{:.3} -> {} ({})",
            coords.latitude,
            coords.longitude,
            name,
            code
        );
        Ok(code)
    }

    fn request_url(&self, coords: Coordinates) -> Result<Url, LocationError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ],
        )
        .map_err(|e| LocationError::Transport(format!("invalid geocoder url: {}", e)))
    }
}
