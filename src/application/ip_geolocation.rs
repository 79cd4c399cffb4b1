//! IP Geolocation Adapter
//!
//! Asks an ordered list of free IP-geolocation services for the caller's
//! country, one at a time, each under its own timeout.

use crate::domain::errors::LocationError;
use crate::domain::ports::HttpClient;
use crate::domain::services::{first_success, CountryCatalog, FallbackOutcome, FallbackStep};
use crate::domain::value_objects::CountryCode;
use futures::FutureExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Extracts the raw country code from a provider's JSON response.
pub type ResponseParser = fn(&Value) -> Option<String>;

/// One IP-geolocation service: where to ask and how to read the answer.
#[derive(Clone)]
pub struct ProviderEndpoint {
    pub name: String,
    pub url: String,
    parser: ResponseParser,
}

impl ProviderEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>, parser: ResponseParser) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            parser,
        }
    }

    /// ipapi.co: `{"country_code": "DE", ...}` or `{"error": true, ...}`.
    pub fn ipapi_co(url: impl Into<String>) -> Self {
        Self::new("ipapi.co", url, |body| {
            if body.get("error").and_then(Value::as_bool) == Some(true) {
                return None;
            }
            str_field(body, "country_code")
        })
    }

    /// ip-api.com: `{"status": "success", "countryCode": "DE", ...}`.
    pub fn ip_api_com(url: impl Into<String>) -> Self {
        Self::new("ip-api.com", url, |body| {
            if body.get("status").and_then(Value::as_str) != Some("success") {
                return None;
            }
            str_field(body, "countryCode")
        })
    }

    /// ipwho.is: `{"success": true, "country_code": "DE", ...}`.
    pub fn ipwho_is(url: impl Into<String>) -> Self {
        Self::new("ipwho.is", url, |body| {
            if body.get("success").and_then(Value::as_bool) == Some(false) {
                return None;
            }
            str_field(body, "country_code")
        })
    }

    /// ipinfo.io: `{"country": "DE", ...}`.
    pub fn ipinfo_io(url: impl Into<String>) -> Self {
        Self::new("ipinfo.io", url, |body| str_field(body, "country"))
    }

    /// Built-in provider order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::ipapi_co("https://ipapi.co/json/"),
            Self::ip_api_com("http://ip-api.com/json/"),
            Self::ipwho_is("https://ipwho.is/"),
            Self::ipinfo_io("https://ipinfo.io/json"),
        ]
    }

    /// Apply this provider's parser.
    pub fn parse(&self, body: &Value) -> Option<String> {
        (self.parser)(body)
    }
}

impl std::fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

fn str_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// IP-geolocation adapter with ordered provider fallback.
pub struct IpGeolocationAdapter {
    http: Arc<dyn HttpClient>,
    catalog: Arc<CountryCatalog>,
    providers: Vec<ProviderEndpoint>,
    timeout: Duration,
}

impl IpGeolocationAdapter {
    pub fn new(
        http: Arc<dyn HttpClient>,
        catalog: Arc<CountryCatalog>,
        providers: Vec<ProviderEndpoint>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            catalog,
            providers,
            timeout,
        }
    }

    pub fn providers(&self) -> &[ProviderEndpoint] {
        &self.providers
    }

    /// First catalog-known country reported by a provider, or None.
    pub async fn detect(&self) -> Option<CountryCode> {
        self.detect_with_report().await.value
    }

    /// Query providers in order until one succeeds, keeping a per-provider report.
    pub async fn detect_with_report(&self) -> FallbackOutcome<CountryCode> {
        let steps: Vec<FallbackStep<'_, CountryCode>> = self
            .providers
            .iter()
            .map(|endpoint| {
                FallbackStep::new(endpoint.name.clone(), move || {
                    self.query(endpoint).boxed()
                })
                .with_timeout(self.timeout)
            })
            .collect();

        let outcome = first_success(steps).await;
        match (&outcome.value, outcome.winner()) {
            (Some(code), Some(provider)) => {
                tracing::debug!("ip geolocation: {} from {}", code, provider)
            }
            _ => tracing::debug!(
                "ip geolocation: all {} providers failed",
                outcome.attempts.len()
            ),
        }
        outcome
    }

    async fn query(&self, endpoint: &ProviderEndpoint) -> Result<CountryCode, LocationError> {
        let body = self.http.get_json(&endpoint.url).await?;

        let raw = endpoint.parse(&body).ok_or_else(|| {
            LocationError::Malformed(format!("{} response has no country code", endpoint.name))
        })?;

        let code = CountryCode::parse(&raw)?;
        if !self.catalog.has(&code) {
            return Err(LocationError::UnknownCountry(code.to_string()));
        }
        Ok(code)
    }
}
