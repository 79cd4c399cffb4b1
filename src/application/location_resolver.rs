//! Location Resolver - Main application use case
//!
//! Decides which country's crisis resources to show by walking a fixed
//! cascade of signals, cheapest and most trusted first:
//! stored choice -> device position -> timezone -> IP -> manual selection.

use crate::application::geocoding::{GeocodingAdapter, DEFAULT_REVERSE_GEOCODE_URL};
use crate::application::ip_geolocation::{IpGeolocationAdapter, ProviderEndpoint};
use crate::application::preference_store::{PreferenceStore, DEFAULT_PREFERENCE_KEY};
use crate::domain::entities::{LocationResult, Resolution};
use crate::domain::errors::LocationError;
use crate::domain::ports::{GeolocationProvider, HttpClient, KeyValueStore, TimezoneSource};
use crate::domain::services::{
    first_success, CountryCatalog, CountryEntry, FallbackStep, TimezoneInference,
};
use crate::domain::value_objects::{CountryCode, DetectionMethod};
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;

/// Per-instance resolver settings.
///
/// Everything that would otherwise be global (provider list, storage key,
/// timeouts) lives here so independent resolvers can coexist.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Storage key for the confirmed country
    pub preference_key: String,
    /// Wait for the device position (covers an unanswered permission prompt)
    pub geolocation_timeout: Duration,
    /// Reverse-geocoding endpoint
    pub reverse_geocode_url: String,
    /// Reverse-geocoding request budget
    pub geocode_timeout: Duration,
    /// IP-geolocation providers, in the order they are tried
    pub ip_providers: Vec<ProviderEndpoint>,
    /// Budget for each IP provider
    pub ip_timeout: Duration,
    /// Privacy preference: may the device position be requested?
    pub allow_geolocation: bool,
    /// Privacy preference: may third-party IP services be contacted?
    pub allow_ip_lookup: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            geolocation_timeout: Duration::from_secs(5),
            reverse_geocode_url: DEFAULT_REVERSE_GEOCODE_URL.to_string(),
            geocode_timeout: Duration::from_secs(5),
            ip_providers: ProviderEndpoint::defaults(),
            ip_timeout: Duration::from_secs(3),
            allow_geolocation: true,
            allow_ip_lookup: true,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preference_key(mut self, key: impl Into<String>) -> Self {
        self.preference_key = key.into();
        self
    }

    pub fn geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    pub fn reverse_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.reverse_geocode_url = url.into();
        self
    }

    pub fn geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    pub fn ip_providers(mut self, providers: Vec<ProviderEndpoint>) -> Self {
        self.ip_providers = providers;
        self
    }

    pub fn ip_timeout(mut self, timeout: Duration) -> Self {
        self.ip_timeout = timeout;
        self
    }

    pub fn allow_geolocation(mut self, allow: bool) -> Self {
        self.allow_geolocation = allow;
        self
    }

    pub fn allow_ip_lookup(mut self, allow: bool) -> Self {
        self.allow_ip_lookup = allow;
        self
    }
}

/// Location resolver - orchestrates the detection cascade.
///
/// `resolve` never fails and never writes: every step failure is absorbed
/// and the next step runs. Persisting a result is the caller's explicit
/// `confirm`.
pub struct LocationResolver {
    catalog: Arc<CountryCatalog>,
    preferences: PreferenceStore,
    geolocation: Arc<dyn GeolocationProvider>,
    geocoder: GeocodingAdapter,
    timezone: TimezoneInference,
    ip: IpGeolocationAdapter,
    geolocation_timeout: Duration,
    allow_geolocation: bool,
    allow_ip_lookup: bool,
}

impl LocationResolver {
    /// Wire a resolver from its ports and settings.
    pub fn new(
        config: ResolverConfig,
        catalog: Arc<CountryCatalog>,
        store: Arc<dyn KeyValueStore>,
        geolocation: Arc<dyn GeolocationProvider>,
        http: Arc<dyn HttpClient>,
        timezone: Arc<dyn TimezoneSource>,
    ) -> Self {
        Self {
            preferences: PreferenceStore::new(store, catalog.clone(), config.preference_key),
            geocoder: GeocodingAdapter::new(
                http.clone(),
                catalog.clone(),
                config.reverse_geocode_url,
                config.geocode_timeout,
            ),
            timezone: TimezoneInference::new(timezone, catalog.clone()),
            ip: IpGeolocationAdapter::new(
                http,
                catalog.clone(),
                config.ip_providers,
                config.ip_timeout,
            ),
            catalog,
            geolocation,
            geolocation_timeout: config.geolocation_timeout,
            allow_geolocation: config.allow_geolocation,
            allow_ip_lookup: config.allow_ip_lookup,
        }
    }

    /// Resolve the user's country.
    pub async fn resolve(&self) -> LocationResult {
        self.resolve_explained().await.result
    }

    /// Resolve and keep the trace of every step that ran.
    pub async fn resolve_explained(&self) -> Resolution {
        let steps: Vec<FallbackStep<'_, LocationResult>> = vec![
            FallbackStep::new(DetectionMethod::Stored.as_str(), move || {
                async move { self.from_store() }.boxed()
            }),
            FallbackStep::new(DetectionMethod::Geolocation.as_str(), move || {
                self.from_device().boxed()
            }),
            FallbackStep::new(DetectionMethod::Timezone.as_str(), move || {
                async move { self.from_timezone() }.boxed()
            }),
            FallbackStep::new(DetectionMethod::Ip.as_str(), move || self.from_ip().boxed()),
        ];

        let outcome = first_success(steps).await;
        let result = outcome.value.unwrap_or_else(LocationResult::unresolved);

        match result.country_code() {
            Some(code) => tracing::info!("location resolved: {} via {}", code, result.method()),
            None => tracing::info!("location unresolved, manual selection required"),
        }

        Resolution {
            result,
            trace: outcome.attempts,
        }
    }

    /// Persist a country the user accepted or picked.
    ///
    /// Codes outside the catalog are rejected and the store is untouched.
    pub fn confirm(&self, raw: &str) -> Result<CountryCode, LocationError> {
        let code = CountryCode::parse(raw)?;
        if !self.catalog.has(&code) {
            tracing::warn!("refusing to store unsupported country {}", code);
            return Err(LocationError::UnknownCountry(code.to_string()));
        }

        self.preferences.set(code)?;
        tracing::info!("country preference set to {}", code);
        Ok(code)
    }

    /// Forget the stored country.
    pub fn clear_preference(&self) -> Result<(), LocationError> {
        self.preferences.clear()?;
        tracing::info!("country preference cleared");
        Ok(())
    }

    /// Manual selector options, sorted by name.
    pub fn countries(&self) -> Vec<&CountryEntry> {
        self.catalog.entries()
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    fn from_store(&self) -> Result<LocationResult, LocationError> {
        let code = self.preferences.try_get()?;
        Ok(LocationResult::detected(code, DetectionMethod::Stored))
    }

    async fn from_device(&self) -> Result<LocationResult, LocationError> {
        if !self.allow_geolocation {
            return Err(LocationError::Disabled);
        }

        let limit = self.geolocation_timeout;
        let coords = tokio::time::timeout(limit, self.geolocation.current_position())
            .await
            .map_err(|_| LocationError::Timeout(limit))??;

        let code = self.geocoder.try_reverse_geocode(coords).await?;
        self.accept(code, DetectionMethod::Geolocation)
    }

    fn from_timezone(&self) -> Result<LocationResult, LocationError> {
        let code = self.timezone.try_infer()?;
        self.accept(code, DetectionMethod::Timezone)
    }

    async fn from_ip(&self) -> Result<LocationResult, LocationError> {
        if !self.allow_ip_lookup {
            return Err(LocationError::Disabled);
        }

        let outcome = self.ip.detect_with_report().await;
        match outcome.value {
            Some(code) => self.accept(code, DetectionMethod::Ip),
            None => {
                let failures: Vec<String> = outcome
                    .attempts
                    .iter()
                    .filter_map(|a| a.error().map(|e| format!("{}: {}", a.step, e.kind())))
                    .collect();
                Err(LocationError::Inconclusive(if failures.is_empty() {
                    "no ip providers configured".to_string()
                } else {
                    format!("no provider answered ({})", failures.join(", "))
                }))
            }
        }
    }

    /// Final gate: nothing outside the catalog leaves the resolver.
    fn accept(
        &self,
        code: CountryCode,
        method: DetectionMethod,
    ) -> Result<LocationResult, LocationError> {
        if !self.catalog.has(&code) {
            return Err(LocationError::UnknownCountry(code.to_string()));
        }
        Ok(LocationResult::detected(code, method))
    }
}
