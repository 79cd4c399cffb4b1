//! Preference Store
//!
//! Persists the user's confirmed country under a single key and hands it
//! back only while it is still a catalog country.

use crate::domain::errors::LocationError;
use crate::domain::ports::KeyValueStore;
use crate::domain::services::CountryCatalog;
use crate::domain::value_objects::CountryCode;
use std::sync::Arc;

/// Default storage key for the confirmed country.
pub const DEFAULT_PREFERENCE_KEY: &str = "crisis.country";

/// Confirmed-country persistence.
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<CountryCatalog>,
    key: String,
}

impl PreferenceStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<CountryCatalog>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored country, if present and still supported.
    pub fn get(&self) -> Option<CountryCode> {
        self.try_get().ok()
    }

    /// Like [`get`](Self::get) but reports why nothing usable is stored.
    pub fn try_get(&self) -> Result<CountryCode, LocationError> {
        let raw = self
            .store
            .get(&self.key)
            .ok_or_else(|| LocationError::Inconclusive("no stored preference".to_string()))?;

        let code = CountryCode::parse(&raw).map_err(|e| {
            tracing::warn!("ignoring invalid stored country {:?}", raw);
            e
        })?;

        if !self.catalog.has(&code) {
            // The catalog can shrink between releases.
            tracing::warn!("ignoring stored country {} no longer in catalog", code);
            return Err(LocationError::UnknownCountry(code.to_string()));
        }

        Ok(code)
    }

    /// Overwrite the stored country.
    pub fn set(&self, code: CountryCode) -> Result<(), LocationError> {
        self.store
            .set(&self.key, code.as_str())
            .map_err(|e| LocationError::Storage(e.to_string()))
    }

    /// Remove the stored country.
    pub fn clear(&self) -> Result<(), LocationError> {
        self.store
            .remove(&self.key)
            .map_err(|e| LocationError::Storage(e.to_string()))
    }
}
