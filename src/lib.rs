//! crisis-locator Library
//!
//! Resolves which country's crisis resources to show a user from a cascade
//! of imperfect signals, falling back to manual selection.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{
    GeocodingAdapter, IpGeolocationAdapter, LocationResolver, PreferenceStore, ProviderEndpoint,
    ResolverConfig,
};
pub use config::load_config;
pub use domain::entities::{LocationResult, Resolution, StepOutcome, StepReport};
pub use domain::errors::LocationError;
pub use domain::ports::{GeolocationProvider, HttpClient, KeyValueStore, TimezoneSource};
pub use domain::services::{CountryCatalog, CountryEntry, TimezoneInference};
pub use domain::value_objects::{ConfidenceLevel, Coordinates, CountryCode, DetectionMethod};
