//! Application layer: adapters around external signals and the resolver use case.

pub mod geocoding;
pub mod ip_geolocation;
pub mod location_resolver;
pub mod preference_store;

pub use geocoding::GeocodingAdapter;
pub use ip_geolocation::{IpGeolocationAdapter, ProviderEndpoint};
pub use location_resolver::{LocationResolver, ResolverConfig};
pub use preference_store::PreferenceStore;
