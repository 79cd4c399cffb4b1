mod geolocation_provider;
mod http_client;
mod key_value_store;
mod timezone_source;

pub use geolocation_provider::GeolocationProvider;
pub use http_client::HttpClient;
pub use key_value_store::KeyValueStore;
pub use timezone_source::TimezoneSource;
