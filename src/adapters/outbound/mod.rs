mod configured_geolocation;
mod dashmap_key_value_store;
mod reqwest_http_client;
mod sqlite_key_value_store;
mod system_timezone;

pub use configured_geolocation::ConfiguredGeolocation;
pub use dashmap_key_value_store::DashMapKeyValueStore;
pub use reqwest_http_client::ReqwestHttpClient;
pub use sqlite_key_value_store::SqliteKeyValueStore;
pub use system_timezone::{FixedTimezone, SystemTimezone};
