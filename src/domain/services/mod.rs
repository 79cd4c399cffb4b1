mod country_catalog;
pub mod fallback;
mod timezone_inference;

pub use country_catalog::{CountryCatalog, CountryEntry};
pub use fallback::{first_success, FallbackOutcome, FallbackStep};
pub use timezone_inference::TimezoneInference;
