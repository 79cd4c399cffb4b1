use crate::application::geocoding::DEFAULT_REVERSE_GEOCODE_URL;
use crate::application::preference_store::DEFAULT_PREFERENCE_KEY;
use crate::application::ResolverConfig;
use crate::domain::value_objects::Coordinates;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Storage
    pub db_path: String,
    pub preference_key: String,

    // Per-step budgets
    pub geolocation_timeout_ms: u64,
    pub geocode_timeout_ms: u64,
    pub ip_timeout_ms: u64,

    // Signals
    pub reverse_geocode_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,

    // Privacy preferences
    pub allow_geolocation: bool,
    pub allow_ip_lookup: bool,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "crisis-locator.db".to_string(),
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            geolocation_timeout_ms: 5000,
            geocode_timeout_ms: 5000,
            ip_timeout_ms: 3000,
            reverse_geocode_url: DEFAULT_REVERSE_GEOCODE_URL.to_string(),
            latitude: None,
            longitude: None,
            timezone: None,
            allow_geolocation: true,
            allow_ip_lookup: true,
            debug: false,
        }
    }
}

impl Config {
    /// Configured device position; both coordinates are required.
    pub fn position(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Resolver settings derived from this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .preference_key(self.preference_key.clone())
            .geolocation_timeout(Duration::from_millis(self.geolocation_timeout_ms))
            .reverse_geocode_url(self.reverse_geocode_url.clone())
            .geocode_timeout(Duration::from_millis(self.geocode_timeout_ms))
            .ip_timeout(Duration::from_millis(self.ip_timeout_ms))
            .allow_geolocation(self.allow_geolocation)
            .allow_ip_lookup(self.allow_ip_lookup)
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(default)
}

pub fn load_config() -> anyhow::Result<Config> {
    let db_path = std::env::var("CRISISLOC_DB_PATH")
        .unwrap_or_else(|_| "crisis-locator.db".to_string());

    let preference_key = std::env::var("CRISISLOC_PREFERENCE_KEY")
        .unwrap_or_else(|_| DEFAULT_PREFERENCE_KEY.to_string());

    let geolocation_timeout_ms = std::env::var("CRISISLOC_GEOLOCATION_TIMEOUT_MS")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    let geocode_timeout_ms = std::env::var("CRISISLOC_GEOCODE_TIMEOUT_MS")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    let ip_timeout_ms = std::env::var("CRISISLOC_IP_TIMEOUT_MS")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let reverse_geocode_url = std::env::var("CRISISLOC_REVERSE_GEOCODE_URL")
        .unwrap_or_else(|_| DEFAULT_REVERSE_GEOCODE_URL.to_string());

    // Device position (hosts without a location service)
    let latitude = std::env::var("CRISISLOC_LATITUDE")
        .ok()
        .and_then(|v| v.trim().parse().ok());
    let longitude = std::env::var("CRISISLOC_LONGITUDE")
        .ok()
        .and_then(|v| v.trim().parse().ok());

    let timezone = std::env::var("CRISISLOC_TIMEZONE").ok();

    // Privacy preferences, both default to allowed
    let allow_geolocation = env_flag("CRISISLOC_ALLOW_GEOLOCATION", true);
    let allow_ip_lookup = env_flag("CRISISLOC_ALLOW_IP_LOOKUP", true);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        db_path,
        preference_key,
        geolocation_timeout_ms,
        geocode_timeout_ms,
        ip_timeout_ms,
        reverse_geocode_url,
        latitude,
        longitude,
        timezone,
        allow_geolocation,
        allow_ip_lookup,
        debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.db_path, "crisis-locator.db");
        assert_eq!(cfg.preference_key, "crisis.country");
        assert_eq!(cfg.ip_timeout_ms, 3000);
        assert!(cfg.allow_geolocation);
        assert!(cfg.allow_ip_lookup);
        assert!(cfg.position().is_none());
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let cfg = Config {
            latitude: Some(48.85),
            ..Default::default()
        };
        assert!(cfg.position().is_none());

        let cfg = Config {
            latitude: Some(48.85),
            longitude: Some(2.35),
            ..Default::default()
        };
        assert_eq!(cfg.position(), Some(Coordinates::new(48.85, 2.35)));
    }

    #[test]
    fn test_resolver_config_mapping() {
        let cfg = Config {
            preference_key: "k".to_string(),
            geolocation_timeout_ms: 100,
            geocode_timeout_ms: 200,
            ip_timeout_ms: 300,
            allow_ip_lookup: false,
            ..Default::default()
        };

        let rc = cfg.resolver_config();
        assert_eq!(rc.preference_key, "k");
        assert_eq!(rc.geolocation_timeout, Duration::from_millis(100));
        assert_eq!(rc.geocode_timeout, Duration::from_millis(200));
        assert_eq!(rc.ip_timeout, Duration::from_millis(300));
        assert!(rc.allow_geolocation);
        assert!(!rc.allow_ip_lookup);
    }

    #[test]
    fn test_config_clone() {
        let cfg = Config::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.db_path, cloned.db_path);
        assert_eq!(cfg.reverse_geocode_url, cloned.reverse_geocode_url);
    }

    // Env-var tests mutate process state, so they live in one test to avoid races.
    #[test]
    fn test_load_config_from_env() {
        std::env::remove_var("CRISISLOC_DB_PATH");
        std::env::remove_var("CRISISLOC_IP_TIMEOUT_MS");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.db_path, "crisis-locator.db");
        assert_eq!(cfg.ip_timeout_ms, 3000);

        std::env::set_var("CRISISLOC_DB_PATH", "/tmp/prefs.db");
        std::env::set_var("CRISISLOC_IP_TIMEOUT_MS", "not_a_number");
        std::env::set_var("CRISISLOC_GEOCODE_TIMEOUT_MS", "1500");
        std::env::set_var("CRISISLOC_LATITUDE", " 35.68");
        std::env::set_var("CRISISLOC_LONGITUDE", "139.69");
        std::env::set_var("CRISISLOC_TIMEZONE", "Asia/Tokyo");
        std::env::set_var("CRISISLOC_ALLOW_IP_LOOKUP", "false");
        std::env::set_var("CRISISLOC_ALLOW_GEOLOCATION", "TRUE");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.db_path, "/tmp/prefs.db");
        assert_eq!(cfg.ip_timeout_ms, 3000); // default
        assert_eq!(cfg.geocode_timeout_ms, 1500);
        assert_eq!(cfg.position(), Some(Coordinates::new(35.68, 139.69)));
        assert_eq!(cfg.timezone, Some("Asia/Tokyo".to_string()));
        assert!(!cfg.allow_ip_lookup);
        assert!(cfg.allow_geolocation);

        for var in [
            "CRISISLOC_DB_PATH",
            "CRISISLOC_IP_TIMEOUT_MS",
            "CRISISLOC_GEOCODE_TIMEOUT_MS",
            "CRISISLOC_LATITUDE",
            "CRISISLOC_LONGITUDE",
            "CRISISLOC_TIMEZONE",
            "CRISISLOC_ALLOW_IP_LOOKUP",
            "CRISISLOC_ALLOW_GEOLOCATION",
        ] {
            std::env::remove_var(var);
        }
    }
}
