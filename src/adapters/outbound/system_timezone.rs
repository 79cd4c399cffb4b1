//! System Timezone Sources
//!
//! Implements TimezoneSource from the host configuration (`TZ`,
//! `/etc/timezone`, `/etc/localtime`) or from an explicit override.

use crate::domain::ports::TimezoneSource;
use std::path::{Path, PathBuf};

/// Reads the host's IANA timezone name.
///
/// Lookup order: `TZ` environment variable, the timezone file, then the
/// target of the localtime symlink below a `zoneinfo/` directory.
pub struct SystemTimezone {
    timezone_file: PathBuf,
    localtime: PathBuf,
}

impl SystemTimezone {
    pub fn new() -> Self {
        Self::with_paths("/etc/timezone", "/etc/localtime")
    }

    /// Use other locations for the timezone file and localtime link.
    pub fn with_paths(timezone_file: impl Into<PathBuf>, localtime: impl Into<PathBuf>) -> Self {
        Self {
            timezone_file: timezone_file.into(),
            localtime: localtime.into(),
        }
    }

    fn resolve(&self, tz_env: Option<String>) -> Option<String> {
        if let Some(name) = tz_env.as_deref().and_then(normalize) {
            return Some(name);
        }

        if let Some(name) = std::fs::read_to_string(&self.timezone_file)
            .ok()
            .as_deref()
            .and_then(normalize)
        {
            return Some(name);
        }

        zone_from_link(&self.localtime)
    }
}

impl Default for SystemTimezone {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneSource for SystemTimezone {
    fn timezone_name(&self) -> Option<String> {
        let name = self.resolve(std::env::var("TZ").ok());
        if name.is_none() {
            tracing::debug!("no system timezone found");
        }
        name
    }
}

/// Timezone name fixed by configuration.
pub struct FixedTimezone {
    name: Option<String>,
}

impl FixedTimezone {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: normalize(&name),
        }
    }
}

impl TimezoneSource for FixedTimezone {
    fn timezone_name(&self) -> Option<String> {
        self.name.clone()
    }
}

/// Trim, drop the POSIX `:` prefix and reject anything that cannot be an
/// IANA name.
fn normalize(raw: &str) -> Option<String> {
    let name = raw.trim().trim_start_matches(':');
    let name = name.strip_prefix("posix/").unwrap_or(name);

    let plausible = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+'));

    plausible.then(|| name.to_string())
}

fn zone_from_link(link: &Path) -> Option<String> {
    let target = std::fs::read_link(link).ok()?;
    let target = target.to_string_lossy();
    let (_, zone) = target.split_once("zoneinfo/")?;
    normalize(zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let tests = vec![
            ("Europe/Paris", Some("Europe/Paris")),
            (" Europe/Paris\n", Some("Europe/Paris")),
            (":America/New_York", Some("America/New_York")),
            ("posix/Asia/Tokyo", Some("Asia/Tokyo")),
            ("Etc/GMT+3", Some("Etc/GMT+3")),
            ("", None),
            ("/etc/localtime", None),
            ("Europe Paris", None),
        ];

        for (input, expected) in tests {
            assert_eq!(
                normalize(input).as_deref(),
                expected,
                "Failed for input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_env_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("timezone");
        std::fs::write(&file, "Asia/Tokyo\n").unwrap();

        let source = SystemTimezone::with_paths(&file, dir.path().join("localtime"));
        assert_eq!(
            source.resolve(Some("Europe/Berlin".to_string())),
            Some("Europe/Berlin".to_string())
        );
    }

    #[test]
    fn test_timezone_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("timezone");
        std::fs::write(&file, "Asia/Tokyo\n").unwrap();

        let source = SystemTimezone::with_paths(&file, dir.path().join("localtime"));
        assert_eq!(source.resolve(None), Some("Asia/Tokyo".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_localtime_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let zone_dir = dir.path().join("zoneinfo/Europe");
        std::fs::create_dir_all(&zone_dir).unwrap();
        std::fs::write(zone_dir.join("Paris"), b"TZif").unwrap();
        let link = dir.path().join("localtime");
        std::os::unix::fs::symlink(zone_dir.join("Paris"), &link).unwrap();

        let source = SystemTimezone::with_paths(dir.path().join("missing"), &link);
        assert_eq!(source.resolve(None), Some("Europe/Paris".to_string()));
    }

    #[test]
    fn test_nothing_available() {
        let dir = tempfile::tempdir().unwrap();
        let source =
            SystemTimezone::with_paths(dir.path().join("missing"), dir.path().join("missing2"));
        assert_eq!(source.resolve(None), None);
    }

    #[test]
    fn test_fixed_timezone() {
        assert_eq!(
            FixedTimezone::new("Europe/Paris").timezone_name(),
            Some("Europe/Paris".to_string())
        );
        assert_eq!(FixedTimezone::new("   ").timezone_name(), None);
    }
}
