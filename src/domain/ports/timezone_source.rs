//! Timezone Source Port
//!
//! Defines the interface for reading the runtime's IANA timezone name.

/// Provider of the runtime timezone identifier (e.g. `Europe/Paris`).
pub trait TimezoneSource: Send + Sync {
    /// The resolved IANA name, or None if the runtime does not expose one.
    fn timezone_name(&self) -> Option<String>;
}
