//! Domain Errors
//!
//! Failure taxonomy for the detection steps. Detection failures never leave
//! the resolver; they are recorded in the resolution trace and cause
//! fallthrough to the next step.

use std::time::Duration;

/// Why a detection step (or an explicit preference write) failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The user or platform refused access to the device position.
    #[error("location permission denied")]
    PermissionDenied,
    /// A bounded I/O step exceeded its budget.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// Network unreachable or a non-2xx response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Unparseable body, missing field or invalid value.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Syntactically valid result that the catalog does not support.
    #[error("country {0} is not in the catalog")]
    UnknownCountry(String),
    /// The step ran but had nothing to offer.
    #[error("inconclusive: {0}")]
    Inconclusive(String),
    /// The step is turned off by a privacy preference.
    #[error("disabled by privacy preference")]
    Disabled,
    /// Writing to or clearing the preference store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl LocationError {
    /// Short stable label for logs and traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Malformed(_) => "malformed",
            Self::UnknownCountry(_) => "unknown_country",
            Self::Inconclusive(_) => "inconclusive",
            Self::Disabled => "disabled",
            Self::Storage(_) => "storage",
        }
    }
}
