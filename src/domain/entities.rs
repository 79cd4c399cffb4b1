//! Domain Entities - Core business objects
//!
//! These entities represent the outcome of a location resolution.
//! They have no external dependencies and contain only business logic.

use crate::domain::errors::LocationError;
use crate::domain::value_objects::{ConfidenceLevel, CountryCode, DetectionMethod};
use serde::Serialize;

/// Outcome of one resolution request.
///
/// Only two constructors exist so that the pairing rules hold by
/// construction: an unresolved result is always `Manual`/`Low`, and a
/// resolved result carries the confidence fixed for its method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationResult {
    country_code: Option<CountryCode>,
    method: DetectionMethod,
    confidence: ConfidenceLevel,
}

impl LocationResult {
    /// A country found by `method`. `method` must not be `Manual`.
    pub fn detected(country_code: CountryCode, method: DetectionMethod) -> Self {
        debug_assert!(method != DetectionMethod::Manual);
        Self {
            country_code: Some(country_code),
            method,
            confidence: method.confidence(),
        }
    }

    /// Nothing resolved; the UI falls back to manual selection.
    pub fn unresolved() -> Self {
        Self {
            country_code: None,
            method: DetectionMethod::Manual,
            confidence: ConfidenceLevel::Low,
        }
    }

    pub fn country_code(&self) -> Option<CountryCode> {
        self.country_code
    }

    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn is_resolved(&self) -> bool {
        self.country_code.is_some()
    }
}

impl std::fmt::Display for LocationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.country_code {
            Some(code) => write!(f, "{} via {} ({})", code, self.method, self.confidence),
            None => write!(f, "unresolved, manual selection required"),
        }
    }
}

/// Outcome of a single attempted step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Succeeded,
    Failed(LocationError),
}

/// One line of a resolution trace.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Step or provider name
    pub step: String,
    pub outcome: StepOutcome,
}

impl StepReport {
    pub fn succeeded(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            outcome: StepOutcome::Succeeded,
        }
    }

    pub fn failed(step: impl Into<String>, error: LocationError) -> Self {
        Self {
            step: step.into(),
            outcome: StepOutcome::Failed(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, StepOutcome::Succeeded)
    }

    pub fn error(&self) -> Option<&LocationError> {
        match &self.outcome {
            StepOutcome::Succeeded => None,
            StepOutcome::Failed(e) => Some(e),
        }
    }
}

/// A `LocationResult` together with the steps that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: LocationResult,
    pub trace: Vec<StepReport>,
}

impl Resolution {
    /// One-line explanation of why this result was chosen.
    pub fn summary(&self) -> String {
        let failures: Vec<String> = self
            .trace
            .iter()
            .filter_map(|r| r.error().map(|e| format!("{}: {}", r.step, e)))
            .collect();

        match (self.result.country_code(), failures.is_empty()) {
            (Some(_), true) => format!("{}", self.result),
            (Some(_), false) => format!("{} after [{}]", self.result, failures.join("; ")),
            (None, _) => format!("{} [{}]", self.result, failures.join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    #[test]
    fn test_detected_derives_confidence() {
        let tests = vec![
            (DetectionMethod::Stored, ConfidenceLevel::High),
            (DetectionMethod::Geolocation, ConfidenceLevel::High),
            (DetectionMethod::Timezone, ConfidenceLevel::Medium),
            (DetectionMethod::Ip, ConfidenceLevel::Medium),
        ];

        for (method, expected) in tests {
            let result = LocationResult::detected(code("FR"), method);
            assert_eq!(result.country_code(), Some(code("FR")));
            assert_eq!(result.method(), method);
            assert_eq!(result.confidence(), expected, "Failed for method: {}", method);
        }
    }

    #[test]
    fn test_unresolved_is_manual_low() {
        let result = LocationResult::unresolved();
        assert!(!result.is_resolved());
        assert_eq!(result.method(), DetectionMethod::Manual);
        assert_eq!(result.confidence(), ConfidenceLevel::Low);
    }

    #[test]
    fn test_result_display() {
        let result = LocationResult::detected(code("DE"), DetectionMethod::Ip);
        assert_eq!(format!("{}", result), "DE via ip (medium)");
        assert_eq!(
            format!("{}", LocationResult::unresolved()),
            "unresolved, manual selection required"
        );
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = LocationResult::detected(code("JP"), DetectionMethod::Stored);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["country_code"], "JP");
        assert_eq!(json["method"], "stored");
        assert_eq!(json["confidence"], "high");

        let json = serde_json::to_value(LocationResult::unresolved()).unwrap();
        assert!(json["country_code"].is_null());
    }

    #[test]
    fn test_summary_lists_failures() {
        let resolution = Resolution {
            result: LocationResult::detected(code("FR"), DetectionMethod::Timezone),
            trace: vec![
                StepReport::failed("stored", LocationError::Inconclusive("empty".into())),
                StepReport::failed("geolocation", LocationError::PermissionDenied),
                StepReport::succeeded("timezone"),
            ],
        };

        let summary = resolution.summary();
        assert!(summary.starts_with("FR via timezone (medium) after ["));
        assert!(summary.contains("geolocation: location permission denied"));
    }

    #[test]
    fn test_summary_without_failures() {
        let resolution = Resolution {
            result: LocationResult::detected(code("JP"), DetectionMethod::Stored),
            trace: vec![StepReport::succeeded("stored")],
        };
        assert_eq!(resolution.summary(), "JP via stored (high)");
    }
}
