//! Timezone Inference
//!
//! Maps the runtime's IANA timezone to a representative country.
//! Synchronous and free of I/O beyond reading the timezone name.

use crate::domain::errors::LocationError;
use crate::domain::ports::TimezoneSource;
use crate::domain::services::CountryCatalog;
use crate::domain::value_objects::CountryCode;
use std::sync::Arc;

/// Best-guess country from the runtime timezone.
///
/// Several countries share zones, so a zone maps to one representative
/// country only. That is why this method ranks below geolocation.
pub struct TimezoneInference {
    source: Arc<dyn TimezoneSource>,
    catalog: Arc<CountryCatalog>,
}

impl TimezoneInference {
    pub fn new(source: Arc<dyn TimezoneSource>, catalog: Arc<CountryCatalog>) -> Self {
        Self { source, catalog }
    }

    /// Infer a catalog-known country, or None.
    pub fn infer(&self) -> Option<CountryCode> {
        self.try_infer().ok()
    }

    /// Like [`infer`](Self::infer) but reports why nothing was inferred.
    pub fn try_infer(&self) -> Result<CountryCode, LocationError> {
        let tz = self
            .source
            .timezone_name()
            .ok_or_else(|| LocationError::Inconclusive("runtime timezone unknown".to_string()))?;

        let raw = Self::lookup(&tz).ok_or_else(|| {
            LocationError::Inconclusive(format!("timezone {} has no mapped country", tz))
        })?;

        let code = CountryCode::parse(raw)?;
        if !self.catalog.has(&code) {
            return Err(LocationError::UnknownCountry(code.to_string()));
        }

        tracing::debug!("timezone {} -> {}", tz, code);
        Ok(code)
    }

    /// Static zone table. Exact, case-sensitive IANA names.
    pub fn lookup(tz: &str) -> Option<&'static str> {
        let country = match tz.trim() {
            // North America
            "America/New_York" | "America/Chicago" | "America/Denver" | "America/Phoenix"
            | "America/Los_Angeles" | "America/Anchorage" | "America/Detroit"
            | "America/Indiana/Indianapolis" | "America/Boise" | "Pacific/Honolulu"
            | "US/Eastern" | "US/Central" | "US/Mountain" | "US/Pacific" | "US/Alaska"
            | "US/Hawaii" => "US",
            "America/Toronto" | "America/Vancouver" | "America/Edmonton" | "America/Winnipeg"
            | "America/Halifax" | "America/St_Johns" | "America/Regina" | "America/Montreal"
            | "Canada/Eastern" | "Canada/Pacific" => "CA",
            "America/Mexico_City" | "America/Monterrey" | "America/Tijuana"
            | "America/Cancun" | "America/Merida" | "America/Chihuahua" => "MX",
            // South America
            "America/Sao_Paulo" | "America/Fortaleza" | "America/Recife" | "America/Bahia"
            | "America/Manaus" | "America/Belem" | "America/Cuiaba" | "Brazil/East" => "BR",
            "America/Argentina/Buenos_Aires" | "America/Buenos_Aires"
            | "America/Argentina/Cordoba" | "America/Argentina/Mendoza" => "AR",
            "America/Santiago" | "Chile/Continental" => "CL",
            "America/Bogota" => "CO",
            "America/Lima" => "PE",
            // Europe
            "Europe/London" | "Europe/Belfast" | "GB" => "GB",
            "Europe/Dublin" | "Eire" => "IE",
            "Europe/Paris" => "FR",
            "Europe/Berlin" | "Europe/Busingen" => "DE",
            "Europe/Madrid" | "Atlantic/Canary" => "ES",
            "Europe/Lisbon" | "Atlantic/Madeira" | "Atlantic/Azores" | "Portugal" => "PT",
            "Europe/Rome" => "IT",
            "Europe/Amsterdam" => "NL",
            "Europe/Brussels" => "BE",
            "Europe/Zurich" => "CH",
            "Europe/Vienna" => "AT",
            "Europe/Stockholm" => "SE",
            "Europe/Oslo" => "NO",
            "Europe/Copenhagen" => "DK",
            "Europe/Helsinki" => "FI",
            "Europe/Warsaw" | "Poland" => "PL",
            "Europe/Prague" => "CZ",
            "Europe/Athens" => "GR",
            "Europe/Istanbul" | "Asia/Istanbul" | "Turkey" => "TR",
            "Europe/Moscow" | "Europe/Samara" | "Asia/Yekaterinburg" | "Asia/Novosibirsk"
            | "Asia/Vladivostok" | "W-SU" => "RU",
            "Europe/Kyiv" | "Europe/Kiev" => "UA",
            // Middle East & Africa
            "Asia/Jerusalem" | "Asia/Tel_Aviv" | "Israel" => "IL",
            "Africa/Johannesburg" => "ZA",
            "Africa/Lagos" => "NG",
            "Africa/Nairobi" => "KE",
            "Africa/Cairo" | "Egypt" => "EG",
            // Asia Pacific
            "Asia/Kolkata" | "Asia/Calcutta" => "IN",
            "Asia/Karachi" => "PK",
            "Asia/Shanghai" | "Asia/Chongqing" | "Asia/Harbin" | "Asia/Urumqi" | "PRC" => "CN",
            "Asia/Tokyo" | "Japan" => "JP",
            "Asia/Seoul" | "ROK" => "KR",
            "Asia/Taipei" | "ROC" => "TW",
            "Asia/Hong_Kong" | "Hongkong" => "HK",
            "Asia/Singapore" | "Singapore" => "SG",
            "Asia/Kuala_Lumpur" | "Asia/Kuching" => "MY",
            "Asia/Bangkok" => "TH",
            "Asia/Manila" => "PH",
            "Asia/Jakarta" | "Asia/Makassar" | "Asia/Jayapura" => "ID",
            "Asia/Ho_Chi_Minh" | "Asia/Saigon" => "VN",
            "Australia/Sydney" | "Australia/Melbourne" | "Australia/Brisbane"
            | "Australia/Perth" | "Australia/Adelaide" | "Australia/Hobart"
            | "Australia/Darwin" | "Australia/Canberra" => "AU",
            "Pacific/Auckland" | "Pacific/Chatham" | "NZ" => "NZ",
            _ => return None,
        };
        Some(country)
    }
}
