//! Country Catalog
//!
//! Static set of countries for which crisis resources exist.
//! Pure lookup: no I/O, no mutation after construction.

use crate::domain::value_objects::CountryCode;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Built-in countries: (code, display name, accepted alternative names).
///
/// Alternative names cover the formal ISO short names reverse-geocoding
/// services return, e.g. "Korea (the Republic of)".
const BUILTIN: &[(&str, &str, &[&str])] = &[
    ("AR", "Argentina", &[]),
    ("AT", "Austria", &[]),
    ("AU", "Australia", &[]),
    ("BE", "Belgium", &[]),
    ("BR", "Brazil", &["Brasil"]),
    ("CA", "Canada", &[]),
    ("CH", "Switzerland", &[]),
    ("CL", "Chile", &[]),
    ("CN", "China", &["People's Republic of China"]),
    ("CO", "Colombia", &[]),
    ("CZ", "Czechia", &["Czech Republic"]),
    ("DE", "Germany", &["Deutschland"]),
    ("DK", "Denmark", &[]),
    ("EG", "Egypt", &[]),
    ("ES", "Spain", &["España"]),
    ("FI", "Finland", &[]),
    ("FR", "France", &[]),
    (
        "GB",
        "United Kingdom",
        &[
            "United Kingdom of Great Britain and Northern Ireland",
            "United Kingdom of Great Britain and Northern Ireland (the)",
            "Great Britain",
        ],
    ),
    ("GR", "Greece", &[]),
    ("HK", "Hong Kong", &[]),
    ("ID", "Indonesia", &[]),
    ("IE", "Ireland", &[]),
    ("IL", "Israel", &[]),
    ("IN", "India", &[]),
    ("IT", "Italy", &["Italia"]),
    ("JP", "Japan", &[]),
    ("KE", "Kenya", &[]),
    (
        "KR",
        "South Korea",
        &["Korea (the Republic of)", "Republic of Korea", "Korea, Republic of"],
    ),
    ("MX", "Mexico", &["México"]),
    ("MY", "Malaysia", &[]),
    ("NG", "Nigeria", &[]),
    (
        "NL",
        "Netherlands",
        &["Netherlands (the)", "The Netherlands", "Kingdom of the Netherlands"],
    ),
    ("NO", "Norway", &[]),
    ("NZ", "New Zealand", &[]),
    ("PE", "Peru", &[]),
    ("PH", "Philippines", &["Philippines (the)"]),
    ("PK", "Pakistan", &[]),
    ("PL", "Poland", &[]),
    ("PT", "Portugal", &[]),
    (
        "RU",
        "Russia",
        &["Russian Federation", "Russian Federation (the)"],
    ),
    ("SE", "Sweden", &[]),
    ("SG", "Singapore", &[]),
    ("TH", "Thailand", &[]),
    ("TR", "Türkiye", &["Turkey", "Turkiye"]),
    ("TW", "Taiwan", &["Taiwan (Province of China)"]),
    ("UA", "Ukraine", &[]),
    (
        "US",
        "United States",
        &[
            "United States of America",
            "United States of America (the)",
            "USA",
        ],
    ),
    ("VN", "Vietnam", &["Viet Nam"]),
    ("ZA", "South Africa", &[]),
];

/// A supported country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    pub code: CountryCode,
    /// Display name for the manual selector
    pub name: String,
    /// Other names accepted when mapping a geocoded country name
    #[serde(skip)]
    pub aliases: Vec<String>,
}

impl CountryEntry {
    pub fn new(code: CountryCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }
}

/// Validated set of supported country codes.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    entries: BTreeMap<CountryCode, CountryEntry>,
    by_name: HashMap<String, CountryCode>,
}

impl CountryCatalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().filter_map(|(code, name, aliases)| {
            CountryCode::parse(code)
                .ok()
                .map(|c| CountryEntry::new(c, *name).with_aliases(aliases.iter().copied()))
        }))
    }

    /// Build a catalog from arbitrary entries. Later duplicates replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CountryEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.insert(entry.code, entry);
        }

        let mut by_name = HashMap::new();
        for entry in map.values() {
            by_name.insert(normalize_name(&entry.name), entry.code);
            for alias in &entry.aliases {
                by_name.insert(normalize_name(alias), entry.code);
            }
        }

        Self {
            entries: map,
            by_name,
        }
    }

    /// Whether `code` is supported.
    pub fn has(&self, code: &CountryCode) -> bool {
        self.entries.contains_key(code)
    }

    /// All supported codes.
    pub fn all(&self) -> BTreeSet<CountryCode> {
        self.entries.keys().copied().collect()
    }

    pub fn get(&self, code: &CountryCode) -> Option<&CountryEntry> {
        self.entries.get(code)
    }

    /// Entries sorted by display name.
    pub fn entries(&self) -> Vec<&CountryEntry> {
        let mut entries: Vec<&CountryEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Map a country name to its code.
    ///
    /// Case-insensitive exact match on the display name or an alias.
    /// No fuzzy matching: a near miss must not route someone to another
    /// jurisdiction's resources.
    pub fn code_for_name(&self, name: &str) -> Option<CountryCode> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
