//! Airly's spelling of pollutants and response fields.
//!
//! Parsing looks every provider-specific string up here instead of
//! repeating literals.

use air_info_pollution_models::PollutantKind;

/// Top-level section with the latest measurement.
pub const CURRENT: &str = "current";
/// Top-level array of past hourly measurements.
pub const HISTORY: &str = "history";
/// Array of `{name, value}` measurements.
pub const VALUES: &str = "values";
/// Array of `{pollutant, percent}` norm comparisons.
pub const STANDARDS: &str = "standards";
/// Pollutant key inside a `values` entry.
pub const VALUE_NAME: &str = "name";
/// Measured value inside a `values` entry.
pub const VALUE_VALUE: &str = "value";
/// Pollutant key inside a `standards` entry.
pub const STANDARD_POLLUTANT: &str = "pollutant";
/// Percentage of the norm inside a `standards` entry.
pub const STANDARD_PERCENT: &str = "percent";

/// Pollutant kinds and the keys Airly uses for them.
const POLLUTANT_KEYS: &[(PollutantKind, &str)] = &[
    (PollutantKind::Pm10, "PM10"),
    (PollutantKind::Pm25, "PM25"),
];

/// Returns the Airly key for a pollutant.
#[must_use]
pub fn airly_key(kind: PollutantKind) -> &'static str {
    POLLUTANT_KEYS
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or("", |(_, key)| key)
}

/// Returns the pollutant an Airly key names, or `None` for pollutants the
/// domain model does not track (e.g. `"NO2"`, `"TEMPERATURE"`).
#[must_use]
pub fn pollutant_for_key(key: &str) -> Option<PollutantKind> {
    POLLUTANT_KEYS
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pollutant_has_a_key() {
        for &kind in PollutantKind::all() {
            assert!(!airly_key(kind).is_empty(), "no key for {kind}");
            assert_eq!(pollutant_for_key(airly_key(kind)), Some(kind));
        }
    }

    #[test]
    fn unknown_keys_are_not_tracked() {
        assert_eq!(pollutant_for_key("NO2"), None);
        assert_eq!(pollutant_for_key("pm10"), None);
    }
}
