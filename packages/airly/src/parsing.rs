//! Conversion of Airly `/measurements/point` responses into snapshots.
//!
//! A response carries a `current` section (latest values plus
//! `standards`, the percentage of each norm) and a `history` array of
//! hourly entries that only have `values`. Entries for pollutants the
//! domain model does not track are ignored. A `null` measurement leaves
//! the reading unset.
//!
//! The strict parsers ([`parse_current`], [`parse_history`]) return a
//! [`ParseError`]. The fail-soft wrappers ([`current_or_default`],
//! [`history_or_none`]) log the error and hand back a neutral result
//! together with the error, so the failure stays observable.

use air_info_pollution_models::{PollutantKind, PollutionSnapshot};
use serde_json::Value;

use crate::naming;

/// Errors that can occur while parsing an Airly response.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The body is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A field the response shape requires is absent.
    #[error("Missing field: {path}")]
    MissingField {
        /// Dotted path of the absent field.
        path: String,
    },

    /// A field is present but has the wrong JSON type.
    #[error("Invalid field {path}: expected {expected}")]
    InvalidField {
        /// Dotted path of the offending field.
        path: String,
        /// What the field should have been.
        expected: &'static str,
    },
}

/// Parses the `current` section into a snapshot and evaluates its norms.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not JSON or lacks
/// `current.values` / `current.standards`.
pub fn parse_current(body: &str) -> Result<PollutionSnapshot, ParseError> {
    let root: Value = serde_json::from_str(body)?;
    let current = field(&root, naming::CURRENT, naming::CURRENT)?;

    let mut snapshot = PollutionSnapshot::new();

    apply_values(&mut snapshot, current, naming::CURRENT)?;

    let standards_path = format!("{}.{}", naming::CURRENT, naming::STANDARDS);
    let standards = array(
        field(current, naming::STANDARDS, &standards_path)?,
        &standards_path,
    )?;
    for (i, standard) in standards.iter().enumerate() {
        let path = format!("{standards_path}[{i}]");
        let Some(kind) = pollutant(standard, naming::STANDARD_POLLUTANT, &path)? else {
            continue;
        };
        let percent = number(standard, naming::STANDARD_PERCENT, &path)?;
        snapshot.reading_mut(kind).set_percentage(percent);
    }

    snapshot.evaluate_norms();

    Ok(snapshot)
}

/// Parses the `history` array into one snapshot per entry.
///
/// History entries carry no norm percentages, so every snapshot has unset
/// percentages and keeps the default `matches_norms`.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not JSON, lacks `history`, or an
/// entry lacks `values`.
pub fn parse_history(body: &str) -> Result<Vec<PollutionSnapshot>, ParseError> {
    let root: Value = serde_json::from_str(body)?;
    let history = array(
        field(&root, naming::HISTORY, naming::HISTORY)?,
        naming::HISTORY,
    )?;

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut snapshot = PollutionSnapshot::new();
            apply_values(&mut snapshot, entry, &format!("{}[{i}]", naming::HISTORY))?;
            Ok(snapshot)
        })
        .collect()
}

/// Like [`parse_current`], but falls back to an empty snapshot.
///
/// The error, if any, is logged and returned alongside the fallback.
#[must_use]
pub fn current_or_default(body: &str) -> (PollutionSnapshot, Option<ParseError>) {
    match parse_current(body) {
        Ok(snapshot) => (snapshot, None),
        Err(e) => {
            log::error!("Failed to parse current Airly measurement: {e}");
            (PollutionSnapshot::default(), Some(e))
        }
    }
}

/// Like [`parse_history`], but yields `None` instead of an error.
///
/// `None` means "no result" and is distinct from `Some(vec![])`, which is
/// a well-formed but empty history. The error, if any, is logged and
/// returned alongside.
#[must_use]
pub fn history_or_none(body: &str) -> (Option<Vec<PollutionSnapshot>>, Option<ParseError>) {
    match parse_history(body) {
        Ok(snapshots) => (Some(snapshots), None),
        Err(e) => {
            log::error!("Failed to parse Airly measurement history: {e}");
            (None, Some(e))
        }
    }
}

/// Fills snapshot values from the `values` array of `parent`.
fn apply_values(
    snapshot: &mut PollutionSnapshot,
    parent: &Value,
    parent_path: &str,
) -> Result<(), ParseError> {
    let values_path = format!("{parent_path}.{}", naming::VALUES);
    let values = array(field(parent, naming::VALUES, &values_path)?, &values_path)?;

    for (i, entry) in values.iter().enumerate() {
        let path = format!("{values_path}[{i}]");
        let Some(kind) = pollutant(entry, naming::VALUE_NAME, &path)? else {
            continue;
        };
        let value = number(entry, naming::VALUE_VALUE, &path)?;
        snapshot.reading_mut(kind).set_value(value);
    }

    Ok(())
}

fn field<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Value, ParseError> {
    parent.get(key).ok_or_else(|| ParseError::MissingField {
        path: path.to_string(),
    })
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ParseError> {
    value.as_array().ok_or_else(|| ParseError::InvalidField {
        path: path.to_string(),
        expected: "array",
    })
}

/// Reads the pollutant discriminator of an entry. `Ok(None)` means the
/// entry names a pollutant that is not tracked.
fn pollutant(
    entry: &Value,
    key: &str,
    entry_path: &str,
) -> Result<Option<PollutantKind>, ParseError> {
    let path = format!("{entry_path}.{key}");
    let name = field(entry, key, &path)?
        .as_str()
        .ok_or(ParseError::InvalidField {
            path,
            expected: "string",
        })?;
    Ok(naming::pollutant_for_key(name))
}

/// Reads a numeric field of an entry. `null` reads as unknown.
fn number(entry: &Value, key: &str, entry_path: &str) -> Result<Option<f64>, ParseError> {
    let path = format!("{entry_path}.{key}");
    let value = field(entry, key, &path)?;
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_f64()
        .map(Some)
        .ok_or(ParseError::InvalidField {
            path,
            expected: "number",
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn current_body() -> String {
        json!({
            "current": {
                "fromDateTime": "2024-01-15T13:00:00.000Z",
                "tillDateTime": "2024-01-15T14:00:00.000Z",
                "values": [
                    { "name": "PM1", "value": 7.1 },
                    { "name": "PM10", "value": 15 },
                    { "name": "PM25", "value": 9 },
                    { "name": "TEMPERATURE", "value": 2.4 }
                ],
                "standards": [
                    { "name": "WHO", "pollutant": "PM10", "limit": 50, "percent": 30 },
                    { "name": "WHO", "pollutant": "PM25", "limit": 25, "percent": 110 }
                ]
            },
            "history": [],
            "forecast": []
        })
        .to_string()
    }

    #[test]
    fn parses_current_values_and_standards() {
        let s = parse_current(&current_body()).unwrap();
        assert_eq!(s.pm10().value(), Some(15.0));
        assert_eq!(s.pm10().percentage(), Some(30.0));
        assert_eq!(s.pm25().value(), Some(9.0));
        assert_eq!(s.pm25().percentage(), Some(110.0));
        assert!(!s.matches_norms());
    }

    #[test]
    fn current_within_norms_matches() {
        let body = json!({
            "current": {
                "values": [
                    { "name": "PM10", "value": 20.5 },
                    { "name": "PM25", "value": 11.0 }
                ],
                "standards": [
                    { "pollutant": "PM10", "percent": 41.0 },
                    { "pollutant": "PM25", "percent": 44.0 }
                ]
            }
        })
        .to_string();
        assert!(parse_current(&body).unwrap().matches_norms());
    }

    #[test]
    fn current_without_pm_values_stays_empty() {
        let body = json!({
            "current": { "values": [], "standards": [] }
        })
        .to_string();
        let s = parse_current(&body).unwrap();
        assert!(s.has_any_empty_value());
        assert!(s.matches_norms());
    }

    #[test]
    fn null_measurement_is_unknown_not_zero() {
        let body = json!({
            "current": {
                "values": [
                    { "name": "PM10", "value": null },
                    { "name": "PM25", "value": 9 }
                ],
                "standards": []
            }
        })
        .to_string();
        let s = parse_current(&body).unwrap();
        assert_eq!(s.pm10().value(), None);
        assert!(s.has_any_empty_value());
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            parse_current("{ not json"),
            Err(ParseError::Syntax(_))
        ));
        assert!(matches!(
            parse_history("<html>502</html>"),
            Err(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn missing_section_is_a_missing_field_error() {
        let err = parse_current(r#"{"history": []}"#).unwrap_err();
        match err {
            ParseError::MissingField { path } => assert_eq!(path, "current"),
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_current(r#"{"current": {"values": []}}"#).unwrap_err();
        match err {
            ParseError::MissingField { path } => assert_eq!(path, "current.standards"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_type_is_an_invalid_field_error() {
        let body = json!({
            "current": {
                "values": [{ "name": "PM10", "value": "high" }],
                "standards": []
            }
        })
        .to_string();
        match parse_current(&body).unwrap_err() {
            ParseError::InvalidField { path, expected } => {
                assert_eq!(path, "current.values[0].value");
                assert_eq!(expected, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_entry_field_reports_its_path() {
        let body = json!({
            "current": {
                "values": [{ "name": "PM10", "value": 3 }, { "name": "PM25" }],
                "standards": []
            }
        })
        .to_string();
        match parse_current(&body).unwrap_err() {
            ParseError::MissingField { path } => assert_eq!(path, "current.values[1].value"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn current_or_default_falls_back_and_reports() {
        let (s, err) = current_or_default("definitely not json");
        assert!(s.has_any_empty_value());
        assert!(s.matches_norms());
        assert_eq!(s, PollutionSnapshot::default());
        assert!(matches!(err, Some(ParseError::Syntax(_))));
    }

    #[test]
    fn current_or_default_passes_through_success() {
        let (s, err) = current_or_default(&current_body());
        assert!(err.is_none());
        assert_eq!(s.pm10().value(), Some(15.0));
    }

    #[test]
    fn parses_history_entries() {
        let body = json!({
            "current": { "values": [], "standards": [] },
            "history": [
                {
                    "fromDateTime": "2024-01-14T13:00:00.000Z",
                    "values": [
                        { "name": "PM10", "value": 40.0 },
                        { "name": "PM25", "value": 22.0 }
                    ],
                    "standards": []
                },
                {
                    "fromDateTime": "2024-01-14T14:00:00.000Z",
                    "values": [
                        { "name": "PM25", "value": 18.5 },
                        { "name": "PM10", "value": 31.0 },
                        { "name": "PRESSURE", "value": 1012.0 }
                    ]
                }
            ]
        })
        .to_string();

        let history = parse_history(&body).unwrap();
        assert_eq!(history.len(), 2);
        for s in &history {
            assert!(s.pm10().percentage().is_none());
            assert!(s.pm25().percentage().is_none());
            assert!(s.matches_norms());
        }
        assert_eq!(history[1].pm10().value(), Some(31.0));
        assert_eq!(history[1].pm25().value(), Some(18.5));
    }

    #[test]
    fn history_entry_without_values_is_a_missing_field_error() {
        let body = json!({ "history": [{ "values": [] }, {}] }).to_string();
        match parse_history(&body).unwrap_err() {
            ParseError::MissingField { path } => assert_eq!(path, "history[1].values"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn history_or_none_distinguishes_failure_from_empty() {
        let (empty, err) = history_or_none(r#"{"history": []}"#);
        assert_eq!(empty, Some(vec![]));
        assert!(err.is_none());

        let (none, err) = history_or_none("oops");
        assert!(none.is_none());
        assert!(matches!(err, Some(ParseError::Syntax(_))));
    }
}
