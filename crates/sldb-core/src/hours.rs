//! Weekly operating hours embedded in location rows as serialized text.
//!
//! Stored values are JSON-like mappings that frequently use single quotes
//! (`{'hoursMonday': '6:00 AM - 11:00 PM', ...}`). Parsing is isolated here
//! and returns a typed error so callers decide how to fall back.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder for a day whose hours cannot be recovered.
pub const UNKNOWN_HOURS: &str = "Unknown";

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Which of the two hours fields a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursKind {
    Store,
    DriveThrough,
}

impl HoursKind {
    /// Key prefix used for each weekday (`hoursMonday`, `driveHoursMonday`).
    #[must_use]
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Store => "hours",
            Self::DriveThrough => "driveHours",
        }
    }

    /// Name of the location column holding this field.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Store => "openHours",
            Self::DriveThrough => "driveThroughHours",
        }
    }
}

#[derive(Debug, Error)]
pub enum HoursParseError {
    #[error("hours text is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("hours text must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("hours value must be text, found {0}")]
    NotText(&'static str),
}

/// Day-to-hours mapping for a single service (store or drive-through).
///
/// A successfully parsed value holds exactly the keys present in the source
/// text; missing days are not back-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeeklyHours(Map<String, Value>);

impl WeeklyHours {
    /// All seven days set to [`UNKNOWN_HOURS`], Monday first.
    #[must_use]
    pub fn unknown(kind: HoursKind) -> Self {
        let prefix = kind.key_prefix();
        let days = WEEKDAYS
            .iter()
            .map(|day| {
                (
                    format!("{prefix}{day}"),
                    Value::String(UNKNOWN_HOURS.to_string()),
                )
            })
            .collect();
        Self(days)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<WeeklyHours> for Value {
    fn from(hours: WeeklyHours) -> Self {
        Value::Object(hours.0)
    }
}

/// Parses stored hours text into a [`WeeklyHours`].
///
/// Every single quote is first rewritten to a double quote. If the rewritten
/// text is not valid JSON and the original contained single quotes, the
/// original is tried as-is, which recovers well-formed JSON whose values
/// contain apostrophes.
///
/// # Errors
///
/// Returns [`HoursParseError::Syntax`] when neither form parses, and
/// [`HoursParseError::NotAnObject`] when the text is valid JSON of another shape.
pub fn parse_weekly_hours(raw: &str) -> Result<WeeklyHours, HoursParseError> {
    let requoted = raw.replace('\'', "\"");

    let value = match serde_json::from_str::<Value>(&requoted) {
        Ok(value) => value,
        Err(err) if requoted == raw => return Err(err.into()),
        Err(err) => serde_json::from_str::<Value>(raw).map_err(|_| err)?,
    };

    match value {
        Value::Object(map) => Ok(WeeklyHours(map)),
        other => Err(HoursParseError::NotAnObject(json_kind(&other))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_record_has_seven_prefixed_days_in_order() {
        let hours = WeeklyHours::unknown(HoursKind::Store);
        let keys: Vec<&str> = hours.as_map().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "hoursMonday",
                "hoursTuesday",
                "hoursWednesday",
                "hoursThursday",
                "hoursFriday",
                "hoursSaturday",
                "hoursSunday",
            ]
        );
        assert!(hours.as_map().values().all(|v| v == UNKNOWN_HOURS));
    }

    #[test]
    fn drive_through_default_uses_drive_hours_keys() {
        let hours = WeeklyHours::unknown(HoursKind::DriveThrough);
        assert_eq!(hours.len(), 7);
        assert_eq!(hours.get("driveHoursSunday"), Some(UNKNOWN_HOURS));
        assert_eq!(hours.get("hoursSunday"), None);
    }

    #[test]
    fn parses_single_quoted_mapping() {
        let raw = "{'hoursMonday': '6:00 AM - 11:00 PM', 'hoursTuesday': '24 hours'}";
        let hours = parse_weekly_hours(raw).unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(hours.get("hoursMonday"), Some("6:00 AM - 11:00 PM"));
        assert_eq!(hours.get("hoursTuesday"), Some("24 hours"));
    }

    #[test]
    fn parses_standard_json_mapping() {
        let raw = r#"{"driveHoursFriday": "Closed"}"#;
        let hours = parse_weekly_hours(raw).unwrap();
        assert_eq!(hours.get("driveHoursFriday"), Some("Closed"));
    }

    #[test]
    fn partial_mapping_is_not_back_filled() {
        let hours = parse_weekly_hours("{'hoursMonday': 'Closed'}").unwrap();
        assert_eq!(hours.len(), 1);
        assert_eq!(hours.get("hoursSunday"), None);
    }

    #[test]
    fn json_with_apostrophe_in_value_falls_back_to_raw_text() {
        let raw = r#"{"hoursMonday": "Mon's special: 9-5"}"#;
        let hours = parse_weekly_hours(raw).unwrap();
        assert_eq!(hours.get("hoursMonday"), Some("Mon's special: 9-5"));
    }

    #[test]
    fn garbage_text_is_a_syntax_error() {
        let err = parse_weekly_hours("not json").unwrap_err();
        assert!(matches!(err, HoursParseError::Syntax(_)), "got {err:?}");
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = parse_weekly_hours("['Monday', 'Tuesday']").unwrap_err();
        assert!(
            matches!(err, HoursParseError::NotAnObject("array")),
            "got {err:?}"
        );
    }
}
