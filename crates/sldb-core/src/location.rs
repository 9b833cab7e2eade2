//! Shaping raw `locations` rows into API records.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::hours::{json_kind, parse_weekly_hours, HoursKind, HoursParseError, WeeklyHours};

/// Column carrying the store identifier, used for log context.
pub const STORE_ID_FIELD: &str = "storeId";

/// One row from the `locations` table, keyed by column name in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationRow(pub Map<String, Value>);

impl LocationRow {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

/// A location as returned by the API: the raw columns in their stored order,
/// with `openHours` and `driveThroughHours` holding parsed [`WeeklyHours`].
///
/// An hours field the row already carries keeps its column position; one the
/// row lacks is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocationRecord(Map<String, Value>);

impl LocationRecord {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Converts a raw row into a [`LocationRecord`]. Never fails: an hours field
/// that cannot be parsed is logged and replaced by [`WeeklyHours::unknown`].
#[must_use]
pub fn normalize(row: LocationRow) -> LocationRecord {
    let store_id = match row.get(STORE_ID_FIELD) {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::from("?"),
    };

    let mut fields = row.0;
    for kind in [HoursKind::Store, HoursKind::DriveThrough] {
        let hours = resolve_hours(fields.get(kind.field_name()), kind, &store_id);
        fields.insert(kind.field_name().to_string(), hours.into());
    }

    LocationRecord(fields)
}

fn resolve_hours(raw: Option<&Value>, kind: HoursKind, store_id: &str) -> WeeklyHours {
    let parsed = match raw {
        None | Some(Value::Null) => return WeeklyHours::unknown(kind),
        Some(Value::String(text)) if text.is_empty() => return WeeklyHours::unknown(kind),
        Some(Value::String(text)) => parse_weekly_hours(text),
        Some(other) => Err(HoursParseError::NotText(json_kind(other))),
    };

    parsed.unwrap_or_else(|error| {
        tracing::warn!(
            store_id,
            field = kind.field_name(),
            error = %error,
            "malformed hours text; using defaults"
        );
        WeeklyHours::unknown(kind)
    })
}
