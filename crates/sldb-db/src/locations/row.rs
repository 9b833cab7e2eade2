//! Dynamic decoding of `locations` rows.
//!
//! The table is exposed as-is, so columns are not mapped onto a fixed struct.
//! Each value is converted by its runtime `SQLite` storage class.

use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use sldb_core::LocationRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl StorageClass {
    fn from_type_name(name: &str) -> Self {
        match name {
            "NULL" => Self::Null,
            "INTEGER" | "BOOLEAN" => Self::Integer,
            "REAL" => Self::Real,
            "BLOB" => Self::Blob,
            _ => Self::Text,
        }
    }
}

pub(super) fn decode_location_row(row: &SqliteRow) -> Result<LocationRow, sqlx::Error> {
    let mut columns = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = decode_value(row, column.ordinal())?;
        columns.insert(column.name().to_string(), value);
    }
    Ok(LocationRow(columns))
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let class = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            StorageClass::Null
        } else {
            StorageClass::from_type_name(raw.type_info().name())
        }
    };

    let value = match class {
        StorageClass::Null => Value::Null,
        StorageClass::Integer => Value::from(row.try_get::<i64, _>(index)?),
        StorageClass::Real => {
            let real = row.try_get::<f64, _>(index)?;
            Number::from_f64(real).map_or(Value::Null, Value::Number)
        }
        // Stored text is not guaranteed to be valid UTF-8.
        StorageClass::Text | StorageClass::Blob => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(value)
}
