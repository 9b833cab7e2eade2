//! Validated request parameters for the location queries.
//!
//! Validation runs before any storage access: a [`ParamError`] short-circuits
//! the request, while a bad `page` value is never an error and silently clamps
//! to the first page.

use thiserror::Error;

/// Fixed number of records returned per page.
pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Invalid or missing {0} parameter")]
    InvalidParameter(&'static str),
}

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

impl Page {
    /// Interprets a raw `page` query value.
    ///
    /// Leading whitespace and an optional sign are accepted, then the leading
    /// run of digits is used (`"3.5"` is page 3, `"2abc"` is page 2). Absent,
    /// non-numeric, or sub-1 values resolve to page 1.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(leading_integer)
            .filter(|n| *n >= 1)
            .map_or_else(Self::default, Self)
    }

    #[must_use]
    pub fn number(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        PAGE_SIZE
    }

    /// Row offset of this page: `(page - 1) * PAGE_SIZE`, saturating.
    #[must_use]
    pub fn offset(self) -> i64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }
}

/// Parses the integer prefix of `raw`, or `None` when there is no digit.
/// Digit runs too large for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Two-character state code, uppercased for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCode(String);

impl StateCode {
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidParameter`] when the value is absent or is
    /// not exactly two characters long.
    pub fn parse(raw: Option<&str>) -> Result<Self, ParamError> {
        match raw {
            Some(code) if code.chars().count() == 2 => Ok(Self(code.to_uppercase())),
            _ => Err(ParamError::InvalidParameter("state")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// City filter value. Matching is case-insensitive on both sides and is
/// done by storage, so the input is kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityName(String);

impl CityName {
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidParameter`] when the value is absent or empty.
    pub fn parse(raw: Option<&str>) -> Result<Self, ParamError> {
        match raw {
            Some(city) if !city.is_empty() => Ok(Self(city.to_string())),
            _ => Err(ParamError::InvalidParameter("city")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
