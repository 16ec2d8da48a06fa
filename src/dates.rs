//! Day-precision date handling for the `dd/mm/yyyy` format used at every
//! boundary of the crate (HTTP payloads, CSV imports, holiday files, CLI).

use chrono::NaiveDate;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("date is empty")]
    Empty,
    #[error("'{input}' is not a valid dd/mm/yyyy date")]
    Malformed { input: String },
}

/// `dd/mm/yyyy` with exactly two, two and four ASCII digits.
fn has_date_shape(input: &str) -> bool {
    let fields: Vec<&str> = input.split('/').collect();
    fields.len() == 3
        && fields
            .iter()
            .zip([2, 2, 4])
            .all(|(field, len)| field.len() == len && field.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse a `dd/mm/yyyy` date. chrono alone would also take `1/7/2024` or a
/// two-digit year, so the field widths are checked first.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    let malformed = || DateParseError::Malformed {
        input: trimmed.to_string(),
    };
    if !has_date_shape(trimmed) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| malformed())
}

/// Parse an optional start date, treating anything unparsable as "no date".
///
/// Malformed input is logged and dropped instead of failing the caller, so a
/// module with a bad date simply contributes no anchor candidate.
pub fn parse_optional_date(input: Option<&str>) -> Option<NaiveDate> {
    match parse_date(input?) {
        Ok(date) => Some(date),
        Err(DateParseError::Empty) => None,
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed start date");
            None
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `NaiveDate` fields carried as `dd/mm/yyyy` strings.
pub mod serde_format {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(D::Error::custom)
    }
}

/// Week counts arrive from forms and spreadsheets as numbers or strings.
/// Anything that is not a non-negative whole number counts as zero weeks.
pub mod lenient_weeks {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(weeks_from_value).unwrap_or(0))
    }

    pub fn weeks_from_value(value: &Value) -> u32 {
        match value {
            Value::Number(number) => number
                .as_u64()
                .map(|weeks| u32::try_from(weeks).unwrap_or(u32::MAX))
                .unwrap_or(0),
            Value::String(text) => weeks_from_str(text),
            _ => 0,
        }
    }

    pub fn weeks_from_str(text: &str) -> u32 {
        text.trim().parse::<u32>().unwrap_or(0)
    }
}
