//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as loosely typed DTOs; these helpers turn them into
//! domain values and report failures as `InvalidRequest` with the offending
//! field under `details.field`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::json;

use crate::domain::{Error, EventCategory};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Trimmed value of a required text field; blank counts as missing.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be an RFC 3339 timestamp")).with_details(json!({
        "field": name,
        "value": value,
        "code": ErrorCode::InvalidTimestamp.as_str(),
    }))
}

/// Parse an RFC 3339 timestamp, or a `datetime-local` style value
/// (`YYYY-MM-DDTHH:MM[:SS]`) read as UTC.
pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid_timestamp_error(field, value))
}

pub(crate) fn require_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    let raw = require_text(value, field)?;
    parse_timestamp(&raw, field)
}

/// Parse an event category; anything but `onstage`/`offstage` is rejected.
pub(crate) fn parse_category(value: Option<String>) -> Result<EventCategory, Error> {
    let raw = require_text(value, FieldName::new("category"))?;
    raw.parse().map_err(|_| Error::invalid_category(&raw))
}

/// Positive participant limit, defaulting when absent.
pub(crate) fn positive_or_default(
    value: Option<i32>,
    default: i32,
    field: FieldName,
) -> Result<i32, Error> {
    match value {
        None => Ok(default),
        Some(limit) if limit >= 1 => Ok(limit),
        Some(limit) => {
            let name = field.as_str();
            Err(Error::invalid_request(format!("{name} must be at least 1")).with_details(
                json!({
                    "field": name,
                    "value": limit,
                    "code": ErrorCode::OutOfRange.as_str(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("eventDate");

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("2026-03-14T18:30:00Z", utc(18, 30, 0))]
    #[case("2026-03-14T20:30:00+02:00", utc(18, 30, 0))]
    #[case("2026-03-14T18:30", utc(18, 30, 0))]
    #[case("2026-03-14T18:30:15", utc(18, 30, 15))]
    #[case(" 2026-03-14T18:30 ", utc(18, 30, 0))]
    fn accepts_rfc3339_and_datetime_local(#[case] raw: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_timestamp(raw, FIELD).expect("valid timestamp"), expected);
    }

    #[rstest]
    #[case("tomorrow")]
    #[case("2026-03-14")]
    #[case("14/03/2026 18:30")]
    fn rejects_other_timestamp_shapes(#[case] raw: &str) {
        let err = parse_timestamp(raw, FIELD).expect_err("invalid timestamp");
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "eventDate");
        assert_eq!(details["code"], "invalid_timestamp");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_required_text_is_missing(#[case] value: Option<String>) {
        let err = require_text(value, FieldName::new("name")).expect_err("blank");
        assert_eq!(err.reason(), Some("missing_field"));
    }

    #[rstest]
    fn required_text_is_trimmed() {
        let value = require_text(Some("  Asha ".to_owned()), FieldName::new("name"));
        assert_eq!(value.expect("present"), "Asha");
    }

    #[rstest]
    #[case("onstage", EventCategory::Onstage)]
    #[case("offstage", EventCategory::Offstage)]
    fn parses_known_categories(#[case] raw: &str, #[case] expected: EventCategory) {
        assert_eq!(parse_category(Some(raw.to_owned())).expect("known"), expected);
    }

    #[rstest]
    fn unknown_category_is_invalid_category() {
        let err = parse_category(Some("backstage".to_owned())).expect_err("unknown");
        assert_eq!(err.reason(), Some("invalid_category"));
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some(12), 12)]
    fn participant_limit_defaults(#[case] value: Option<i32>, #[case] expected: i32) {
        let limit = positive_or_default(value, 1, FieldName::new("maxParticipants"));
        assert_eq!(limit.expect("valid"), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn participant_limit_must_be_positive(#[case] value: i32) {
        let err = positive_or_default(Some(value), 1, FieldName::new("maxParticipants"))
            .expect_err("non-positive");
        assert_eq!(err.reason(), Some("out_of_range"));
    }
}
