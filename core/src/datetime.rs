// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;

use crate::error::ValidationError;

/// Timestamps travel as datetime-local strings without a timezone.
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Some datetime-local inputs emit a trailing seconds component.
const DATETIME_LOCAL_SECS: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a datetime-local timestamp, tolerating a trailing seconds part.
#[must_use]
pub fn parse_datetime_local(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_LOCAL)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_LOCAL_SECS))
        .ok()
}

/// Formats a timestamp as a minute-precision datetime-local string.
#[must_use]
pub fn format_datetime_local(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_LOCAL).to_string()
}

/// Parses a required timestamp field, naming the field in the error.
pub(crate) fn require_datetime_local(
    value: &str,
    field: &'static str,
) -> Result<NaiveDateTime, ValidationError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    parse_datetime_local(raw).ok_or(ValidationError::InvalidTimestamp(field))
}
