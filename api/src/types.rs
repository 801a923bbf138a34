// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

use chrono::NaiveDate;

/// External identifier assigned by the calendar provider.
///
/// A `GoogleId` marks an event as persisted server-side and is the key for
/// update and delete operations. The wire may carry an empty string for
/// not-yet-created events; callers should treat empty as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GoogleId(String);

impl GoogleId {
    /// Creates a new `GoogleId` from a string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty placeholder the wire uses for drafts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for GoogleId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for GoogleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoogleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GoogleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GoogleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// An event as exchanged with the service.
///
/// The `is_flexible` flag selects which field set is meaningful: fixed events
/// use `start_time`/`end_time`, flexible events use `earliest_start`/
/// `latest_end`/`duration_minutes`. The service requires the `start_time` and
/// `end_time` keys on every payload, so flexible events carry them as empty
/// strings; the flexible-only keys are omitted entirely on fixed payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventPayload {
    /// Display name.
    pub summary: String,
    /// Fixed start, datetime-local form; empty on flexible events.
    #[serde(default)]
    pub start_time: String,
    /// Fixed end, datetime-local form; empty on flexible events.
    #[serde(default)]
    pub end_time: String,
    /// Earliest admissible start of the window (flexible only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_start: Option<String>,
    /// Latest admissible end of the window (flexible only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_end: Option<String>,
    /// Discriminator between the two field sets.
    #[serde(default)]
    pub is_flexible: bool,
    /// Target duration in minutes (flexible only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Provider-assigned id; omitted on create payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<GoogleId>,
}

/// Response envelope for the list endpoint.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EventList {
    /// The full event collection.
    pub events: Vec<EventPayload>,
}

/// Day-precision bounds for the range-filtered list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
}

impl DateRange {
    /// The `DD-MM-YYYY` form the service expects in query parameters.
    pub(crate) fn query_params(&self) -> [(&'static str, String); 3] {
        [
            ("in_range", "true".to_string()),
            ("from_date", self.from.format("%d-%m-%Y").to_string()),
            ("to_date", self.to.format("%d-%m-%Y").to_string()),
        ]
    }
}
