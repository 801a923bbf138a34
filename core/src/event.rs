// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Duration, NaiveDateTime};
use reflow_api::{EventPayload, GoogleId};

use crate::datetime::{format_datetime_local, require_datetime_local};
use crate::error::ValidationError;

/// A calendar event.
///
/// Events come in two mutually exclusive shapes: fixed events pinned to
/// absolute start and end times, and flexible events that ask for a target
/// duration somewhere inside a window. Construction validates the active
/// shape's invariants, so a held `Event` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    google_id: Option<GoogleId>,
    summary: String,
    kind: EventKind,
}

/// The two shapes an event can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Pinned to absolute times.
    Fixed {
        /// Start timestamp, before `end`.
        start: NaiveDateTime,
        /// End timestamp.
        end: NaiveDateTime,
    },
    /// Wants a duration scheduled somewhere inside the window.
    Flexible {
        /// Earliest acceptable start of the window.
        earliest_start: NaiveDateTime,
        /// Latest acceptable end of the window.
        latest_end: NaiveDateTime,
        /// Target duration in minutes, fits within the window.
        duration_minutes: u32,
    },
}

impl Event {
    /// Creates a fixed event without a provider id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the summary is empty or `start` is
    /// not before `end`.
    pub fn fixed(
        summary: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        Self::new(summary.into(), EventKind::Fixed { start, end })
    }

    /// Creates a flexible event without a provider id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the summary is empty, the window is
    /// inverted, or the duration does not fit the window.
    pub fn flexible(
        summary: impl Into<String>,
        earliest_start: NaiveDateTime,
        latest_end: NaiveDateTime,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(
            summary.into(),
            EventKind::Flexible {
                earliest_start,
                latest_end,
                duration_minutes,
            },
        )
    }

    fn new(summary: String, kind: EventKind) -> Result<Self, ValidationError> {
        if summary.trim().is_empty() {
            return Err(ValidationError::EmptySummary);
        }
        match kind {
            EventKind::Fixed { start, end } if start >= end => {
                Err(ValidationError::StartNotBeforeEnd)
            }
            EventKind::Flexible {
                earliest_start,
                latest_end,
                ..
            } if earliest_start >= latest_end => Err(ValidationError::StartNotBeforeEnd),
            EventKind::Flexible {
                earliest_start,
                latest_end,
                duration_minutes,
            } if latest_end - earliest_start < Duration::minutes(i64::from(duration_minutes)) => {
                Err(ValidationError::DurationExceedsWindow)
            }
            kind => Ok(Self {
                google_id: None,
                summary,
                kind,
            }),
        }
    }

    /// Attaches the provider-assigned id. An empty id is treated as absent.
    #[must_use]
    pub fn with_google_id(mut self, id: GoogleId) -> Self {
        self.google_id = (!id.is_empty()).then_some(id);
        self
    }

    /// The provider-assigned id, absent until the event is first created.
    #[must_use]
    pub fn google_id(&self) -> Option<&GoogleId> {
        self.google_id.as_ref()
    }

    /// The display name.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The shape of the event.
    #[must_use]
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Whether this is a flexible event.
    #[must_use]
    pub fn is_flexible(&self) -> bool {
        matches!(self.kind, EventKind::Flexible { .. })
    }

    /// Encodes the event for the wire.
    ///
    /// Only the active shape's fields are carried. A fixed event omits the
    /// flexible-only keys entirely; a flexible event sends `start_time` and
    /// `end_time` as empty strings, since the service requires those keys on
    /// every payload.
    #[must_use]
    pub fn to_payload(&self) -> EventPayload {
        match &self.kind {
            EventKind::Fixed { start, end } => EventPayload {
                summary: self.summary.clone(),
                start_time: format_datetime_local(*start),
                end_time: format_datetime_local(*end),
                earliest_start: None,
                latest_end: None,
                is_flexible: false,
                duration_minutes: None,
                google_id: self.google_id.clone(),
            },
            EventKind::Flexible {
                earliest_start,
                latest_end,
                duration_minutes,
            } => EventPayload {
                summary: self.summary.clone(),
                start_time: String::new(),
                end_time: String::new(),
                earliest_start: Some(format_datetime_local(*earliest_start)),
                latest_end: Some(format_datetime_local(*latest_end)),
                is_flexible: true,
                duration_minutes: Some(*duration_minutes),
                google_id: self.google_id.clone(),
            },
        }
    }
}

impl TryFrom<&EventPayload> for Event {
    type Error = ValidationError;

    /// Decodes a wire payload, selecting the field set by `is_flexible` and
    /// ignoring the inactive set. An empty `google_id` decodes as absent.
    fn try_from(payload: &EventPayload) -> Result<Self, Self::Error> {
        let mut event = if payload.is_flexible {
            let earliest_start = require_datetime_local(
                payload.earliest_start.as_deref().unwrap_or(""),
                "earliest start",
            )?;
            let latest_end =
                require_datetime_local(payload.latest_end.as_deref().unwrap_or(""), "latest end")?;
            let duration_minutes = payload
                .duration_minutes
                .ok_or(ValidationError::MissingField("duration"))?;
            Self::flexible(
                payload.summary.clone(),
                earliest_start,
                latest_end,
                duration_minutes,
            )?
        } else {
            let start = require_datetime_local(&payload.start_time, "start time")?;
            let end = require_datetime_local(&payload.end_time, "end time")?;
            Self::fixed(payload.summary.clone(), start, end)?
        };
        if let Some(id) = &payload.google_id {
            event = event.with_google_id(id.clone());
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::parse_datetime_local;

    fn ts(s: &str) -> NaiveDateTime {
        parse_datetime_local(s).expect("valid timestamp")
    }

    #[test]
    fn rejects_empty_summary() {
        let err = Event::fixed("  ", ts("2024-06-01T18:00"), ts("2024-06-01T20:00"));
        assert_eq!(err, Err(ValidationError::EmptySummary));
    }

    #[test]
    fn fixed_start_must_precede_end() {
        let err = Event::fixed("Dinner", ts("2024-06-01T20:00"), ts("2024-06-01T18:00"));
        assert_eq!(err, Err(ValidationError::StartNotBeforeEnd));

        let err = Event::fixed("Dinner", ts("2024-06-01T18:00"), ts("2024-06-01T18:00"));
        assert_eq!(err, Err(ValidationError::StartNotBeforeEnd));
    }

    #[test]
    fn flexible_window_must_not_be_inverted() {
        let err = Event::flexible("Gym", ts("2024-06-02T22:00"), ts("2024-06-02T06:00"), 60);
        assert_eq!(err, Err(ValidationError::StartNotBeforeEnd));
    }

    #[test]
    fn flexible_duration_must_fit_window() {
        let err = Event::flexible("Gym", ts("2024-06-02T06:00"), ts("2024-06-02T08:00"), 121);
        assert_eq!(err, Err(ValidationError::DurationExceedsWindow));

        let ok = Event::flexible("Gym", ts("2024-06-02T06:00"), ts("2024-06-02T08:00"), 120);
        assert!(ok.is_ok());
    }

    #[test]
    fn empty_google_id_means_absent() {
        let event = Event::fixed("Dinner", ts("2024-06-01T18:00"), ts("2024-06-01T20:00"))
            .expect("valid event")
            .with_google_id(GoogleId::from(""));
        assert_eq!(event.google_id(), None);
    }

    #[test]
    fn fixed_payload_omits_flexible_keys() {
        let event = Event::fixed("Dinner", ts("2024-06-01T18:00"), ts("2024-06-01T20:00"))
            .expect("valid event");
        let payload = event.to_payload();

        assert_eq!(payload.summary, "Dinner");
        assert_eq!(payload.start_time, "2024-06-01T18:00");
        assert_eq!(payload.end_time, "2024-06-01T20:00");
        assert!(!payload.is_flexible);
        assert_eq!(payload.earliest_start, None);
        assert_eq!(payload.latest_end, None);
        assert_eq!(payload.duration_minutes, None);
        assert_eq!(payload.google_id, None);
    }

    #[test]
    fn flexible_payload_blanks_fixed_times() {
        let event = Event::flexible("Gym", ts("2024-06-02T06:00"), ts("2024-06-02T22:00"), 60)
            .expect("valid event")
            .with_google_id(GoogleId::from("abc123"));
        let payload = event.to_payload();

        assert_eq!(payload.start_time, "");
        assert_eq!(payload.end_time, "");
        assert!(payload.is_flexible);
        assert_eq!(payload.earliest_start.as_deref(), Some("2024-06-02T06:00"));
        assert_eq!(payload.latest_end.as_deref(), Some("2024-06-02T22:00"));
        assert_eq!(payload.duration_minutes, Some(60));
        assert_eq!(payload.google_id, Some(GoogleId::from("abc123")));
    }

    #[test]
    fn decode_ignores_inactive_fields() {
        // Flexible events may come back with server-side placement in the
        // fixed time slots.
        let payload = EventPayload {
            summary: "Gym".to_string(),
            start_time: "2024-06-02T07:00".to_string(),
            end_time: "2024-06-02T08:00".to_string(),
            earliest_start: Some("2024-06-02T06:00".to_string()),
            latest_end: Some("2024-06-02T22:00".to_string()),
            is_flexible: true,
            duration_minutes: Some(60),
            google_id: Some(GoogleId::from("abc123")),
        };

        let event = Event::try_from(&payload).expect("valid payload");
        assert_eq!(
            event.kind(),
            &EventKind::Flexible {
                earliest_start: ts("2024-06-02T06:00"),
                latest_end: ts("2024-06-02T22:00"),
                duration_minutes: 60,
            }
        );
    }

    #[test]
    fn decode_requires_active_fields() {
        let payload = EventPayload {
            summary: "Gym".to_string(),
            is_flexible: true,
            ..EventPayload::default()
        };
        let err = Event::try_from(&payload);
        assert_eq!(err, Err(ValidationError::MissingField("earliest start")));

        let payload = EventPayload {
            summary: "Dinner".to_string(),
            start_time: "2024-06-01T18:00".to_string(),
            ..EventPayload::default()
        };
        let err = Event::try_from(&payload);
        assert_eq!(err, Err(ValidationError::MissingField("end time")));
    }

    #[test]
    fn payload_round_trip() {
        let fixed = Event::fixed("Dinner", ts("2024-06-01T18:00"), ts("2024-06-01T20:00"))
            .expect("valid event")
            .with_google_id(GoogleId::from("srv42"));
        assert_eq!(Event::try_from(&fixed.to_payload()), Ok(fixed));

        let flexible = Event::flexible("Gym", ts("2024-06-02T06:00"), ts("2024-06-02T22:00"), 60)
            .expect("valid event");
        assert_eq!(Event::try_from(&flexible.to_payload()), Ok(flexible));
    }
}
