// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use reflow_api::GoogleId;

use crate::datetime::{format_datetime_local, require_datetime_local};
use crate::error::{Error, ValidationError};
use crate::event::{Event, EventKind};
use crate::store::EventStore;

/// Raw form state for the edit surface.
///
/// Every time and duration field holds the string the user typed; an empty
/// string means unset, never zero. Typed coercion happens exactly once, in
/// [`EventDraft::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    /// Update key carried over from a loaded event; `None` drafts create.
    pub google_id: Option<GoogleId>,
    /// Display name.
    pub summary: String,
    /// Mode toggle selecting which field set below is active.
    pub is_flexible: bool,
    /// Fixed mode: start timestamp.
    pub start_time: String,
    /// Fixed mode: end timestamp.
    pub end_time: String,
    /// Flexible mode: earliest acceptable start of the window.
    pub earliest_start: String,
    /// Flexible mode: latest acceptable end of the window.
    pub latest_end: String,
    /// Flexible mode: target duration in minutes.
    pub duration_minutes: String,
}

impl EventDraft {
    /// Seeds a draft from an existing event.
    ///
    /// Only the active mode's fields are populated; the other set stays
    /// empty.
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        let mut draft = Self {
            google_id: event.google_id().cloned(),
            summary: event.summary().to_owned(),
            ..Self::default()
        };
        match event.kind() {
            EventKind::Fixed { start, end } => {
                draft.start_time = format_datetime_local(*start);
                draft.end_time = format_datetime_local(*end);
            }
            EventKind::Flexible {
                earliest_start,
                latest_end,
                duration_minutes,
            } => {
                draft.is_flexible = true;
                draft.earliest_start = format_datetime_local(*earliest_start);
                draft.latest_end = format_datetime_local(*latest_end);
                draft.duration_minutes = duration_minutes.to_string();
            }
        }
        draft
    }

    /// Applies a single field change.
    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Summary(value) => self.summary = value,
            DraftChange::Flexible(value) => self.is_flexible = value,
            DraftChange::StartTime(value) => self.start_time = value,
            DraftChange::EndTime(value) => self.end_time = value,
            DraftChange::EarliestStart(value) => self.earliest_start = value,
            DraftChange::LatestEnd(value) => self.latest_end = value,
            DraftChange::DurationMinutes(value) => self.duration_minutes = value,
        }
    }

    /// Coerces the draft into a validated [`Event`].
    ///
    /// Only the active mode's fields are read, so values left over from
    /// toggling the mode never reach the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing or invalid
    /// field, or the violated invariant.
    pub fn parse(&self) -> Result<Event, ValidationError> {
        if self.summary.trim().is_empty() {
            return Err(ValidationError::EmptySummary);
        }
        let event = if self.is_flexible {
            let earliest_start = require_datetime_local(&self.earliest_start, "earliest start")?;
            let latest_end = require_datetime_local(&self.latest_end, "latest end")?;
            let duration_minutes = self.parse_duration()?;
            Event::flexible(
                self.summary.clone(),
                earliest_start,
                latest_end,
                duration_minutes,
            )?
        } else {
            let start = require_datetime_local(&self.start_time, "start time")?;
            let end = require_datetime_local(&self.end_time, "end time")?;
            Event::fixed(self.summary.clone(), start, end)?
        };
        Ok(match &self.google_id {
            Some(id) => event.with_google_id(id.clone()),
            None => event,
        })
    }

    fn parse_duration(&self) -> Result<u32, ValidationError> {
        let raw = self.duration_minutes.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingField("duration"));
        }
        raw.parse().map_err(|_| ValidationError::InvalidDuration)
    }
}

/// A single field change applied to the draft under edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    /// Replace the summary text.
    Summary(String),
    /// Switch between fixed and flexible mode.
    Flexible(bool),
    /// Replace the fixed start timestamp text.
    StartTime(String),
    /// Replace the fixed end timestamp text.
    EndTime(String),
    /// Replace the earliest window start text.
    EarliestStart(String),
    /// Replace the latest window end text.
    LatestEnd(String),
    /// Replace the duration text.
    DurationMinutes(String),
}

/// Where the edit surface currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No edit session.
    #[default]
    Closed,
    /// Drafting a new event.
    Creating,
    /// Editing a loaded event.
    Editing(Event),
}

/// Single-session edit state machine feeding the store.
///
/// At most one draft exists at a time; opening a new session replaces any
/// unsaved draft. The editor never touches the store's collection directly,
/// every persisted change goes through [`Editor::submit`].
#[derive(Debug, Default)]
pub struct Editor {
    state: EditorState,
    draft: EventDraft,
}

impl Editor {
    /// Creates a closed editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current surface state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Whether an edit session is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditorState::Closed)
    }

    /// The draft under edit.
    #[must_use]
    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    /// Opens an empty fixed-mode draft for a new event.
    pub fn begin_create(&mut self) {
        self.draft = EventDraft::default();
        self.state = EditorState::Creating;
    }

    /// Opens a draft seeded from an existing event.
    pub fn begin_edit(&mut self, event: &Event) {
        self.draft = EventDraft::from_event(event);
        self.state = EditorState::Editing(event.clone());
    }

    /// Applies a field change to the open draft.
    ///
    /// Changes arriving while the surface is closed are dropped.
    pub fn update(&mut self, change: DraftChange) {
        if self.is_open() {
            self.draft.apply(change);
        } else {
            tracing::debug!(?change, "dropping draft change while closed");
        }
    }

    /// Closes the surface, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = EventDraft::default();
        self.state = EditorState::Closed;
    }

    /// Parses the draft and saves it through the store.
    ///
    /// A draft carrying a `google_id` updates that event; one without
    /// creates. The surface closes and the draft is discarded only on
    /// success; any failure leaves both intact so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the draft does not parse and
    /// [`Error::Api`] when the save fails.
    pub async fn submit(&mut self, store: &mut EventStore) -> Result<Event, Error> {
        let event = self.draft.parse()?;
        let saved = store.save(&event).await?;
        tracing::debug!(summary = %saved.summary(), "submitted event");
        self.cancel();
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::parse_datetime_local;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        parse_datetime_local(s).expect("valid timestamp")
    }

    fn fixed_event() -> Event {
        Event::fixed("Dinner", ts("2024-06-01T18:00"), ts("2024-06-01T20:00"))
            .expect("valid event")
            .with_google_id(GoogleId::from("abc123"))
    }

    fn flexible_event() -> Event {
        Event::flexible("Gym", ts("2024-06-02T06:00"), ts("2024-06-02T22:00"), 60)
            .expect("valid event")
            .with_google_id(GoogleId::from("abc123"))
    }

    #[test]
    fn begin_create_opens_an_empty_fixed_draft() {
        let mut editor = Editor::new();
        editor.begin_create();

        assert_eq!(editor.state(), &EditorState::Creating);
        assert_eq!(editor.draft(), &EventDraft::default());
        assert!(!editor.draft().is_flexible);
    }

    #[test]
    fn begin_edit_seeds_only_the_active_fields() {
        let mut editor = Editor::new();
        editor.begin_edit(&flexible_event());

        let draft = editor.draft();
        assert_eq!(editor.state(), &EditorState::Editing(flexible_event()));
        assert_eq!(draft.google_id, Some(GoogleId::from("abc123")));
        assert_eq!(draft.summary, "Gym");
        assert!(draft.is_flexible);
        assert_eq!(draft.earliest_start, "2024-06-02T06:00");
        assert_eq!(draft.latest_end, "2024-06-02T22:00");
        assert_eq!(draft.duration_minutes, "60");
        assert_eq!(draft.start_time, "");
        assert_eq!(draft.end_time, "");
    }

    #[test]
    fn update_applies_changes_only_while_open() {
        let mut editor = Editor::new();
        editor.update(DraftChange::Summary("ignored".to_string()));
        assert_eq!(editor.draft().summary, "");

        editor.begin_create();
        editor.update(DraftChange::Summary("Dinner".to_string()));
        assert_eq!(editor.draft().summary, "Dinner");
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut editor = Editor::new();
        editor.begin_edit(&fixed_event());
        editor.update(DraftChange::Summary("Changed".to_string()));
        editor.cancel();

        assert_eq!(editor.state(), &EditorState::Closed);
        assert_eq!(editor.draft(), &EventDraft::default());
    }

    #[test]
    fn opening_a_new_session_replaces_the_draft() {
        let mut editor = Editor::new();
        editor.begin_edit(&fixed_event());
        editor.update(DraftChange::Summary("Unsaved".to_string()));

        editor.begin_create();
        assert_eq!(editor.draft(), &EventDraft::default());
    }

    #[test]
    fn fixed_mode_requires_both_times() {
        let mut draft = EventDraft {
            summary: "Dinner".to_string(),
            ..EventDraft::default()
        };
        assert_eq!(
            draft.parse(),
            Err(ValidationError::MissingField("start time"))
        );

        draft.start_time = "2024-06-01T18:00".to_string();
        assert_eq!(draft.parse(), Err(ValidationError::MissingField("end time")));

        draft.end_time = "2024-06-01T20:00".to_string();
        assert!(draft.parse().is_ok());
    }

    #[test]
    fn flexible_mode_requires_window_and_duration() {
        let mut draft = EventDraft {
            summary: "Gym".to_string(),
            is_flexible: true,
            earliest_start: "2024-06-02T06:00".to_string(),
            latest_end: "2024-06-02T22:00".to_string(),
            ..EventDraft::default()
        };
        assert_eq!(draft.parse(), Err(ValidationError::MissingField("duration")));

        draft.duration_minutes = "60".to_string();
        assert!(draft.parse().is_ok());
    }

    #[test]
    fn duration_must_be_a_whole_number() {
        let mut draft = EventDraft {
            summary: "Gym".to_string(),
            is_flexible: true,
            earliest_start: "2024-06-02T06:00".to_string(),
            latest_end: "2024-06-02T22:00".to_string(),
            duration_minutes: "-30".to_string(),
            ..EventDraft::default()
        };
        assert_eq!(draft.parse(), Err(ValidationError::InvalidDuration));

        draft.duration_minutes = "an hour".to_string();
        assert_eq!(draft.parse(), Err(ValidationError::InvalidDuration));

        draft.duration_minutes = "0".to_string();
        assert!(draft.parse().is_ok());
    }

    #[test]
    fn toggling_the_mode_leaves_no_stale_values() {
        let mut editor = Editor::new();
        editor.begin_edit(&fixed_event());
        editor.update(DraftChange::Flexible(true));
        editor.update(DraftChange::EarliestStart("2024-06-01T08:00".to_string()));
        editor.update(DraftChange::LatestEnd("2024-06-01T22:00".to_string()));
        editor.update(DraftChange::DurationMinutes("90".to_string()));

        let event = editor.draft().parse().expect("valid draft");
        let payload = event.to_payload();
        assert!(payload.is_flexible);
        assert_eq!(payload.start_time, "");
        assert_eq!(payload.end_time, "");
        assert_eq!(payload.duration_minutes, Some(90));
    }

    #[test]
    fn parse_round_trips_a_loaded_event() {
        for event in [fixed_event(), flexible_event()] {
            let draft = EventDraft::from_event(&event);
            assert_eq!(draft.parse(), Ok(event));
        }
    }
}
