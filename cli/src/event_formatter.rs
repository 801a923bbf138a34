// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::NaiveDateTime;
use colored::Color;
use reflow_core::{Event, EventKind};

use crate::{
    table::{Column, PaddingDirection, Table},
    util::{OutputFormat, format_datetime},
};

/// Renders event collections for the terminal.
#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::GoogleId(EventColumnGoogleId),
                EventColumn::TimeSpan(EventColumnTimeSpan),
                EventColumn::Summary(EventColumnSummary),
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

impl Default for EventFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let payloads: Vec<_> = self.events.iter().map(Event::to_payload).collect();
                let json = serde_json::to_string_pretty(&payloads).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            OutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.events))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    GoogleId(EventColumnGoogleId),
    TimeSpan(EventColumnTimeSpan),
    Summary(EventColumnSummary),
}

impl Column<Event> for EventColumn {
    fn format(&self, event: &Event) -> String {
        match self {
            EventColumn::GoogleId(a) => a.format(event),
            EventColumn::TimeSpan(a) => a.format(event),
            EventColumn::Summary(a) => a.format(event),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::GoogleId(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, event: &Event) -> Option<Color> {
        event.is_flexible().then_some(Color::Cyan)
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnGoogleId;

impl EventColumnGoogleId {
    fn format(&self, event: &Event) -> String {
        match event.google_id() {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTimeSpan;

impl EventColumnTimeSpan {
    fn format(&self, event: &Event) -> String {
        match event.kind() {
            EventKind::Fixed { start, end } => format_span(*start, *end),
            EventKind::Flexible {
                earliest_start,
                latest_end,
                duration_minutes,
            } => format!(
                "{} ({duration_minutes} min)",
                format_span(*earliest_start, *latest_end)
            ),
        }
    }
}

fn format_span(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!(
            "{} {}~{}",
            start.format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        )
    } else {
        format!("{}~{}", format_datetime(start), format_datetime(end))
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnSummary;

impl EventColumnSummary {
    fn format(&self, event: &Event) -> String {
        event.summary().to_string()
    }
}
