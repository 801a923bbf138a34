// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use reflow_core::{
    DateRange, Event, EventDraft, EventStore, EventsClient, GoogleId, Poller,
    format_datetime_local,
};
use tokio::sync::Mutex;

use crate::config::parse_config;
use crate::event_formatter::EventFormatter;
use crate::tui;
use crate::util::{OutputFormat, parse_date, parse_datetime};

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List events")
            .arg(
                arg!(--from <DATE> "First day of the range (inclusive)")
                    .value_parser(parse_date)
                    .requires("to"),
            )
            .arg(
                arg!(--to <DATE> "Last day of the range (inclusive)")
                    .value_parser(parse_date)
                    .requires("from"),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            from: matches.get_one::<NaiveDate>("from").copied(),
            to: matches.get_one::<NaiveDate>("to").copied(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let events = if let (Some(from), Some(to)) = (self.from, self.to) {
            store.fetch_range(&DateRange { from, to }).await?
        } else {
            store.refresh().await?;
            store.events().to_vec()
        };

        print_events(&events, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub summary: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub flexible: bool,
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
    pub duration: Option<u32>,

    pub tui: bool,
    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(arg!(--summary <SUMMARY> "The event summary"))
            .arg(arg!(--start <TIME> "Start time of a fixed event").value_parser(parse_datetime))
            .arg(arg!(--end <TIME> "End time of a fixed event").value_parser(parse_datetime))
            .arg(arg!(--flexible "Schedule within a window instead of at fixed times"))
            .arg(
                arg!(--earliest <TIME> "Earliest start of the window")
                    .value_parser(parse_datetime),
            )
            .arg(arg!(--latest <TIME> "Latest end of the window").value_parser(parse_datetime))
            .arg(
                arg!(--duration <MINUTES> "Target duration in minutes")
                    .value_parser(value_parser!(u32)),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let start = matches.get_one::<NaiveDateTime>("start").copied();
        let end = matches.get_one::<NaiveDateTime>("end").copied();
        let flexible = matches.get_flag("flexible");
        let earliest = matches.get_one::<NaiveDateTime>("earliest").copied();
        let latest = matches.get_one::<NaiveDateTime>("latest").copied();
        let duration = matches.get_one::<u32>("duration").copied();

        let summary = match matches.get_one::<String>("summary") {
            Some(summary) => Some(summary.clone()),

            None if start.is_none()
                && end.is_none()
                && !flexible
                && earliest.is_none()
                && latest.is_none()
                && duration.is_none() =>
            {
                None
            }

            // If summary is not provided but other fields are set, we still require a summary.
            None => return Err("Summary is required for new event".into()),
        };

        let tui = summary.is_none();
        Ok(Self {
            summary,
            start,
            end,
            flexible,
            earliest,
            latest,
            duration,

            tui,
            output_format: OutputFormat::from(matches),
        })
    }

    pub async fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let event = if self.tui {
            match tui::draft_event(store).await? {
                Some(event) => event,
                None => {
                    tracing::info!("user cancelled the event creation");
                    return Ok(());
                }
            }
        } else {
            let draft = EventDraft {
                google_id: None,
                summary: self.summary.unwrap_or_default(),
                is_flexible: self.flexible,
                start_time: self.start.map(format_datetime_local).unwrap_or_default(),
                end_time: self.end.map(format_datetime_local).unwrap_or_default(),
                earliest_start: self.earliest.map(format_datetime_local).unwrap_or_default(),
                latest_end: self.latest.map(format_datetime_local).unwrap_or_default(),
                duration_minutes: self.duration.map(|n| n.to_string()).unwrap_or_default(),
            };
            let event = draft.parse()?;
            store.save(&event).await?
        };

        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub google_id: String,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event in the interactive form")
            .arg(arg!(google_id: <GOOGLE_ID> "Provider-assigned id of the event"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("google_id") {
            Some(id) => Self {
                google_id: id.clone(),
                output_format: OutputFormat::from(matches),
            },
            _ => unreachable!(),
        }
    }

    pub async fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        store.refresh().await?;
        let event = store
            .events()
            .iter()
            .find(|e| e.google_id().is_some_and(|id| id.as_str() == self.google_id))
            .cloned()
            .ok_or("Event not found")?;

        match tui::edit_event(store, &event).await? {
            Some(event) => print_events(&[event], self.output_format),
            None => tracing::info!("user cancelled the event editing"),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub google_id: GoogleId,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Delete an event")
            .arg(arg!(google_id: <GOOGLE_ID> "Provider-assigned id of the event"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("google_id") {
            Some(id) => Self {
                google_id: GoogleId::from(id.as_str()),
            },
            _ => unreachable!(),
        }
    }

    pub async fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        store.remove(&self.google_id).await?;
        println!("Deleted event {}", self.google_id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventWatch {
    pub refresh: Option<u64>,
    pub output_format: OutputFormat,
}

impl CmdEventWatch {
    pub const NAME: &str = "watch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Watch the event list, re-rendering after each refresh")
            .arg(
                arg!(--refresh <SECS> "Seconds between refreshes (overrides the config value)")
                    .value_parser(refresh_in_range),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            refresh: matches.get_one::<u64>("refresh").copied(),
            output_format: OutputFormat::from(matches),
        }
    }

    /// Unlike the one-shot commands, the watch loop owns its store so the
    /// poller can share it.
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "watching events...");
        let config = parse_config(config).await?;
        let refresh_secs = self.refresh.unwrap_or(config.refresh_secs);

        let client = EventsClient::new(config.api)?;
        let store = Arc::new(Mutex::new(EventStore::new(client)));
        let poller = Poller::spawn(store.clone(), Duration::from_secs(refresh_secs));
        let mut refreshed = poller.subscribe();

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = refreshed.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    print_events(store.lock().await.events(), self.output_format);
                }
            }
        }

        poller.stop();
        Ok(())
    }
}

fn refresh_in_range(s: &str) -> Result<u64, String> {
    clap_num::number_range(s, 1, u64::MAX)
}

fn print_events(events: &[Event], output_format: OutputFormat) {
    if events.is_empty() && output_format == OutputFormat::Table {
        println!("{}", "No events found".italic());
        return;
    }
    let formatter = EventFormatter::new().with_output_format(output_format);
    println!("{}", formatter.format(events));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn ts(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_parse_list() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let matches = cmd
            .try_get_matches_from([
                "test", "list", "--from", "01-06-2024", "--to", "30-06-2024", "--output", "json",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEventList::from(sub_matches);

        assert_eq!(parsed.from, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(parsed.to, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_list_bare() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let matches = cmd.try_get_matches_from(["test", "list"]).unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEventList::from(sub_matches);

        assert_eq!(parsed.from, None);
        assert_eq!(parsed.to, None);
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_list_requires_paired_range() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let result = cmd.try_get_matches_from(["test", "list", "--from", "01-06-2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_event_new() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "new",
                "--summary",
                "Team dinner",
                "--start",
                "2024-06-01 18:00",
                "--end",
                "2024-06-01 20:00",
                "--output",
                "json",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEventNew::from(sub_matches).unwrap();

        assert_eq!(parsed.summary, Some("Team dinner".to_string()));
        assert_eq!(parsed.start, Some(ts("2024-06-01 18:00")));
        assert_eq!(parsed.end, Some(ts("2024-06-01 20:00")));
        assert!(!parsed.flexible);

        assert!(!parsed.tui);
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_event_new_flexible() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "new",
                "--summary",
                "Gym",
                "--flexible",
                "--earliest",
                "2024-06-02 06:00",
                "--latest",
                "2024-06-02 22:00",
                "--duration",
                "45",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEventNew::from(sub_matches).unwrap();

        assert!(parsed.flexible);
        assert_eq!(parsed.earliest, Some(ts("2024-06-02 06:00")));
        assert_eq!(parsed.latest, Some(ts("2024-06-02 22:00")));
        assert_eq!(parsed.duration, Some(45));
        assert!(!parsed.tui);
    }

    #[test]
    fn test_parse_new_tui() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let matches = cmd.try_get_matches_from(["test", "new"]).unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEventNew::from(sub_matches).unwrap();
        assert!(parsed.tui);
    }

    #[test]
    fn test_parse_new_requires_summary() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let matches = cmd
            .try_get_matches_from(["test", "new", "--start", "2024-06-01 18:00"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEventNew::from(sub_matches);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_new_rejects_bad_time() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let result =
            cmd.try_get_matches_from(["test", "new", "--summary", "X", "--start", "tomorrow"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventEdit::command());

        let matches = cmd
            .try_get_matches_from(["test", "edit", "abc123", "--output", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("edit").unwrap();
        let parsed = CmdEventEdit::from(sub_matches);

        assert_eq!(parsed.google_id, "abc123");
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_delete() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventDelete::command());

        let matches = cmd
            .try_get_matches_from(["test", "delete", "abc123"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("delete").unwrap();
        let parsed = CmdEventDelete::from(sub_matches);

        assert_eq!(parsed.google_id, GoogleId::from("abc123"));
    }

    #[test]
    fn test_parse_watch() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventWatch::command());

        let matches = cmd
            .try_get_matches_from(["test", "watch", "--refresh", "5", "--output", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("watch").unwrap();
        let parsed = CmdEventWatch::from(sub_matches);

        assert_eq!(parsed.refresh, Some(5));
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_watch_rejects_zero_refresh() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventWatch::command());

        let result = cmd.try_get_matches_from(["test", "watch", "--refresh", "0"]);
        assert!(result.is_err());
    }
}
