// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use reflow_api::{ApiError, DateRange, EventPayload, EventsClient, GoogleId};
use tokio::sync::{Mutex, watch};
use tokio::time::MissedTickBehavior;

use crate::error::Error;
use crate::event::Event;

/// Default poll interval in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Client-side view of the event collection.
///
/// Holds the one canonical copy of the collection. The collection only
/// changes when a fetch completes, so a failed refresh leaves the previous
/// view readable. When a poll and a post-mutation refresh race, the last
/// response to arrive wins.
#[derive(Debug)]
pub struct EventStore {
    client: EventsClient,
    events: Vec<Event>,
}

impl EventStore {
    /// Creates a store over the given API client with an empty collection.
    #[must_use]
    pub fn new(client: EventsClient) -> Self {
        Self {
            client,
            events: Vec::new(),
        }
    }

    /// The canonical collection, in server order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Replaces the collection with a fresh listing.
    ///
    /// Events that fail to decode are skipped with a warning rather than
    /// poisoning the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the listing request fails; the previous
    /// collection is kept.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let payloads = self.client.list_events().await?;
        self.events = decode_events(&payloads);
        tracing::debug!(count = self.events.len(), "refreshed event collection");
        Ok(())
    }

    /// Lists events overlapping the given day range.
    ///
    /// Does not touch the canonical collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the listing request fails.
    pub async fn fetch_range(&self, range: &DateRange) -> Result<Vec<Event>, Error> {
        let payloads = self.client.list_events_in_range(range).await?;
        Ok(decode_events(&payloads))
    }

    /// Creates or updates an event, then refreshes the collection.
    ///
    /// An event without a `google_id` is created; one with an id is replaced
    /// wholesale under that id. A refresh failure after a successful save is
    /// logged and swallowed, the next poll catches up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the save request fails or its response is
    /// not a decodable event.
    pub async fn save(&mut self, event: &Event) -> Result<Event, Error> {
        let payload = event.to_payload();
        let saved = match event.google_id() {
            Some(id) => self.client.update_event(id, &payload).await?,
            None => self.client.create_event(&payload).await?,
        };
        let saved =
            Event::try_from(&saved).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.refresh_after_mutation().await;
        Ok(saved)
    }

    /// Deletes the event with the given id, then refreshes the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the delete fails, [`ApiError::NotFound`]
    /// when the id is already gone; the collection stays unchanged.
    pub async fn remove(&mut self, id: &GoogleId) -> Result<(), Error> {
        self.client.delete_event(id).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "refresh after mutation failed, view is stale");
        }
    }
}

fn decode_events(payloads: &[EventPayload]) -> Vec<Event> {
    payloads
        .iter()
        .filter_map(|payload| match Event::try_from(payload) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, summary = %payload.summary, "skipping undecodable event");
                None
            }
        })
        .collect()
}

/// Periodic background refresh of a shared [`EventStore`].
///
/// Each tick drives one [`EventStore::refresh`], logging and swallowing
/// failures so the loop keeps going with the stale view. Stopping, or
/// dropping the handle, stops scheduling further ticks; a refresh already in
/// flight runs to completion.
#[derive(Debug)]
pub struct Poller {
    shutdown: watch::Sender<bool>,
    refreshed: watch::Receiver<u64>,
}

impl Poller {
    /// Spawns the poll loop with the given tick period.
    ///
    /// The first refresh fires immediately.
    #[must_use]
    pub fn spawn(store: Arc<Mutex<EventStore>>, period: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);
        let (refreshed_tx, refreshed) = watch::channel(0u64);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut polls = 0u64;
            loop {
                tokio::select! {
                    _ = stop.changed() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = store.lock().await.refresh().await {
                            tracing::warn!(error = %e, "poll failed, keeping stale events");
                        }
                        polls += 1;
                        let _ = refreshed_tx.send(polls);
                    }
                }
            }
            tracing::debug!(polls, "poller stopped");
        });

        Self { shutdown, refreshed }
    }

    /// A receiver notified after each completed poll.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.refreshed.clone()
    }

    /// Stops scheduling further polls. An in-flight refresh completes.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }
}
