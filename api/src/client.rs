// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Typed client for the events REST endpoints.

use std::sync::Arc;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{DateRange, EventList, EventPayload, GoogleId};

/// Client for the reflow event service.
///
/// # Example
///
/// ```ignore
/// use reflow_api::{ApiConfig, EventsClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     base_url: "http://localhost:8000".to_string(),
///     ..Default::default()
/// };
///
/// let client = EventsClient::new(config)?;
/// let events = client.list_events().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Arc<HttpClient>,
    config: ApiConfig,
}

impl EventsClient {
    /// Creates a new events client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Fetches the full event collection.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status code, or an
    /// undecodable body.
    pub async fn list_events(&self) -> Result<Vec<EventPayload>, ApiError> {
        let url = self.full_url("/events");
        let resp = self
            .http
            .execute(self.http.request(Method::GET, &url))
            .await?;

        let list: EventList = Self::decode(resp).await?;
        tracing::debug!(count = list.events.len(), "listed events");
        Ok(list.events)
    }

    /// Fetches the events overlapping a day range.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status code, or an
    /// undecodable body.
    pub async fn list_events_in_range(
        &self,
        range: &DateRange,
    ) -> Result<Vec<EventPayload>, ApiError> {
        let url = self.full_url("/events");
        let resp = self
            .http
            .execute(
                self.http
                    .request(Method::GET, &url)
                    .query(&range.query_params()),
            )
            .await?;

        let list: EventList = Self::decode(resp).await?;
        tracing::debug!(count = list.events.len(), ?range, "listed events in range");
        Ok(list.events)
    }

    /// Creates an event. The payload must not carry a `google_id`; the
    /// service assigns one.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status code, or an
    /// undecodable body.
    pub async fn create_event(&self, event: &EventPayload) -> Result<EventPayload, ApiError> {
        let url = self.full_url("/events");
        let resp = self
            .http
            .execute(self.http.request(Method::POST, &url).json(event))
            .await?;

        let created: EventPayload = Self::decode(resp).await?;
        tracing::debug!(summary = %created.summary, "created event");
        Ok(created)
    }

    /// Replaces an event with a full payload, keyed on its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the id no longer exists server-side,
    /// or another error on transport/status/decode failure.
    pub async fn update_event(
        &self,
        id: &GoogleId,
        event: &EventPayload,
    ) -> Result<EventPayload, ApiError> {
        let url = self.full_url(&format!("/events/{id}"));
        let resp = self
            .http
            .execute(self.http.request(Method::PUT, &url).json(event))
            .await?;

        let updated: EventPayload = Self::decode(resp).await?;
        tracing::debug!(%id, "updated event");
        Ok(updated)
    }

    /// Deletes an event keyed on its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the id no longer exists server-side,
    /// or another error on transport/status failure.
    pub async fn delete_event(&self, id: &GoogleId) -> Result<(), ApiError> {
        let url = self.full_url(&format!("/events/{id}"));
        self.http
            .execute(self.http.request(Method::DELETE, &url))
            .await?;

        tracing::debug!(%id, "deleted event");
        Ok(())
    }

    fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(ApiError::from)
    }
}
