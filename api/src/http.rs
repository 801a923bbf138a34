// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with status mapping.

use reqwest::{Client, RequestBuilder, Response, StatusCode, header};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::GoogleId;

/// HTTP client for event service operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Builds a request with the headers every endpoint shares.
    pub fn request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => {
                // The id is the last path segment on update/delete URLs.
                let id = resp
                    .url()
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default()
                    .to_string();
                Err(ApiError::NotFound(GoogleId::new(id)))
            }
            status => {
                let message = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "unable to read response".to_string());
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
