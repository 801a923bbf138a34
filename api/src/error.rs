// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::GoogleId;

/// Event service client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response from the service.
    #[error("server error: {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body text, if readable.
        message: String,
    },

    /// Update or delete keyed on an id the service no longer knows.
    #[error("event not found: {0}")]
    NotFound(GoogleId),

    /// Response body could not be decoded.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
