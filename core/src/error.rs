// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use reflow_api::ApiError;

/// Errors from store and editor operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Event data failed validation before leaving the process.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The event service call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validation failures from draft parsing or payload decode.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The summary is empty or whitespace.
    #[error("summary cannot be empty")]
    EmptySummary,

    /// A field the active mode requires is unset.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A timestamp field does not parse as datetime-local.
    #[error("{0} is not a valid timestamp")]
    InvalidTimestamp(&'static str),

    /// The duration is not a non-negative whole number.
    #[error("duration must be a whole number of minutes")]
    InvalidDuration,

    /// The start does not precede the end.
    #[error("start time must be before end time")]
    StartNotBeforeEnd,

    /// The duration does not fit the window.
    #[error("duration cannot be longer than the event window")]
    DurationExceedsWindow,
}
