// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Domain model and client-side state for the reflow event manager.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod datetime;
mod editor;
mod error;
mod event;
mod store;

/// The name of the reflow application.
pub const APP_NAME: &str = "reflow";

pub use reflow_api::{ApiConfig, ApiError, DateRange, EventPayload, EventsClient, GoogleId};

pub use crate::datetime::{format_datetime_local, parse_datetime_local};
pub use crate::editor::{DraftChange, Editor, EditorState, EventDraft};
pub use crate::error::{Error, ValidationError};
pub use crate::event::{Event, EventKind};
pub use crate::store::{DEFAULT_REFRESH_SECS, EventStore, Poller};
