// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the reflow event service.

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
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::EventsClient;
pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
pub use crate::types::{DateRange, EventList, EventPayload, GoogleId};
