// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod config;
mod event_formatter;
mod table;
mod tui;
mod util;

pub use crate::{
    cli::{Cli, Commands, run},
    config::Config,
};
