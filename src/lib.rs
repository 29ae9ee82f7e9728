// chat_feed — A terminal chat feed with windowed rendering
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "chat-feed", about = "Scroll a livestream chat feed in the terminal")]
pub struct Cli {
    /// Load messages from a JSON array instead of generating them
    #[arg(long, value_name = "PATH")]
    pub messages: Option<std::path::PathBuf>,

    /// Number of generated messages (ignored with --messages)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Seed for the generated feed, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Messages per page (initial window and each older fetch)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Simulated latency of an older-page fetch, in milliseconds
    #[arg(long, value_name = "MS")]
    pub fetch_delay_ms: Option<u64>,

    /// Estimated height of an unrendered row, in lines
    #[arg(long, value_name = "LINES")]
    pub row_estimate: Option<u16>,

    /// Fail every Nth older-page fetch (exercise the retry path)
    #[arg(long, value_name = "N")]
    pub fail_every: Option<u64>,

    /// Write tracing diagnostics to a file (disabled by default when omitted)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (example: `info,chat_feed::feed=debug`)
    /// Falls back to `RUST_LOG` when omitted.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long)]
    pub log_append: bool,
}
