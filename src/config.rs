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

use crate::Cli;
use crate::error::AppError;
use crate::feed::bridge::DEFAULT_RETRY_BACKOFF;
use crate::feed::fetch::FetchSettings;
use crate::feed::pagination::DEFAULT_PAGE_SIZE;
use crate::feed::source::{
    DEFAULT_GENERATED_COUNT, GeneratedSource, JsonFileSource, MessageSource,
};
use crate::feed::virtualizer::DEFAULT_ROW_ESTIMATE;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Generated { count: usize, seed: Option<u64> },
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub source: SourceConfig,
    pub page_size: usize,
    pub fetch: FetchSettings,
    pub row_estimate: u16,
    pub retry_backoff: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::Generated { count: DEFAULT_GENERATED_COUNT, seed: None },
            page_size: DEFAULT_PAGE_SIZE,
            fetch: FetchSettings::default(),
            row_estimate: DEFAULT_ROW_ESTIMATE,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl FeedConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let defaults = Self::default();

        let page_size = cli.page_size.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(AppError::InvalidConfig("--page-size must be at least 1".to_owned()));
        }
        let row_estimate = cli.row_estimate.unwrap_or(defaults.row_estimate);
        if row_estimate == 0 {
            return Err(AppError::InvalidConfig("--row-estimate must be at least 1".to_owned()));
        }
        if cli.fail_every == Some(0) {
            return Err(AppError::InvalidConfig("--fail-every must be at least 1".to_owned()));
        }

        let source = match &cli.messages {
            Some(path) => SourceConfig::JsonFile(path.clone()),
            None => {
                let count = cli.count.unwrap_or(DEFAULT_GENERATED_COUNT);
                if count == 0 {
                    return Err(AppError::InvalidConfig("--count must be at least 1".to_owned()));
                }
                SourceConfig::Generated { count, seed: cli.seed }
            }
        };

        let fetch = FetchSettings {
            delay: cli.fetch_delay_ms.map_or(defaults.fetch.delay, Duration::from_millis),
            fail_every: cli.fail_every,
        };

        Ok(Self { source, page_size, fetch, row_estimate, retry_backoff: defaults.retry_backoff })
    }

    pub fn message_source(&self) -> Box<dyn MessageSource> {
        match &self.source {
            SourceConfig::Generated { count, seed } => Box::new(GeneratedSource::new(*count, *seed)),
            SourceConfig::JsonFile(path) => Box::new(JsonFileSource::new(path.clone())),
        }
    }
}
