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

use crate::feed::source::SourceError;
use crate::feed::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Message source could not be read: {0}")]
    SourceUnreadable(String),
    #[error("Message source is malformed: {0}")]
    SourceInvalid(String),
    #[error("Message store is empty")]
    EmptyStore,
    #[error("Duplicate message id `{0}`")]
    DuplicateMessageId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub const SOURCE_UNREADABLE_EXIT_CODE: i32 = 20;
    pub const SOURCE_INVALID_EXIT_CODE: i32 = 21;
    pub const EMPTY_STORE_EXIT_CODE: i32 = 22;
    pub const DUPLICATE_MESSAGE_ID_EXIT_CODE: i32 = 23;
    pub const INVALID_CONFIG_EXIT_CODE: i32 = 24;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceUnreadable(_) => Self::SOURCE_UNREADABLE_EXIT_CODE,
            Self::SourceInvalid(_) => Self::SOURCE_INVALID_EXIT_CODE,
            Self::EmptyStore => Self::EMPTY_STORE_EXIT_CODE,
            Self::DuplicateMessageId(_) => Self::DUPLICATE_MESSAGE_ID_EXIT_CODE,
            Self::InvalidConfig(_) => Self::INVALID_CONFIG_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceUnreadable(detail) => {
                format!("Could not read the messages file ({detail}). Check the --messages path.")
            }
            Self::SourceInvalid(detail) => format!(
                "The messages file is not a JSON array of {{id, author, body}} objects ({detail})."
            ),
            Self::EmptyStore => "There are no messages to show.".to_owned(),
            Self::DuplicateMessageId(id) => {
                format!("Message id `{id}` appears more than once; ids must be unique.")
            }
            Self::InvalidConfig(detail) => format!("Invalid option: {detail}"),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Read { .. } => Self::SourceUnreadable(err.to_string()),
            SourceError::Parse { .. } => Self::SourceInvalid(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Empty => Self::EmptyStore,
            StoreError::DuplicateId(id) => Self::DuplicateMessageId(id),
        }
    }
}
