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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A single chat message. Identity is the `id`; two messages with the same
/// id are the same message regardless of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: String,
    #[serde(alias = "message")]
    pub body: String,
}

impl Message {
    pub fn new(id: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self { id: id.into(), author: author.into(), body: body.into() }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("message store is empty")]
    Empty,
    #[error("duplicate message id `{0}`")]
    DuplicateId(String),
}

/// Immutable, chronologically ordered backing dataset (oldest at index 0).
///
/// Built once at start-up and never mutated afterwards. Positions are stable
/// for the lifetime of the store, so callers may hold plain `usize` indices.
#[derive(Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    positions: HashMap<String, usize>,
}

impl MessageStore {
    pub fn new(messages: Vec<Message>) -> Result<Self, StoreError> {
        if messages.is_empty() {
            return Err(StoreError::Empty);
        }
        let mut positions = HashMap::with_capacity(messages.len());
        for (idx, msg) in messages.iter().enumerate() {
            if positions.insert(msg.id.clone(), idx).is_some() {
                return Err(StoreError::DuplicateId(msg.id.clone()));
            }
        }
        Ok(Self { messages, positions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Message> {
        self.messages.get(position)
    }

    /// Absolute position of the message with `id`, if present.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Everything from `start` to the newest message. Empty when `start` is
    /// past the end.
    #[must_use]
    pub fn suffix(&self, start: usize) -> &[Message] {
        self.messages.get(start..).unwrap_or(&[])
    }
}
