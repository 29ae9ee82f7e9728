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

//! Where the backing dataset comes from.
//!
//! The feed only needs `load_all()` once at start-up; it does not care whether
//! the messages were generated or read from disk.

use super::store::Message;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

pub const DEFAULT_GENERATED_COUNT: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait MessageSource {
    /// Short human-readable description for logs and the header.
    fn describe(&self) -> String;

    /// All messages, oldest first.
    fn load_all(&self) -> Result<Vec<Message>, SourceError>;
}

/// Random livestream-style chatter. A fixed seed makes the feed reproducible.
#[derive(Debug, Clone)]
pub struct GeneratedSource {
    count: usize,
    seed: Option<u64>,
}

impl GeneratedSource {
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        Self { count, seed }
    }
}

impl MessageSource for GeneratedSource {
    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("generated ({} messages, seed {seed})", self.count),
            None => format!("generated ({} messages)", self.count),
        }
    }

    fn load_all(&self) -> Result<Vec<Message>, SourceError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok((0..self.count).map(|_| random_message(&mut rng)).collect())
    }
}

/// A JSON array of `{ "id", "author", "body" | "message" }` objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MessageSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_all(&self) -> Result<Vec<Message>, SourceError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Read { path: self.path.clone(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| SourceError::Parse { path: self.path.clone(), source })
    }
}

const AUTHORS: &[&str] = &[
    "Ada", "Bjorn", "Chiara", "Dmitri", "Esme", "Farid", "Greta", "Hiro", "Imani", "Jonas",
    "Kaia", "Luca", "Mei", "Nadia", "Oskar", "Priya", "Quinn", "Rosa", "Soren", "Tariq",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

fn random_message(rng: &mut StdRng) -> Message {
    let id = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid().to_string();
    let author = AUTHORS.choose(rng).copied().unwrap_or("Anonymous");
    let sentences = rng.gen_range(1..=15);
    let body = (0..sentences).map(|_| random_sentence(rng)).collect::<Vec<_>>().join(" ");
    Message::new(id, author, body)
}

fn random_sentence(rng: &mut StdRng) -> String {
    let words = rng.gen_range(4..=12);
    let mut sentence = String::new();
    for i in 0..words {
        let word = LOREM.choose(rng).copied().unwrap_or("lorem");
        if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                sentence.extend(first.to_uppercase());
                sentence.push_str(chars.as_str());
            }
        } else {
            sentence.push(' ');
            sentence.push_str(word);
        }
    }
    sentence.push('.');
    sentence
}
