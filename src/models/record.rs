use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A context/response pair in the format the fine-tuning trainer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub context: String,
    pub response: String,
    pub train: String,
}

/// Training records keyed by the username that produced the response.
///
/// Authors iterate in name order so repeated runs write identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDataset {
    records: BTreeMap<String, Vec<TrainingRecord>>,
}

impl AuthorDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the author's list, creating it on first use.
    pub fn push(&mut self, author: &str, record: TrainingRecord) {
        self.records.entry(author.to_string()).or_default().push(record);
    }

    pub fn get(&self, author: &str) -> Option<&[TrainingRecord]> {
        self.records.get(author).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TrainingRecord])> {
        self.records.iter().map(|(author, records)| (author.as_str(), records.as_slice()))
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn author_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
