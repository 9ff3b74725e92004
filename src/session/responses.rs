//! Answer collection keyed by question identifier

use crate::questions::Question;
use indexmap::IndexMap;
use serde::Serialize;

/// Answers collected so far, in the order they were first given.
///
/// At most one entry per question identifier. Labels are stored verbatim;
/// nothing here checks them against the answer scale. Serializes as a flat
/// JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseMap {
    entries: IndexMap<String, String>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `question_id`.
    ///
    /// An overwritten key keeps its original position. Returns the previous
    /// label when the key was already present.
    pub fn record(&mut self, question_id: &str, label: impl Into<String>) -> Option<String> {
        self.entries.insert(question_id.to_string(), label.into())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(question_id, label)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Identifiers from `questions` that have no answer yet, in question order
    pub fn missing(&self, questions: &[Question]) -> Vec<&'static str> {
        questions
            .iter()
            .filter(|q| !self.contains(q.id))
            .map(|q| q.id)
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
