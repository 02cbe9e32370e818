use crate::error::ContextError;
use causal_store::Record;
use std::collections::HashSet;

/// Chooses which records in a snapshot are relevant to a query.
pub trait RelevanceSelector: Send + Sync {
    /// Select from `snapshot`, which holds every record in the store at
    /// call time, oldest write first.
    fn select(&self, query: &str, snapshot: Vec<Record>) -> Result<Vec<Record>, ContextError>;
}

/// Treats the whole snapshot as relevant.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullSnapshotSelector;

impl RelevanceSelector for FullSnapshotSelector {
    fn select(&self, _query: &str, snapshot: Vec<Record>) -> Result<Vec<Record>, ContextError> {
        Ok(snapshot)
    }
}

/// Keeps records whose content fields share a word with the query.
///
/// Only the named payload fields are read (`query` by default), so record
/// metadata such as the commitment timestamp and the generator's own
/// response template never count as overlap. Matching is case-insensitive
/// on alphanumeric words of at least `min_word_len` characters. If nothing
/// matches, the full snapshot is returned so the generator is never handed
/// an empty context.
#[derive(Clone, Debug)]
pub struct KeywordSelector {
    min_word_len: usize,
    fields: Vec<String>,
}

impl KeywordSelector {
    pub fn new() -> Self {
        Self {
            min_word_len: 3,
            fields: vec!["query".to_string()],
        }
    }

    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len.max(1);
        self
    }

    /// Replace the payload fields that are matched against the query.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn words(&self, text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= self.min_word_len)
            .map(str::to_lowercase)
            .collect()
    }

    fn matches(&self, record: &Record, query_words: &HashSet<String>) -> bool {
        self.fields
            .iter()
            .filter_map(|field| record.str_field(field))
            .any(|value| !self.words(value).is_disjoint(query_words))
    }
}

impl Default for KeywordSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceSelector for KeywordSelector {
    fn select(&self, query: &str, snapshot: Vec<Record>) -> Result<Vec<Record>, ContextError> {
        let query_words = self.words(query);
        if query_words.is_empty() {
            return Ok(snapshot);
        }

        let matched: Vec<Record> = snapshot
            .iter()
            .filter(|record| self.matches(record, &query_words))
            .cloned()
            .collect();

        if matched.is_empty() {
            Ok(snapshot)
        } else {
            Ok(matched)
        }
    }
}
