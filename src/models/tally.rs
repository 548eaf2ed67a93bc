// file: src/models/tally.rs
// description: keyword occurrence counts kept in keyword-set order
// reference: https://docs.rs/indexmap

use crate::models::KeywordSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keyword → count, with an entry for every keyword of the set it was built
/// from, including zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTally {
    counts: IndexMap<String, usize>,
}

impl KeywordTally {
    pub fn zeroed(keywords: &KeywordSet) -> Self {
        Self {
            counts: keywords.iter().map(|k| (k.to_string(), 0)).collect(),
        }
    }

    /// Adds to an existing keyword; unknown keywords are ignored so the column
    /// set never drifts from the keyword set.
    pub fn add(&mut self, keyword: &str, count: usize) {
        if let Some(slot) = self.counts.get_mut(keyword) {
            *slot += count;
        }
    }

    /// Element-wise sum, keyed by keyword.
    pub fn merge(&mut self, other: &KeywordTally) {
        for (keyword, count) in &other.counts {
            self.add(keyword, *count);
        }
    }

    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.counts.get(keyword).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
