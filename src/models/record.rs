// file: src/models/record.rs
// description: match records, per-file results and the final batch tables
// reference: internal data structures

use crate::error::PipelineError;
use crate::models::{KeywordSet, KeywordTally};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A paragraph that contains at least one keyword and passes the word threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub filename: String,
    pub page_num: u32,
    /// Position in the page's split sequence, counting non-matching paragraphs.
    pub paragraph_num: usize,
    pub keywords: Vec<String>,
    pub paragraph: String,
}

impl MatchRecord {
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub filename: String,
    pub matches: Vec<MatchRecord>,
    pub tally: KeywordTally,
    pub page_count: usize,
    /// Informational only; excluded from exported tables.
    #[serde(skip)]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyRow {
    pub filename: String,
    pub counts: KeywordTally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Decode,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub filename: String,
    pub kind: FailureKind,
    pub reason: String,
}

impl FileFailure {
    /// Classifies a processing error. Anything that is not a budget overrun is
    /// reported as a decode failure of that file.
    pub fn from_error(filename: &str, error: &PipelineError) -> Self {
        let kind = match error {
            PipelineError::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Decode,
        };

        Self {
            filename: filename.to_string(),
            kind,
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub keywords: KeywordSet,
    pub matches: Vec<MatchRecord>,
    pub tallies: Vec<TallyRow>,
    pub failures: Vec<FileFailure>,
}

impl BatchResult {
    pub fn new(keywords: KeywordSet) -> Self {
        Self {
            keywords,
            matches: Vec::new(),
            tallies: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn push_file(&mut self, result: FileResult) {
        self.matches.extend(result.matches);
        self.tallies.push(TallyRow {
            filename: result.filename,
            counts: result.tally,
        });
    }

    pub fn push_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    pub fn files_succeeded(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Keyword totals across every successful file.
    pub fn totals(&self) -> KeywordTally {
        let mut totals = KeywordTally::zeroed(&self.keywords);
        for row in &self.tallies {
            totals.merge(&row.counts);
        }
        totals
    }
}
