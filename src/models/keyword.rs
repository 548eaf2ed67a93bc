// file: src/models/keyword.rs
// description: normalized keyword list with case-insensitive substring matching
// reference: keyword input contract (";" and "," separators, spaces stripped)

use crate::error::ValidationError;
use crate::extractor::patterns::KEYWORD_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered, de-duplicated, non-empty list of search terms.
///
/// Matching is plain substring containment after lowercasing both sides, so
/// "ESG" also matches inside "ESGreen".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    keywords: Vec<String>,
    folded: Vec<String>,
}

impl KeywordSet {
    /// Parses raw user input such as `"ESG; Climate ,  Green"`.
    ///
    /// Space characters are removed everywhere (so `"net zero"` becomes
    /// `"netzero"`), then `;` and `,` split the remainder.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let without_spaces = raw.replace(' ', "");
        Self::new(KEYWORD_SEPARATOR.split(&without_spaces))
    }

    pub fn new<I, S>(keywords: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut folded = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }

            let lower = keyword.to_lowercase();
            if seen.insert(lower.clone()) {
                kept.push(keyword.to_string());
                folded.push(lower);
            }
        }

        if kept.is_empty() {
            return Err(ValidationError::NoKeywords);
        }

        Ok(Self {
            keywords: kept,
            folded,
        })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    /// Keywords contained in `text`, in keyword order, paired with their
    /// non-overlapping occurrence counts.
    pub fn occurrences<'a>(&'a self, text: &str) -> Vec<(&'a str, usize)> {
        let haystack = text.to_lowercase();

        self.keywords
            .iter()
            .zip(&self.folded)
            .filter_map(|(keyword, needle)| {
                let count = haystack.matches(needle.as_str()).count();
                (count > 0).then_some((keyword.as_str(), count))
            })
            .collect()
    }

    /// Stable identity for cache keys.
    pub fn fingerprint(&self) -> String {
        self.keywords.join("\u{1f}")
    }
}

impl TryFrom<Vec<String>> for KeywordSet {
    type Error = ValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(value: KeywordSet) -> Self {
        value.keywords
    }
}
