// file: src/extractor/paragraph.rs
// description: blank-line paragraph segmentation and keyword matching per page
// reference: paragraph qualifies with >= N words and at least one keyword

use crate::config::MatchingConfig;
use crate::models::{KeywordSet, KeywordTally, MatchRecord, PageText};
use tracing::trace;

/// Records and counts for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMatches {
    pub records: Vec<MatchRecord>,
    pub tally: KeywordTally,
}

pub struct ParagraphMatcher<'a> {
    keywords: &'a KeywordSet,
    config: &'a MatchingConfig,
}

impl<'a> ParagraphMatcher<'a> {
    pub fn new(keywords: &'a KeywordSet, config: &'a MatchingConfig) -> Self {
        Self { keywords, config }
    }

    /// A paragraph yields a record, and is counted, only when it contains a
    /// keyword AND has at least `min_paragraph_words` tokens.
    pub fn match_page(&self, filename: &str, page: &PageText) -> PageMatches {
        let mut records = Vec::new();
        let mut tally = KeywordTally::zeroed(self.keywords);

        for (index, paragraph) in split_paragraphs(&page.text, &self.config.paragraph_separator)
            .enumerate()
        {
            let found = self.keywords.occurrences(paragraph);
            if found.is_empty() || word_count(paragraph) < self.config.min_paragraph_words {
                continue;
            }

            for (keyword, count) in &found {
                tally.add(keyword, *count);
            }

            records.push(MatchRecord {
                filename: filename.to_string(),
                page_num: page.number,
                paragraph_num: index,
                keywords: found.iter().map(|(k, _)| k.to_string()).collect(),
                paragraph: paragraph.to_string(),
            });
        }

        trace!(
            "{} page {}: {} qualifying paragraphs",
            filename,
            page.number,
            records.len()
        );

        PageMatches { records, tally }
    }
}

pub fn split_paragraphs<'t>(text: &'t str, separator: &'t str) -> impl Iterator<Item = &'t str> {
    text.split(separator)
}

pub fn word_count(paragraph: &str) -> usize {
    paragraph.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str, keywords: &str) -> PageMatches {
        let keywords = KeywordSet::parse(keywords).unwrap();
        let config = MatchingConfig::default();
        let matcher = ParagraphMatcher::new(&keywords, &config);
        matcher.match_page("report.pdf", &PageText::new(4, text.to_string()))
    }

    #[test]
    fn test_counts_every_case_insensitive_occurrence() {
        let result = run("ESG and esg are both ESG", "ESG");

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.tally.get("ESG"), Some(3));
        assert_eq!(result.records[0].keywords, vec!["ESG".to_string()]);
    }

    #[test]
    fn test_short_paragraph_is_neither_recorded_nor_counted() {
        let result = run("ESG here", "ESG");

        assert!(result.records.is_empty());
        assert_eq!(result.tally.get("ESG"), Some(0));
    }

    #[test]
    fn test_unmatched_keyword_keeps_zero_entry() {
        let result = run("Our climate strategy is ambitious", "Climate,Green");

        assert_eq!(result.tally.get("Climate"), Some(1));
        assert_eq!(result.tally.get("Green"), Some(0));
        assert_eq!(result.tally.len(), 2);
    }

    #[test]
    fn test_paragraph_indices_are_not_renumbered() {
        let text = "Intro without terms here\n\nESG\n\nA long ESG paragraph here\n\nGreen energy investments grow";
        let result = run(text, "ESG,Green");

        let indices: Vec<usize> = result.records.iter().map(|r| r.paragraph_num).collect();
        assert_eq!(indices, vec![2, 3]);
        assert!(result.records.iter().all(|r| r.page_num == 4));
        assert!(result.records.iter().all(|r| r.filename == "report.pdf"));
    }

    #[test]
    fn test_record_lists_keywords_in_keyword_order() {
        let result = run("green finance meets esg reporting", "ESG,Green");
        assert_eq!(
            result.records[0].keywords,
            vec!["ESG".to_string(), "Green".to_string()]
        );
        assert_eq!(result.records[0].keywords_joined(), "ESG, Green");
    }

    #[test]
    fn test_single_newlines_do_not_split() {
        let result = run("ESG\nreporting\nframework", "ESG");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].paragraph, "ESG\nreporting\nframework");
    }

    #[test]
    fn test_custom_threshold() {
        let keywords = KeywordSet::parse("ESG").unwrap();
        let config = MatchingConfig {
            min_paragraph_words: 1,
            ..MatchingConfig::default()
        };
        let matcher = ParagraphMatcher::new(&keywords, &config);
        let result = matcher.match_page("a.pdf", &PageText::new(1, "ESG".to_string()));
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_split_paragraphs_keeps_trailing_empty_piece() {
        let pieces: Vec<&str> = split_paragraphs("A\n\nB\n\n", "\n\n").collect();
        assert_eq!(pieces, vec!["A", "B", ""]);
    }
}
