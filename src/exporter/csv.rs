// file: src/exporter/csv.rs
// description: writes the match table and the keyword tally table as csv
// reference: https://docs.rs/csv

use crate::config::ExportConfig;
use crate::error::{PipelineError, Result};
use crate::models::{BatchResult, KeywordSet, MatchRecord, TallyRow};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MATCH_COLUMNS: [&str; 5] = [
    "filename",
    "page_num",
    "paragraph_num",
    "keywords",
    "paragraph",
];

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    matches_file: String,
    statistics_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExportPaths {
    pub matches: PathBuf,
    pub statistics: PathBuf,
}

impl CsvExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            matches_file: config.matches_file.clone(),
            statistics_file: config.statistics_file.clone(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes both tables, replacing files from a previous run.
    pub fn export(&self, batch: &BatchResult) -> Result<CsvExportPaths> {
        fs::create_dir_all(&self.output_dir).map_err(|source| PipelineError::FileOperation {
            path: self.output_dir.clone(),
            source,
        })?;

        let paths = CsvExportPaths {
            matches: self.output_dir.join(&self.matches_file),
            statistics: self.output_dir.join(&self.statistics_file),
        };

        write_matches(create(&paths.matches)?, &batch.matches)?;
        write_tallies(create(&paths.statistics)?, &batch.keywords, &batch.tallies)?;

        info!(
            "Exported {} matches and {} tally rows to {}",
            batch.matches.len(),
            batch.tallies.len(),
            self.output_dir.display()
        );

        Ok(paths)
    }
}

/// One row per qualifying paragraph; a header row is written even when empty.
pub fn write_matches<W: Write>(writer: W, matches: &[MatchRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(MATCH_COLUMNS)?;

    for record in matches {
        csv.write_record([
            record.filename.clone(),
            record.page_num.to_string(),
            record.paragraph_num.to_string(),
            record.keywords_joined(),
            record.paragraph.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// `filename` followed by one column per keyword, in keyword order.
pub fn write_tallies<W: Write>(writer: W, keywords: &KeywordSet, rows: &[TallyRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["filename".to_string()];
    header.extend(keywords.iter().map(str::to_string));
    csv.write_record(&header)?;

    for row in rows {
        let mut fields = Vec::with_capacity(keywords.len() + 1);
        fields.push(row.filename.clone());
        fields.extend(
            keywords
                .iter()
                .map(|keyword| row.counts.get(keyword).unwrap_or(0).to_string()),
        );
        csv.write_record(&fields)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn matches_to_bytes(matches: &[MatchRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_matches(&mut buffer, matches)?;
    Ok(buffer)
}

pub fn tallies_to_bytes(keywords: &KeywordSet, rows: &[TallyRow]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_tallies(&mut buffer, keywords, rows)?;
    Ok(buffer)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::KeywordTally;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_batch() -> BatchResult {
        let keywords = KeywordSet::parse("ESG,Green").unwrap();
        let mut tally = KeywordTally::zeroed(&keywords);
        tally.add("ESG", 3);

        let mut batch = BatchResult::new(keywords);
        batch.matches.push(MatchRecord {
            filename: "report.pdf".to_string(),
            page_num: 2,
            paragraph_num: 5,
            keywords: vec!["ESG".to_string(), "Green".to_string()],
            paragraph: "ESG, \"green\" and more\nsecond line".to_string(),
        });
        batch.tallies.push(TallyRow {
            filename: "report.pdf".to_string(),
            counts: tally,
        });
        batch
    }

    #[test]
    fn test_match_table_layout() {
        let batch = sample_batch();
        let bytes = matches_to_bytes(&batch.matches).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, MATCH_COLUMNS.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "report.pdf");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "5");
        assert_eq!(&rows[0][3], "ESG, Green");
        assert_eq!(&rows[0][4], "ESG, \"green\" and more\nsecond line");
    }

    #[test]
    fn test_tally_table_layout() {
        let batch = sample_batch();
        let text = String::from_utf8(tallies_to_bytes(&batch.keywords, &batch.tallies).unwrap())
            .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["filename,ESG,Green", "report.pdf,3,0"]);
    }

    #[test]
    fn test_empty_tables_keep_headers() {
        let keywords = KeywordSet::parse("ESG").unwrap();
        let matches = String::from_utf8(matches_to_bytes(&[]).unwrap()).unwrap();
        let tallies = String::from_utf8(tallies_to_bytes(&keywords, &[]).unwrap()).unwrap();

        assert_eq!(
            matches.trim_end(),
            "filename,page_num,paragraph_num,keywords,paragraph"
        );
        assert_eq!(tallies.trim_end(), "filename,ESG");
    }

    #[test]
    fn test_export_writes_default_file_names() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(&Config::default_config().export).with_output_dir(dir.path());

        let paths = exporter.export(&sample_batch()).unwrap();

        assert_eq!(paths.matches, dir.path().join("Keyword_Matches.csv"));
        assert_eq!(paths.statistics, dir.path().join("Keyword_Statistics.csv"));
        assert!(paths.matches.exists());
        assert!(paths.statistics.exists());
    }

    #[test]
    fn test_export_is_byte_identical_across_runs() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(&Config::default_config().export).with_output_dir(dir.path());
        let batch = sample_batch();

        let paths = exporter.export(&batch).unwrap();
        let first = std::fs::read(&paths.matches).unwrap();
        exporter.export(&batch).unwrap();
        let second = std::fs::read(&paths.matches).unwrap();

        assert_eq!(first, second);
    }
}
