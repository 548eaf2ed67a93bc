// file: src/source/scanner.rs
// description: Directory walking and pdf discovery with size filtering
// reference: https://docs.rs/walkdir

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result, ValidationError};
use crate::models::{FileFailure, PdfUpload};
use crate::utils::Validator;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct FileScanner {
    config: PipelineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Name the file is reported under in every output table.
    pub display_name: String,
    pub size: u64,
}

/// Files read into memory, plus the ones that could not be read. Empty files
/// are passed through and fail later during analysis.
#[derive(Debug, Default)]
pub struct LoadedFiles {
    pub uploads: Vec<PdfUpload>,
    pub failures: Vec<FileFailure>,
}

impl FileScanner {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Resolves a mix of file and directory arguments. Explicit files are kept
    /// in argument order; each directory contributes its pdfs sorted by path.
    /// A file reached twice is kept once, and display names are unique.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                files.extend(self.scan_directory(path)?);
            } else {
                Validator::validate_file_path(path)?;
                Validator::validate_pdf_extension(path)?;
                files.push(self.scanned_file(path, None)?);
            }
        }

        Ok(disambiguate(files))
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        Validator::validate_directory(root)?;
        info!("Scanning directory: {}", root.display());

        let max_size = self.max_size_bytes();
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || !Validator::is_pdf_path(entry.path()) {
                continue;
            }

            let path = entry.path();
            if let Ok(metadata) = entry.metadata()
                && max_size > 0
                && metadata.len() > max_size
            {
                warn!(
                    "Skipping large file ({} MB): {}",
                    metadata.len() / 1_048_576,
                    path.display()
                );
                continue;
            }

            files.push(self.scanned_file(path, Some(root))?);
        }

        info!("Found {} pdf files", files.len());
        Ok(files)
    }

    /// Reads every file under its display name. A file that cannot be read
    /// becomes a failure of its own and never stops the others.
    pub fn load(&self, files: &[ScannedFile]) -> LoadedFiles {
        let mut loaded = LoadedFiles::default();

        for file in files {
            debug!("Reading {}", file.path.display());
            match std::fs::read(&file.path) {
                Ok(bytes) => loaded
                    .uploads
                    .push(PdfUpload::new(file.display_name.clone(), bytes)),
                Err(source) => {
                    let error = PipelineError::FileOperation {
                        path: file.path.clone(),
                        source,
                    };
                    warn!("Cannot read {}: {}", file.display_name, error);
                    loaded
                        .failures
                        .push(FileFailure::from_error(&file.display_name, &error));
                }
            }
        }

        loaded
    }

    fn scanned_file(&self, path: &Path, root: Option<&Path>) -> Result<ScannedFile> {
        let size = std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| ValidationError::Invalid(format!("{}: {}", path.display(), e)))?;

        let display_name = match root {
            Some(root) => path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
        };

        Ok(ScannedFile {
            path: path.to_path_buf(),
            display_name,
            size,
        })
    }

    fn max_size_bytes(&self) -> u64 {
        (self.config.max_file_size_mb as u64) * 1_048_576
    }
}

// Drops repeat visits of one file, then falls back to the full path for any
// display name that two different files would share.
fn disambiguate(files: Vec<ScannedFile>) -> Vec<ScannedFile> {
    let mut seen = HashSet::new();
    let files: Vec<ScannedFile> = files
        .into_iter()
        .filter(|file| {
            let key = std::fs::canonicalize(&file.path).unwrap_or_else(|_| file.path.clone());
            let first = seen.insert(key);
            if !first {
                warn!("Skipping repeated input: {}", file.path.display());
            }
            first
        })
        .collect();

    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for file in &files {
        *name_counts.entry(file.display_name.clone()).or_default() += 1;
    }

    files
        .into_iter()
        .map(|mut file| {
            if name_counts.get(&file.display_name).copied().unwrap_or(0) > 1 {
                file.display_name = file.path.to_string_lossy().to_string();
            }
            file
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::extractor::pdf::fixtures::pdf_with_pages;
    use crate::models::FailureKind;
    use crate::pipeline::{BatchAggregator, validate_inputs};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> FileScanner {
        FileScanner::new(Config::default_config().pipeline)
    }

    #[test]
    fn test_scan_directory_finds_pdfs_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2023")).unwrap();
        fs::write(temp.path().join("b.pdf"), "%PDF-1.4").unwrap();
        fs::write(temp.path().join("a.PDF"), "%PDF-1.4").unwrap();
        fs::write(temp.path().join("notes.txt"), "text").unwrap();
        fs::write(temp.path().join("2023").join("c.pdf"), "%PDF-1.4").unwrap();

        let files = scanner().scan_directory(temp.path()).unwrap();
        let names: Vec<String> = files.iter().map(|f| f.display_name.replace('\\', "/")).collect();

        assert_eq!(names, vec!["2023/c.pdf", "a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_scan_directory_skips_oversized() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.pdf"), vec![b'x'; 2 * 1_048_576]).unwrap();
        fs::write(temp.path().join("small.pdf"), "%PDF-1.4").unwrap();

        let mut config = Config::default_config().pipeline;
        config.max_file_size_mb = 1;
        let files = FileScanner::new(config).scan_directory(temp.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].display_name, "small.pdf");
    }

    #[test]
    fn test_scan_paths_rejects_non_pdf_file() {
        let temp = TempDir::new().unwrap();
        let text = temp.path().join("notes.txt");
        fs::write(&text, "text").unwrap();

        assert!(scanner().scan_paths(&[text]).is_err());
    }

    #[test]
    fn test_load_uses_display_names() {
        let temp = TempDir::new().unwrap();
        let pdf = temp.path().join("report.pdf");
        fs::write(&pdf, "%PDF-1.4 body").unwrap();

        let scanner = scanner();
        let files = scanner.scan_paths(&[pdf]).unwrap();
        let loaded = scanner.load(&files);
        let uploads = loaded.uploads;

        assert!(loaded.failures.is_empty());
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].filename, "report.pdf");
        assert_eq!(&uploads[0].bytes[..], b"%PDF-1.4 body");
    }

    #[test]
    fn test_empty_file_fails_alone() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.pdf"), pdf_with_pages(&[&["ESG targets for the year"]])).unwrap();
        fs::write(temp.path().join("b.pdf"), "").unwrap();
        fs::write(temp.path().join("c.pdf"), pdf_with_pages(&[&["Green and ESG bonds issued"]])).unwrap();

        let mut config = Config::default_config();
        config.pipeline.show_progress = false;
        let scanner = FileScanner::new(config.pipeline.clone());

        let files = scanner.scan_paths(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 3);

        let loaded = scanner.load(&files);
        assert_eq!(loaded.uploads.len(), 3);
        assert!(loaded.failures.is_empty());

        let keywords = validate_inputs(&loaded.uploads, "ESG").unwrap();
        let batch = BatchAggregator::new(config).run(&loaded.uploads, &keywords).unwrap();

        let analyzed: Vec<&str> = batch.tallies.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(analyzed, vec!["a.pdf", "c.pdf"]);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].filename, "b.pdf");
        assert_eq!(batch.failures[0].kind, FailureKind::Decode);
    }

    #[test]
    fn test_unreadable_file_becomes_failure() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.pdf");
        fs::write(&good, "%PDF-1.4 body").unwrap();

        let files = vec![
            ScannedFile {
                path: temp.path().join("gone.pdf"),
                display_name: "gone.pdf".to_string(),
                size: 0,
            },
            ScannedFile {
                path: good,
                display_name: "good.pdf".to_string(),
                size: 13,
            },
        ];

        let loaded = scanner().load(&files);

        assert_eq!(loaded.uploads.len(), 1);
        assert_eq!(loaded.uploads[0].filename, "good.pdf");
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].filename, "gone.pdf");
        assert_eq!(loaded.failures[0].kind, FailureKind::Decode);
    }

    #[test]
    fn test_same_name_in_two_directories_stays_distinct() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("2022");
        let second = temp.path().join("2023");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("report.pdf"), "%PDF-1.4").unwrap();
        fs::write(second.join("report.pdf"), "%PDF-1.4").unwrap();
        fs::write(second.join("notes.pdf"), "%PDF-1.4").unwrap();

        let files = scanner().scan_paths(&[first, second]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();

        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[2]);
        assert!(names[0].ends_with("report.pdf"));
        assert_eq!(names[1], "notes.pdf");
        assert!(names[2].ends_with("report.pdf"));
    }

    #[test]
    fn test_repeated_argument_is_scanned_once() {
        let temp = TempDir::new().unwrap();
        let pdf = temp.path().join("report.pdf");
        fs::write(&pdf, "%PDF-1.4").unwrap();

        let files = scanner().scan_paths(&[pdf.clone(), pdf]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].display_name, "report.pdf");
    }
}
