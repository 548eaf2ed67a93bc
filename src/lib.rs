// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use config::{
    Config, ExportConfig, ExtractionConfig, LayoutParams, MatchingConfig, PipelineConfig,
};
pub use error::{PipelineError, Result, ValidationError};
pub use exporter::{CsvExportPaths, CsvExporter, ExportManifest, JsonExporter};
pub use extractor::{Cancellation, PageMatches, PageTextExtractor, ParagraphMatcher};
pub use models::{
    BatchResult, FailureKind, FileFailure, FileResult, KeywordSet, KeywordTally, MatchRecord,
    PageText, PdfUpload, TallyRow,
};
pub use pipeline::{
    BatchAggregator, FileProcessor, PipelineStats, ProgressTracker, ResultCache, validate_inputs,
};
pub use source::{FileScanner, LoadedFiles, ScannedFile};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _aggregator = BatchAggregator::new(config.clone());
        let _exporter = CsvExporter::new(&config.export);
        assert!(KeywordSet::parse("ESG").is_ok());
    }
}
