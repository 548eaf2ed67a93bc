// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub matching: MatchingConfig,
    pub pipeline: PipelineConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    pub max_pages: usize,
    pub timeout_secs: u64,
    #[serde(default)]
    pub layout: LayoutParams,
}

/// Tuning knobs for reading-order reconstruction. Margins are ratios of the
/// font size (or line height) of the text being compared.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutParams {
    pub line_overlap: f32,
    pub char_margin: f32,
    pub line_margin: f32,
    pub word_margin: f32,
    pub boxes_flow: f32,
    pub detect_vertical: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_overlap: 0.5,
            char_margin: 2.0,
            line_margin: 0.5,
            word_margin: 0.1,
            boxes_flow: 0.5,
            detect_vertical: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    pub min_paragraph_words: usize,
    pub paragraph_separator: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_paragraph_words: 3,
            paragraph_separator: "\n\n".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub max_file_size_mb: usize,
    pub enable_cache: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub matches_file: String,
    pub statistics_file: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DISCLOSURE_MINER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            extraction: ExtractionConfig {
                max_pages: 2_000,
                timeout_secs: 300,
                layout: LayoutParams::default(),
            },
            matching: MatchingConfig::default(),
            pipeline: PipelineConfig {
                parallel_workers: 4,
                max_file_size_mb: 200,
                enable_cache: false,
                show_progress: true,
            },
            export: ExportConfig {
                output_dir: PathBuf::from("./exports"),
                matches_file: "Keyword_Matches.csv".to_string(),
                statistics_file: "Keyword_Statistics.csv".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.extraction.max_pages == 0 {
            return Err(PipelineError::Config(
                "max_pages must be greater than 0".to_string(),
            ));
        }

        if self.matching.paragraph_separator.is_empty() {
            return Err(PipelineError::Config(
                "paragraph_separator must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.min_paragraph_words, 3);
        assert_eq!(config.matching.paragraph_separator, "\n\n");
        assert!(config.extraction.layout.detect_vertical);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_separator() {
        let mut config = Config::default_config();
        config.matching.paragraph_separator.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[extraction]
max_pages = 50
timeout_secs = 10

[matching]
min_paragraph_words = 5
paragraph_separator = "\n\n"

[pipeline]
parallel_workers = 2
max_file_size_mb = 20
enable_cache = true
show_progress = false

[export]
output_dir = "out"
matches_file = "matches.csv"
statistics_file = "stats.csv"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.extraction.max_pages, 50);
        assert_eq!(config.matching.min_paragraph_words, 5);
        assert!(config.pipeline.enable_cache);
        assert_eq!(config.extraction.layout.char_margin, 2.0);
    }
}
