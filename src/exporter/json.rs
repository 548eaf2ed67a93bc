// file: src/exporter/json.rs
// description: json export of a whole batch result plus an export manifest

use crate::error::{PipelineError, Result};
use crate::models::BatchResult;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const BATCH_FILE: &str = "batch.json";
const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub keywords: Vec<String>,
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub total_matches: usize,
    pub files: Vec<String>,
}

impl ExportManifest {
    pub fn for_batch(batch: &BatchResult, files: Vec<String>) -> Self {
        Self {
            exported_at: Utc::now().to_rfc3339(),
            keywords: batch.keywords.as_slice().to_vec(),
            files_analyzed: batch.files_succeeded(),
            files_failed: batch.failures.len(),
            total_matches: batch.matches.len(),
            files,
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn to_string(batch: &BatchResult, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(batch)?
        } else {
            serde_json::to_string(batch)?
        };
        Ok(json)
    }

    /// Writes `batch.json` and a `manifest.json` listing what was written.
    pub fn export_batch(&self, batch: &BatchResult, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let batch_path = self.output_dir.join(BATCH_FILE);
        self.write(&batch_path, Self::to_string(batch, pretty)?)?;

        let manifest = ExportManifest::for_batch(batch, vec![BATCH_FILE.to_string()]);
        let manifest_json = if pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };
        self.write(&self.output_dir.join(MANIFEST_FILE), manifest_json)?;

        info!(
            "Export complete: {} matches from {} files",
            manifest.total_matches, manifest.files_analyzed
        );
        Ok(manifest)
    }

    fn write(&self, path: &Path, contents: String) -> Result<()> {
        fs::write(path, contents).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
    }
}
