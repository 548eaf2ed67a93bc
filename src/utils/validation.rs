// file: src/utils/validation.rs
// description: input path and content checks used before a batch is assembled
// reference: input validation patterns

use crate::error::{Result, ValidationError};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            ValidationError::Invalid(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(ValidationError::Invalid(format!(
                "Path is not a file: {}",
                canonical.display()
            ))
            .into());
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ValidationError::Invalid(format!(
                "Directory does not exist: {}",
                path.display()
            ))
            .into());
        }

        if !path.is_dir() {
            return Err(ValidationError::Invalid(format!(
                "Path is not a directory: {}",
                path.display()
            ))
            .into());
        }

        Ok(())
    }

    pub fn is_pdf_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }

    pub fn validate_pdf_extension(path: &Path) -> Result<()> {
        if Self::is_pdf_path(path) {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!("File is not a pdf: {}", path.display())).into())
        }
    }

    pub fn validate_content_not_empty(filename: &str, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(ValidationError::Invalid(format!("{} is empty", filename)).into());
        }
        Ok(())
    }
}
