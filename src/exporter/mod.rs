// file: src/exporter/mod.rs
// description: table and json exporters for batch results
// reference: internal module structure

pub mod csv;
pub mod json;

pub use self::csv::{CsvExportPaths, CsvExporter};
pub use self::json::{ExportManifest, JsonExporter};
