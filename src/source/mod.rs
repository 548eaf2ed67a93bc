// file: src/source/mod.rs
// description: pdf discovery and loading from the local filesystem
// reference: internal module structure

mod scanner;

pub use scanner::{FileScanner, LoadedFiles, ScannedFile};
