// file: src/extractor/mod.rs
// description: text extraction and keyword matching module exports
// reference: internal module structure

pub mod layout;
pub mod paragraph;
pub mod patterns;
pub mod pdf;

pub use layout::TextFragment;
pub use paragraph::{PageMatches, ParagraphMatcher};
pub use pdf::{Cancellation, PageTextExtractor};
