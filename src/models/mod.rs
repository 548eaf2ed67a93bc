// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod keyword;
pub mod page;
pub mod record;
pub mod tally;

pub use keyword::KeywordSet;
pub use page::{PageText, PdfUpload};
pub use record::{BatchResult, FailureKind, FileFailure, FileResult, MatchRecord, TallyRow};
pub use tally::KeywordTally;
