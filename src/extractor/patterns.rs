// file: src/extractor/patterns.rs
// description: compiled regex patterns for keyword input and font classification
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ";" and "," are interchangeable keyword separators
    pub static ref KEYWORD_SEPARATOR: Regex = Regex::new(
        r"[;,]"
    ).expect("KEYWORD_SEPARATOR regex is valid");

    // Predefined CMaps for vertical writing end in "-V" (Identity-V, UniJIS-UCS2-V, ...)
    pub static ref VERTICAL_CMAP: Regex = Regex::new(
        r"-V$"
    ).expect("VERTICAL_CMAP regex is valid");
}

pub fn is_vertical_cmap(name: &str) -> bool {
    VERTICAL_CMAP.is_match(name)
}
