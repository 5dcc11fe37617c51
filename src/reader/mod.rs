//! Delimited-text reader with encoding auto-detection.
//!
//! Splits raw text into a header row and data rows using a regex delimiter
//! pattern. The pattern form (rather than a single character) is what lets
//! callers import pipe-delimited files (`\|`), tab-delimited files (`\t`)
//! and multi-character delimiters through one code path.
//!
//! The header is validated at construction time: a pattern that resolves the
//! header to fewer than two columns is rejected immediately, because a wrong
//! delimiter otherwise surfaces as confusing per-row errors far from the
//! root cause.

use regex::Regex;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// A delimited input, validated and ready for row iteration.
///
/// Header labels are split once at construction and immutable afterwards.
/// Data rows are split lazily; values are kept raw (no trimming, no quote
/// stripping) because row content is echoed verbatim in diagnostics and
/// passed untouched to the mapping script.
#[derive(Debug)]
pub struct DelimitedSource {
    headers: Vec<String>,
    lines: Vec<String>,
    splitter: Regex,
}

impl DelimitedSource {
    /// Build a source from raw text and a delimiter pattern.
    ///
    /// Fails with [`ConfigError::OnlyOneColumn`] when splitting the header
    /// yields fewer than two columns.
    pub fn from_str(content: &str, pattern: &str) -> ConfigResult<Self> {
        let splitter = Regex::new(pattern)?;

        let mut lines = content.lines();
        let header_line = lines.next().ok_or(ConfigError::EmptyInput)?;

        let headers: Vec<String> = splitter
            .split(header_line)
            .map(|label| label.trim().to_string())
            .collect();

        if headers.len() < 2 {
            return Err(ConfigError::OnlyOneColumn {
                pattern: pattern.to_string(),
            });
        }

        let lines = lines
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            headers,
            lines,
            splitter,
        })
    }

    /// Build a source from a file, decoding it with the detected encoding.
    pub fn from_path<P: AsRef<Path>>(path: P, pattern: &str) -> ConfigResult<Self> {
        let content = read_text(path)?;
        Self::from_str(&content, pattern)
    }

    /// Ordered column labels from the first line of input.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of non-blank data lines.
    pub fn row_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over data rows, each split into raw values.
    ///
    /// A pattern split always returns at least one element, so no row-level
    /// failure exists here; column-count mismatches are the orchestrator's
    /// concern.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.lines.iter().map(|line| self.split_line(line))
    }

    fn split_line(&self, line: &str) -> Vec<String> {
        self.splitter.split(line).map(str::to_string).collect()
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ConfigResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(_) => Ok(String::from_utf8_lossy(bytes).to_string()),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: try UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Read a file and decode it with the detected encoding.
pub fn read_text<P: AsRef<Path>>(path: P) -> ConfigResult<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    decode_content(&bytes, &encoding)
}
