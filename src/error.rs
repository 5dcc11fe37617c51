//! Error types for the bulletin import pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ConfigError`] - import-session configuration errors (delimiter, encoding, IO)
//! - [`MappingError`] - mapping-script compilation and evaluation errors
//! - [`SchemaError`] - field-specification derivation errors
//! - [`ImportError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Two messages are part of the external contract and surfaced verbatim to
//! operators: the "only one column" delimiter diagnostic and the
//! `Row Data = ...` echo of a malformed row.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while constructing an import session.
///
/// All of these are detected before any data row is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The delimiter pattern split the header into fewer than two columns.
    ///
    /// Almost always means the caller supplied the wrong delimiter for the
    /// file (for example a literal comma against pipe-delimited data).
    #[error("delimiter '{pattern}' produced only one column in the header, please check your delimiter pattern")]
    OnlyOneColumn { pattern: String },

    /// The delimiter pattern is not a valid regular expression.
    #[error("invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The input has no header line at all.
    #[error("input is empty, no header row found")]
    EmptyInput,

    /// Failed to decode the input bytes as text.
    #[error("failed to decode input: {0}")]
    Encoding(String),

    /// Failed to read a file.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors raised by the field-mapping script engine.
///
/// The embedded engine's own diagnostic text is carried verbatim, since it
/// references script logic the import layer does not understand.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping script failed to compile.
    #[error("script compilation failed: {0}")]
    Compile(String),

    /// The mapping script failed at runtime.
    #[error("script evaluation failed: {0}")]
    Eval(String),

    /// The script ran but returned something that is not an ordered
    /// collection of field descriptors.
    #[error("script produced an invalid field list: {0}")]
    Shape(String),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors raised while deriving or enforcing the run's field schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two descriptors in the first row share a tag.
    #[error("duplicate field tag '{0}' in the first row's output")]
    DuplicateTag(String),

    /// A later row's descriptor set diverged from the schema derived from
    /// the first row.
    #[error("line {line} produced field tags [{found}] but the schema derived from the first row is [{expected}]")]
    InconsistentRow {
        line: usize,
        expected: String,
        found: String,
    },
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level import orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::Importer`].
/// Any variant aborts the whole run; no partial document is valid output.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Session configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Mapping-script error.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Schema derivation or consistency error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A data row's value count does not match the header's column count.
    ///
    /// The offending row is echoed pipe-joined so the operator can locate
    /// the bad line in the source file.
    #[error("row has {found} values but the header has {expected} columns, Row Data = {row}")]
    RowData {
        expected: usize,
        found: usize,
        row: String,
    },

    /// Failed to write the output document.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for session-configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for mapping-script operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
