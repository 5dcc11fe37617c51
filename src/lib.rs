//! # Bulletinload - scriptable delimited-text to bulletin XML import
//!
//! Bulletinload turns delimited text files (pipe, tab, or any regex-splittable
//! delimiter) into bulletin XML documents. A mapping script decides, per row,
//! which output fields exist and what they contain; the schema of the document
//! is therefore data-driven, fixed by the first row of each run.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Text File   │────▶│   Reader    │────▶│   Script    │────▶│ Bulletin    │
//! │ (any enc.)  │     │ (regex split)│    │  (rhai map) │     │ XML doc     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bulletinload::Importer;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut importer = Importer::from_paths(
//!         Path::new("bulletins.csv"),
//!         Path::new("mapping.rhai"),
//!         r"\|",
//!     )?;
//!     importer.import_to(Path::new("bulletins.xml"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`model`] - Field descriptors and the run's field schema
//! - [`reader`] - Delimited input with encoding auto-detection
//! - [`script`] - Embedded rhai mapping engine
//! - [`xml`] - Byte-exact bulletin document serializer
//! - [`pipeline`] - The import orchestrator

// Core modules
pub mod error;
pub mod model;

// Input
pub mod reader;

// Mapping
pub mod script;

// Output
pub mod xml;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, ImportError, MappingError, SchemaError};

// =============================================================================
// Re-exports - Model
// =============================================================================

pub use model::{
    private_field_spec, FieldDescriptor, FieldSpec, FieldType, MainFieldSpecs, PRIVATE_FIELD_TAG,
};

// =============================================================================
// Re-exports - Reader
// =============================================================================

pub use reader::{decode_content, detect_encoding, read_text, DelimitedSource};

// =============================================================================
// Re-exports - Script
// =============================================================================

pub use script::FieldScript;

// =============================================================================
// Re-exports - Serializer
// =============================================================================

pub use xml::{spec_block, value_block};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{default_output_path, Importer};
