//! High-level import API combining all steps: reading, mapping, schema
//! derivation and serialization.
//!
//! An [`Importer`] owns one run: one validated input, one compiled script,
//! one output document. Concurrent imports use independent `Importer`
//! instances; nothing is shared across runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use bulletinload::pipeline::Importer;
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

use std::path::{Path, PathBuf};

use crate::error::{ImportError, ImportResult};
use crate::model::{private_field_spec, MainFieldSpecs};
use crate::reader::{read_text, DelimitedSource};
use crate::script::FieldScript;
use crate::xml;

/// One import run: validated source, compiled script, buffered output.
pub struct Importer {
    source: DelimitedSource,
    script: FieldScript,
}

impl Importer {
    /// Build an importer from an already-validated source and compiled script.
    pub fn new(source: DelimitedSource, script: FieldScript) -> Self {
        Self { source, script }
    }

    /// Build an importer from file paths.
    ///
    /// Both files go through encoding detection. All session-level failures
    /// (bad delimiter, script compile error, unreadable file) surface here,
    /// before any row is processed.
    pub fn from_paths<P: AsRef<Path>>(input: P, script_path: P, pattern: &str) -> ImportResult<Self> {
        let source = DelimitedSource::from_path(input, pattern)?;
        tracing::info!(
            columns = source.headers().len(),
            rows = source.row_count(),
            "input validated"
        );

        let script_text = read_text(script_path)?;
        let script = FieldScript::compile(&script_text)?;

        Ok(Self::new(source, script))
    }

    /// Column labels of the validated input.
    pub fn headers(&self) -> &[String] {
        self.source.headers()
    }

    /// Run the import and return the complete document.
    ///
    /// The first mapped row fixes the schema and emits the spec block; every
    /// row emits a value block. Rows are processed strictly in input order.
    /// The whole document accumulates in memory so a mid-run failure leaves
    /// nothing behind.
    pub fn run(&mut self) -> ImportResult<String> {
        let expected = self.source.headers().len();
        let mut main_specs: Option<MainFieldSpecs> = None;
        let mut document = String::new();

        for (index, values) in self.source.rows().enumerate() {
            // 1-based line number in the input file, counting the header
            let line = index + 2;

            if values.len() != expected {
                return Err(ImportError::RowData {
                    expected,
                    found: values.len(),
                    row: values.join("|"),
                });
            }

            let descriptors = self.script.evaluate(self.source.headers(), &values)?;

            match &main_specs {
                None => {
                    let derived = MainFieldSpecs::derive(&descriptors)?;
                    tracing::info!(fields = derived.specs().len(), "schema derived from first row");
                    document.push_str(&xml::spec_block(&derived, &private_field_spec()));
                    main_specs = Some(derived);
                }
                Some(specs) => specs.check_row(line, &descriptors)?,
            }

            document.push_str(&xml::value_block(&descriptors));
        }

        if main_specs.is_none() {
            tracing::warn!("input has no data rows, the document will be empty");
        }

        Ok(document)
    }

    /// Run the import and write the document to `dest` in one operation.
    pub fn import_to<P: AsRef<Path>>(&mut self, dest: P) -> ImportResult<()> {
        let document = self.run()?;
        std::fs::write(dest.as_ref(), document)?;
        tracing::info!(dest = %dest.as_ref().display(), "document written");
        Ok(())
    }
}

/// The conventional output path for an input file: same name, `.xml`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("xml")
}
