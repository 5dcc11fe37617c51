//! Embedded rhai engine for the field-mapping script.
//!
//! The script is the import's configuration: it receives one input row at a
//! time and returns the ordered list of output fields for that row. It is
//! compiled once per session and evaluated once per row against the same
//! scope, so top-level variables the script declares survive from row to row
//! (counters, lookup tables built on the first call, and so on).
//!
//! Each evaluation binds a fresh `record` map in the scope: column label to
//! raw column value for the current row.

use rhai::{Dynamic, Engine, OptimizationLevel, Scope, AST};

use crate::error::{MappingError, MappingResult};
use crate::model::{FieldDescriptor, FieldType};

/// A compiled mapping script plus the persistent scope it runs in.
pub struct FieldScript {
    engine: Engine,
    ast: AST,
    scope: Scope<'static>,
}

impl std::fmt::Debug for FieldScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldScript").finish_non_exhaustive()
    }
}

impl FieldScript {
    /// Compile a mapping script.
    ///
    /// Engine limits are set before compilation so a runaway script fails
    /// with an evaluation error instead of exhausting the process.
    pub fn compile(script: &str) -> MappingResult<Self> {
        let mut engine = Engine::new();
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);
        engine.set_max_string_size(1_000_000);
        engine.set_max_array_size(10_000);
        engine.set_max_map_size(10_000);
        engine.set_max_call_levels(16);
        engine.set_optimization_level(OptimizationLevel::Full);

        let ast = engine
            .compile(script)
            .map_err(|err| MappingError::Compile(err.to_string()))?;

        Ok(Self {
            engine,
            ast,
            scope: Scope::new(),
        })
    }

    /// Map one row to its ordered field descriptors.
    ///
    /// `headers` and `values` must have equal length; the orchestrator
    /// rejects short and long rows before calling this.
    pub fn evaluate(
        &mut self,
        headers: &[String],
        values: &[String],
    ) -> MappingResult<Vec<FieldDescriptor>> {
        let mut record = rhai::Map::new();
        for (header, value) in headers.iter().zip(values) {
            record.insert(header.as_str().into(), value.clone().into());
        }
        self.scope.set_value("record", record);

        let result = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &self.ast)
            .map_err(|err| MappingError::Eval(err.to_string()))?;

        let fields = result.try_cast::<rhai::Array>().ok_or_else(|| {
            MappingError::Shape("script must return an array of field maps".into())
        })?;

        let mut descriptors = Vec::with_capacity(fields.len());
        for (index, item) in fields.into_iter().enumerate() {
            let map = item
                .try_cast::<rhai::Map>()
                .ok_or_else(|| MappingError::Shape(format!("field {index} is not a map")))?;

            let tag = string_entry(&map, "tag", index)?;
            let label = string_entry(&map, "label", index)?;
            let type_name = string_entry(&map, "type", index)?;
            let value = string_entry(&map, "value", index)?;

            tracing::trace!(%tag, %value, "mapped field");
            descriptors.push(FieldDescriptor {
                tag,
                label,
                field_type: FieldType::from_name(&type_name),
                value,
            });
        }

        tracing::debug!(fields = descriptors.len(), "row mapped");
        Ok(descriptors)
    }
}

fn string_entry(map: &rhai::Map, key: &str, index: usize) -> MappingResult<String> {
    map.get(key)
        .map(|value| value.to_string())
        .ok_or_else(|| MappingError::Shape(format!("field {index} is missing '{key}'")))
}
