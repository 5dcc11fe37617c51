//! Field specification model for the bulletin document.
//!
//! This module contains the core data structures shared by the mapping
//! engine and the serializer:
//!
//! - [`FieldType`] - known field types plus opaque passthrough
//! - [`FieldDescriptor`] - one row's computed (tag, label, type, value)
//! - [`FieldSpec`] - a schema entry (tag, label, type)
//! - [`MainFieldSpecs`] - the public schema derived from the first row
//! - [`private_field_spec`] - the fixed private schema entry

use crate::error::SchemaError;

/// Tag of the fixed private field.
///
/// A descriptor carrying this tag supplies the private field's per-row value;
/// its spec is never derived from data.
pub const PRIVATE_FIELD_TAG: &str = "privateinfo";

// =============================================================================
// Field Type
// =============================================================================

/// Type of an output field.
///
/// The mapping script may emit type tags the core does not know; those are
/// carried opaquely and serialized unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Single-line text.
    String,
    /// Language code.
    Language,
    /// Multi-line text.
    Multiline,
    /// Any other type tag, passed through as-is.
    Other(String),
}

impl FieldType {
    /// Parse a type from its wire spelling.
    pub fn from_name(name: &str) -> Self {
        match name {
            "STRING" => Self::String,
            "LANGUAGE" => Self::Language,
            "MULTILINE" => Self::Multiline,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "STRING",
            Self::Language => "LANGUAGE",
            Self::Multiline => "MULTILINE",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Descriptors and Specs
// =============================================================================

/// The runtime-computed output field for one row.
///
/// Produced by the mapping script; ordering is significant and must match
/// emission order exactly, since serialization is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub tag: String,
    pub label: String,
    pub field_type: FieldType,
    pub value: String,
}

impl FieldDescriptor {
    /// Project the schema entry out of this descriptor.
    pub fn spec(&self) -> FieldSpec {
        FieldSpec {
            tag: self.tag.clone(),
            label: self.label.clone(),
            field_type: self.field_type.clone(),
        }
    }

    /// Whether this descriptor feeds the fixed private field.
    pub fn is_private(&self) -> bool {
        self.tag == PRIVATE_FIELD_TAG
    }
}

/// A schema entry: tag, label and type, without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub tag: String,
    pub label: String,
    pub field_type: FieldType,
}

/// The fixed private field spec, independent of row content.
pub fn private_field_spec() -> FieldSpec {
    FieldSpec {
        tag: PRIVATE_FIELD_TAG.to_string(),
        label: String::new(),
        field_type: FieldType::Multiline,
    }
}

// =============================================================================
// Main Field Specs
// =============================================================================

/// The public schema shared by all rows in a run.
///
/// Derived once from the first successfully mapped row and immutable for the
/// remainder of the run.
#[derive(Debug, Clone)]
pub struct MainFieldSpecs {
    specs: Vec<FieldSpec>,
}

impl MainFieldSpecs {
    /// Derive the schema from the first row's descriptors.
    ///
    /// The private descriptor is excluded: its spec is fixed, only its value
    /// is row data. Fails if two main descriptors share a tag.
    pub fn derive(descriptors: &[FieldDescriptor]) -> Result<Self, SchemaError> {
        let mut specs: Vec<FieldSpec> = Vec::new();

        for descriptor in descriptors {
            if descriptor.is_private() {
                continue;
            }
            if specs.iter().any(|spec| spec.tag == descriptor.tag) {
                return Err(SchemaError::DuplicateTag(descriptor.tag.clone()));
            }
            specs.push(descriptor.spec());
        }

        Ok(Self { specs })
    }

    /// The ordered schema entries.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Verify that a later row's descriptors still match this schema.
    ///
    /// The schema is positional, so a row emitting a different tag sequence
    /// would silently mis-serialize if allowed through. `line` is the
    /// 1-based input line number, used in the error.
    pub fn check_row(&self, line: usize, descriptors: &[FieldDescriptor]) -> Result<(), SchemaError> {
        let row_tags: Vec<&str> = descriptors
            .iter()
            .filter(|d| !d.is_private())
            .map(|d| d.tag.as_str())
            .collect();
        let schema_tags: Vec<&str> = self.specs.iter().map(|s| s.tag.as_str()).collect();

        if row_tags != schema_tags {
            return Err(SchemaError::InconsistentRow {
                line,
                expected: schema_tags.join(", "),
                found: row_tags.join(", "),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(tag: &str, label: &str, field_type: FieldType, value: &str) -> FieldDescriptor {
        FieldDescriptor {
            tag: tag.into(),
            label: label.into(),
            field_type,
            value: value.into(),
        }
    }

    fn first_row() -> Vec<FieldDescriptor> {
        vec![
            descriptor("Witness", "Witness", FieldType::String, "Jane Doe"),
            descriptor("WitnessComment", "Comment", FieldType::String, "Message 2"),
            descriptor("language", "", FieldType::Language, "fr"),
            descriptor(PRIVATE_FIELD_TAG, "", FieldType::Multiline, "MY PRIVATE DATE = T.I.."),
        ]
    }

    #[test]
    fn test_type_round_trip() {
        assert_eq!(FieldType::from_name("STRING"), FieldType::String);
        assert_eq!(FieldType::from_name("LANGUAGE").as_str(), "LANGUAGE");
        assert_eq!(FieldType::from_name("MULTILINE").as_str(), "MULTILINE");
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let t = FieldType::from_name("DROPDOWN");
        assert_eq!(t, FieldType::Other("DROPDOWN".into()));
        assert_eq!(t.as_str(), "DROPDOWN");
    }

    #[test]
    fn test_derive_excludes_private() {
        let specs = MainFieldSpecs::derive(&first_row()).unwrap();

        let tags: Vec<_> = specs.specs().iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["Witness", "WitnessComment", "language"]);
    }

    #[test]
    fn test_derive_preserves_order_and_labels() {
        let specs = MainFieldSpecs::derive(&first_row()).unwrap();

        assert_eq!(specs.specs()[1].label, "Comment");
        assert_eq!(specs.specs()[2].field_type, FieldType::Language);
        assert_eq!(specs.specs()[2].label, "");
    }

    #[test]
    fn test_derive_rejects_duplicate_tag() {
        let mut row = first_row();
        row.push(descriptor("Witness", "Again", FieldType::String, "x"));

        let err = MainFieldSpecs::derive(&row).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTag(tag) if tag == "Witness"));
    }

    #[test]
    fn test_derive_is_idempotent() {
        let row = first_row();
        let first = MainFieldSpecs::derive(&row).unwrap();
        let second = MainFieldSpecs::derive(&row).unwrap();
        assert_eq!(first.specs(), second.specs());
    }

    #[test]
    fn test_check_row_accepts_matching_tags() {
        let specs = MainFieldSpecs::derive(&first_row()).unwrap();
        let mut later = first_row();
        later[0].value = "Janice Doe".into();

        assert!(specs.check_row(3, &later).is_ok());
    }

    #[test]
    fn test_check_row_rejects_divergent_tags() {
        let specs = MainFieldSpecs::derive(&first_row()).unwrap();
        let mut later = first_row();
        later[1].tag = "Comment".into();

        let err = specs.check_row(3, &later).unwrap_err();
        assert!(matches!(err, SchemaError::InconsistentRow { line: 3, .. }));
    }

    #[test]
    fn test_private_field_spec_is_fixed() {
        let spec = private_field_spec();
        assert_eq!(spec.tag, "privateinfo");
        assert_eq!(spec.label, "");
        assert_eq!(spec.field_type, FieldType::Multiline);
    }
}
