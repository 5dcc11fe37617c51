//! Serializer for the bulletin XML document.
//!
//! The output grammar is fixed and consumed by a downstream tool that parses
//! it line by line: single-quoted attributes, one element per line, a blank
//! line between value fields but not between spec fields. Everything here is
//! plain string building; a generic XML writer would reformat the document
//! and break the consumer.
//!
//! A document is one spec block (written once, from the first row's schema)
//! followed by one value block per row.

use crate::model::{FieldDescriptor, FieldSpec, MainFieldSpecs};

/// Serialize the document header: root open tag, main field specs and the
/// private field spec.
pub fn spec_block(main: &MainFieldSpecs, private: &FieldSpec) -> String {
    let mut out = String::new();

    out.push_str("<MartusBulletin>\n");
    out.push_str("<MainFieldSpecs>\n");
    for spec in main.specs() {
        push_field_spec(&mut out, spec);
    }
    out.push_str("</MainFieldSpecs>\n\n");

    out.push_str("<PrivateFieldSpecs>\n");
    push_field_spec(&mut out, private);
    out.push_str("</PrivateFieldSpecs>\n\n");

    out
}

fn push_field_spec(out: &mut String, spec: &FieldSpec) {
    out.push_str(&format!("<Field type='{}'>\n", spec.field_type));
    out.push_str(&format!("<Tag>{}</Tag>\n", spec.tag));
    out.push_str(&format!("<Label>{}</Label>\n", spec.label));
    out.push_str("</Field>\n");
}

/// Serialize one row's values, in descriptor order, private field included.
pub fn value_block(descriptors: &[FieldDescriptor]) -> String {
    let mut out = String::new();

    out.push_str("<FieldValues>\n");
    for descriptor in descriptors {
        out.push_str(&format!("<Field tag='{}'>\n", descriptor.tag));
        out.push_str(&format!("<Value>{}</Value>\n", descriptor.value));
        out.push_str("</Field>\n\n");
    }
    out.push_str("</FieldValues>\n");
    out.push_str("</MartusBulletin>\n\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{private_field_spec, FieldType, PRIVATE_FIELD_TAG};

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
            descriptor("Witness", "Witness", FieldType::String, "Janice Doe"),
            descriptor("WitnessComment", "Comment", FieldType::String, "Message 2"),
            descriptor("language", "", FieldType::Language, "fr"),
            descriptor(
                PRIVATE_FIELD_TAG,
                "",
                FieldType::Multiline,
                "MY PRIVATE DATE = T.I..",
            ),
        ]
    }

    const EXPECTED_SPEC_BLOCK: &str = "<MartusBulletin>\n\
        <MainFieldSpecs>\n\
        <Field type='STRING'>\n\
        <Tag>Witness</Tag>\n\
        <Label>Witness</Label>\n\
        </Field>\n\
        <Field type='STRING'>\n\
        <Tag>WitnessComment</Tag>\n\
        <Label>Comment</Label>\n\
        </Field>\n\
        <Field type='LANGUAGE'>\n\
        <Tag>language</Tag>\n\
        <Label></Label>\n\
        </Field>\n\
        </MainFieldSpecs>\n\n\
        <PrivateFieldSpecs>\n\
        <Field type='MULTILINE'>\n\
        <Tag>privateinfo</Tag>\n\
        <Label></Label>\n\
        </Field>\n\
        </PrivateFieldSpecs>\n\n";

    const EXPECTED_VALUE_BLOCK: &str = "<FieldValues>\n\
        <Field tag='Witness'>\n\
        <Value>Janice Doe</Value>\n\
        </Field>\n\n\
        <Field tag='WitnessComment'>\n\
        <Value>Message 2</Value>\n\
        </Field>\n\n\
        <Field tag='language'>\n\
        <Value>fr</Value>\n\
        </Field>\n\n\
        <Field tag='privateinfo'>\n\
        <Value>MY PRIVATE DATE = T.I..</Value>\n\
        </Field>\n\n\
        </FieldValues>\n\
        </MartusBulletin>\n\n";

    #[test]
    fn test_spec_block_exact_bytes() {
        let specs = MainFieldSpecs::derive(&first_row()).unwrap();
        assert_eq!(spec_block(&specs, &private_field_spec()), EXPECTED_SPEC_BLOCK);
    }

    #[test]
    fn test_value_block_exact_bytes() {
        assert_eq!(value_block(&first_row()), EXPECTED_VALUE_BLOCK);
    }

    #[test]
    fn test_private_spec_never_derived_from_row() {
        // Even if a row styles the private descriptor oddly, the spec block
        // still carries the fixed MULTILINE entry.
        let mut row = first_row();
        row[3].label = "Secret".into();
        row[3].field_type = FieldType::String;

        let specs = MainFieldSpecs::derive(&row).unwrap();
        let block = spec_block(&specs, &private_field_spec());
        assert!(block.contains("<Field type='MULTILINE'>\n<Tag>privateinfo</Tag>\n<Label></Label>\n"));
        assert!(!block.contains("Secret"));
    }

    #[test]
    fn test_unknown_type_serialized_as_is() {
        let row = vec![
            descriptor("when", "Date", FieldType::Other("DATE".into()), "20000101"),
            descriptor("who", "", FieldType::String, "x"),
        ];
        let specs = MainFieldSpecs::derive(&row).unwrap();
        assert!(spec_block(&specs, &private_field_spec()).contains("<Field type='DATE'>"));
    }

    #[test]
    fn test_empty_schema_still_well_formed() {
        let specs = MainFieldSpecs::derive(&[]).unwrap();
        let block = spec_block(&specs, &private_field_spec());
        assert!(block.starts_with("<MartusBulletin>\n<MainFieldSpecs>\n</MainFieldSpecs>\n\n"));
        assert!(block.ends_with("</PrivateFieldSpecs>\n\n"));
    }

    #[test]
    fn test_value_block_preserves_descriptor_order() {
        let row = vec![
            descriptor("b", "", FieldType::String, "2"),
            descriptor("a", "", FieldType::String, "1"),
        ];
        let block = value_block(&row);
        let b_at = block.find("tag='b'").unwrap();
        let a_at = block.find("tag='a'").unwrap();
        assert!(b_at < a_at);
    }
}
