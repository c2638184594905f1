//! Property-based tests for the registry and renderer.
//!
//! Properties tested:
//! - Rendering is idempotent for every wire type
//! - Every declaration matches the `export const <Name> = z.<call>...;` template
//! - Constraints are emitted in descriptor order
//! - Unknown identifiers never produce a descriptor
//! - The configured string length is rendered exactly

use proptest::prelude::*;

use proto_zod::{
    FieldIR, FieldType, GeneratorOptions, MessageIR, SchemaFileBuilder, SchemaRegistry, WireType,
    ZodRenderer,
};

// =============================================================================
// Generators for property tests
// =============================================================================

fn arb_wire_type() -> impl Strategy<Value = WireType> {
    prop::sample::select(
        WireType::ALL
            .into_iter()
            .filter(|wire| *wire != WireType::Enum)
            .collect::<Vec<_>>(),
    )
}

fn arb_enum_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,15}".prop_map(|s| s)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_render_is_idempotent(wire in arb_wire_type()) {
        let registry = SchemaRegistry::new();
        let renderer = ZodRenderer::new();

        let first = renderer.render(&registry.lookup(wire).unwrap());
        let second = renderer.render(&registry.lookup(wire).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_declaration_template(wire in arb_wire_type()) {
        let descriptor = SchemaRegistry::new().lookup(wire).unwrap();
        let code = ZodRenderer::new().render(&descriptor);

        let prefix = format!("export const {} = z.{}", descriptor.name(), descriptor.primitive());
        prop_assert!(code.starts_with(&prefix));
        prop_assert!(code.ends_with(";\n"));
        prop_assert_eq!(code.lines().count(), 1);
        prop_assert!(descriptor.name().ends_with("Schema"));
    }

    #[test]
    fn prop_constraints_in_order(wire in arb_wire_type()) {
        let descriptor = SchemaRegistry::new().lookup(wire).unwrap();
        let code = ZodRenderer::new().render(&descriptor);

        let suffix: String = descriptor
            .constraints()
            .iter()
            .map(|c| format!(".{c}"))
            .collect();
        let expected_end = format!("{suffix};\n");
        prop_assert!(code.ends_with(&expected_end));
    }

    #[test]
    fn prop_unknown_identifiers_fail(identifier in "[a-z]{1,10}") {
        prop_assume!(WireType::ALL.iter().all(|w| w.as_str() != identifier));
        prop_assert!(SchemaRegistry::new().lookup_identifier(&identifier).is_err());
    }

    #[test]
    fn prop_string_length_rendered_exactly(max in any::<u64>()) {
        let descriptor = SchemaRegistry::with_max_string_length(max)
            .lookup(WireType::String)
            .unwrap();
        let code = ZodRenderer::new().render(&descriptor);
        let expected = format!("export const StringSchema = z.string().max({max});\n");
        prop_assert_eq!(code, expected);
    }

    #[test]
    fn prop_enum_schema_references_type(name in arb_enum_name()) {
        let descriptor = SchemaRegistry::new().lookup_enum(&name).unwrap();
        let code = ZodRenderer::new().render(&descriptor);
        let expected = format!("export const {name}Schema = z.nativeEnum({name});\n");
        prop_assert_eq!(code, expected);
    }

    #[test]
    fn prop_one_block_per_distinct_type(wires in prop::collection::vec(arb_wire_type(), 0..30)) {
        let message = wires.iter().enumerate().fold(MessageIR::new("M"), |m, (i, wire)| {
            m.with_field(FieldIR::new(format!("f{i}"), FieldType::Scalar(*wire)))
        });

        let file = SchemaFileBuilder::new(GeneratorOptions::default())
            .build(&[message])
            .unwrap();

        let mut distinct = wires.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(file.len(), distinct.len());
        prop_assert_eq!(
            file.to_source().matches("export const ").count(),
            distinct.len()
        );
    }
}
