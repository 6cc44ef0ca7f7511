//! Encode/decode round-trip sweep over descriptor shapes.

use std::sync::Arc;

use tagmeta_model::{
    AllowedChildTagBuilder, BoundAttributeBuilder, BoundAttributeParameterBuilder,
    DiagnosticBuilder, NameComparison, RequiredAttributeBuilder, Severity, SourceSpan,
    TagHelperBuilder, TagHelperDescriptor, TagMatchingRuleBuilder, TagStructure, ValueComparison,
};
use tagmeta_pack::{decode_tag_helper, decode_tag_helper_set, Encoder, StringCache};

fn shared(s: &str) -> Arc<str> {
    Arc::from(s)
}

fn minimal_helper(name: &str) -> TagHelperDescriptor {
    TagHelperBuilder {
        name: Some(shared(name)),
        assembly_name: Some(shared("App.TagHelpers")),
        ..Default::default()
    }
    .build()
    .unwrap()
}

/// A helper exercising every field: rules with required attributes,
/// bound attributes with dictionary semantics and parameters, child
/// tags, diagnostics with spans, and metadata.
fn full_helper() -> TagHelperDescriptor {
    let rule = TagMatchingRuleBuilder {
        tag_name: Some(shared("form")),
        parent_tag: Some(shared("body")),
        tag_structure: TagStructure::NormalOrSelfClosing,
        case_sensitive: true,
        attributes: vec![RequiredAttributeBuilder {
            name: Some(shared("asp-action")),
            name_comparison: NameComparison::FullMatch,
            value: Some(shared("Index")),
            value_comparison: ValueComparison::PrefixMatch,
            case_sensitive: false,
            ..Default::default()
        }
        .build()
        .unwrap()],
        ..Default::default()
    }
    .build()
    .unwrap();

    let parameter = BoundAttributeParameterBuilder {
        name: Some(shared("culture")),
        type_name: Some(shared("System.String")),
        documentation: Some(shared("Culture of the formatted value.")),
        ..Default::default()
    }
    .build()
    .unwrap();

    let mut route_values = BoundAttributeBuilder {
        name: Some(shared("asp-all-route-data")),
        type_name: Some(shared(
            "System.Collections.Generic.IDictionary<System.String, System.String>",
        )),
        indexer_name_prefix: Some(shared("asp-route-")),
        indexer_type_name: Some(shared("System.String")),
        parameters: vec![parameter],
        ..Default::default()
    };
    route_values
        .metadata
        .insert(shared("Common.PropertyName"), Some(shared("RouteValues")));

    let plain = BoundAttributeBuilder {
        name: Some(shared("asp-for")),
        type_name: Some(shared("Microsoft.AspNetCore.Mvc.ViewFeatures.ModelExpression")),
        documentation: Some(shared("An expression to be evaluated against the model.")),
        is_editor_required: true,
        ..Default::default()
    }
    .build()
    .unwrap();

    let child_tag = AllowedChildTagBuilder {
        name: Some(shared("option")),
        display_name: Some(shared("option")),
        ..Default::default()
    }
    .build()
    .unwrap();

    let diagnostic = DiagnosticBuilder {
        id: Some(shared("TH004")),
        severity: Severity::Error,
        message: Some(shared("Tag helpers cannot target the \"head\" element.")),
        span: Some(SourceSpan {
            file_path: Some(shared("Views/Shared/_Layout.cshtml")),
            absolute_index: 120,
            line_index: 4,
            character_index: 8,
            length: 16,
        }),
    }
    .build()
    .unwrap();

    let mut builder = TagHelperBuilder {
        name: Some(shared("FormTagHelper")),
        assembly_name: Some(shared("Microsoft.AspNetCore.Mvc.TagHelpers")),
        documentation: Some(shared("Targets <form> elements.\nSupports route values.")),
        tag_output_hint: Some(shared("form")),
        case_sensitive: true,
        tag_matching_rules: vec![rule],
        bound_attributes: vec![route_values.build().unwrap(), plain],
        allowed_child_tags: vec![child_tag],
        diagnostics: vec![diagnostic],
        ..Default::default()
    };
    builder
        .metadata
        .insert(shared("Common.TypeName"), Some(shared("FormTagHelper")));
    builder.metadata.insert(shared("RuntimeName"), None);
    builder.build().unwrap()
}

#[test]
fn roundtrip_matrix() {
    let cases = vec![
        minimal_helper("EmptyTagHelper"),
        full_helper(),
        {
            let mut helper = minimal_helper("UnicodeTagHelper");
            helper.documentation = Some(shared("héllo → ☃ \u{1f600} \"quoted\"\nline"));
            helper
        },
    ];
    let mut encoder = Encoder::new();
    for case in cases {
        let bytes = encoder.encode_tag_helper(&case);
        let mut strings = StringCache::new();
        let decoded = decode_tag_helper(&bytes, &mut strings).expect("decode");
        assert_eq!(decoded, case);
    }
}

#[test]
fn roundtrip_derives_dictionary_flag() {
    let helper = full_helper();
    assert!(helper.bound_attributes[0].is_dictionary);
    assert!(!helper.bound_attributes[1].is_dictionary);

    let mut encoder = Encoder::new();
    let bytes = encoder.encode_tag_helper(&helper);
    let mut strings = StringCache::new();
    let decoded = decode_tag_helper(&bytes, &mut strings).expect("decode");
    assert!(decoded.bound_attributes[0].is_dictionary);
    assert_eq!(
        decoded.bound_attributes[0].indexer_name_prefix.as_deref(),
        Some("asp-route-")
    );
}

#[test]
fn set_roundtrip_preserves_order() {
    let helpers = vec![
        minimal_helper("First"),
        full_helper(),
        minimal_helper("Third"),
    ];
    let mut encoder = Encoder::new();
    let bytes = encoder.encode_tag_helper_set(&helpers);
    let mut strings = StringCache::new();
    let decoded = decode_tag_helper_set(&bytes, &mut strings).expect("decode set");
    assert_eq!(decoded, helpers);

    let empty = encoder.encode_tag_helper_set(&[]);
    let decoded = decode_tag_helper_set(&empty, &mut strings).expect("decode empty set");
    assert!(decoded.is_empty());
}

#[test]
fn encoder_output_is_valid_json() {
    let mut encoder = Encoder::new();
    let bytes = encoder.encode_tag_helper(&full_helper());
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
    assert_eq!(value["Name"], "FormTagHelper");
    assert_eq!(value["TagMatchingRules"][0]["TagName"], "form");
    assert_eq!(
        value["BoundAttributes"][0]["IndexerNamePrefix"],
        "asp-route-"
    );
    // Derived flag is never persisted.
    assert!(value["BoundAttributes"][0].get("IsDictionary").is_none());
}

#[test]
fn roundtrip_interns_repeated_strings() {
    let mut encoder = Encoder::new();
    let bytes = encoder.encode_tag_helper_set(&[full_helper(), full_helper()]);
    let mut strings = StringCache::new();
    let decoded = decode_tag_helper_set(&bytes, &mut strings).expect("decode set");
    let first = &decoded[0].bound_attributes[1].type_name;
    let second = &decoded[1].bound_attributes[1].type_name;
    assert!(Arc::ptr_eq(first, second));
}
