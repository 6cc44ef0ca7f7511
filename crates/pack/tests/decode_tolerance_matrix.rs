//! Forward-compatibility and malformed-input sweep for the decoder.

use std::sync::Arc;

use tagmeta_model::TagHelperDescriptor;
use tagmeta_pack::{decode_tag_helper, DecodeError, StringCache};

fn decode(json: &str) -> Result<TagHelperDescriptor, DecodeError> {
    let mut strings = StringCache::new();
    decode_tag_helper(json.as_bytes(), &mut strings)
}

#[test]
fn legacy_and_unknown_properties_are_ignored() {
    // Stale fields written by older producers, at every nesting level.
    let helper = decode(
        r#"{
            "Kind": "ITagHelper",
            "Name": "InputTagHelper",
            "AssemblyName": "App",
            "HashCode": 123456789,
            "BoundAttributes": [{
                "LegacyKind": "ITagHelper",
                "Name": "asp-for",
                "TypeName": "System.String",
                "CacheEntry": {"Nested": [1, 2, {"Deep": null}]}
            }],
            "FutureField": ["anything", {"at": "all"}]
        }"#,
    )
    .expect("unknown properties must not fail the decode");
    assert_eq!(&*helper.name, "InputTagHelper");
    assert_eq!(helper.bound_attributes.len(), 1);
    assert_eq!(&*helper.bound_attributes[0].name, "asp-for");
}

#[test]
fn property_order_is_irrelevant() {
    let forward = decode(
        r#"{"Name": "A", "AssemblyName": "B", "CaseSensitive": true, "TagOutputHint": "div"}"#,
    )
    .unwrap();
    let reversed = decode(
        r#"{"TagOutputHint": "div", "CaseSensitive": true, "AssemblyName": "B", "Name": "A"}"#,
    )
    .unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn indexer_prefix_without_type_name_still_marks_dictionary() {
    let helper = decode(
        r#"{"Name": "A", "AssemblyName": "B", "BoundAttributes": [
            {"Name": "asp-route-", "TypeName": "T", "IndexerNamePrefix": "item"}
        ]}"#,
    )
    .unwrap();
    let attribute = &helper.bound_attributes[0];
    assert!(attribute.is_dictionary);
    assert_eq!(attribute.indexer_name_prefix.as_deref(), Some("item"));
    assert!(attribute.indexer_type_name.is_none());
}

#[test]
fn null_optional_fields_leave_defaults() {
    let helper = decode(
        r#"{"Name": "A", "AssemblyName": "B", "Documentation": null, "BoundAttributes": [
            {"Name": "asp-for", "TypeName": "T", "IndexerNamePrefix": null, "Documentation": null}
        ]}"#,
    )
    .unwrap();
    assert!(helper.documentation.is_none());
    let attribute = &helper.bound_attributes[0];
    assert!(!attribute.is_dictionary);
    assert!(attribute.indexer_name_prefix.is_none());
    assert!(attribute.documentation.is_none());
}

#[test]
fn malformed_input_matrix() {
    let cases: Vec<(&str, fn(&DecodeError) -> bool)> = vec![
        (
            // Boolean field holding a string token.
            r#"{"Name": "A", "AssemblyName": "B", "CaseSensitive": "yes"}"#,
            |err| matches!(err, DecodeError::ExpectedBool(_)),
        ),
        (
            // String field holding an object.
            r#"{"Name": {"x": 1}, "AssemblyName": "B"}"#,
            |err| matches!(err, DecodeError::ExpectedString(_)),
        ),
        (
            // Severity code out of range.
            r#"{"Name": "A", "AssemblyName": "B", "Diagnostics": [{"Id": "X", "Severity": 7, "Message": "m"}]}"#,
            |err| matches!(err, DecodeError::InvalidEnumCode(7)),
        ),
        (
            // Stream ends inside an object.
            r#"{"Name": "A", "AssemblyName": "B""#,
            |err| matches!(err, DecodeError::EndOfInput),
        ),
        (
            // Stream ends inside a string.
            r#"{"Name": "A"#,
            |err| matches!(err, DecodeError::EndOfInput),
        ),
        (
            // Garbage after the descriptor.
            r#"{"Name": "A", "AssemblyName": "B"} {}"#,
            |err| matches!(err, DecodeError::TrailingBytes(_)),
        ),
        (
            // Missing comma between properties.
            r#"{"Name": "A" "AssemblyName": "B"}"#,
            |err| matches!(err, DecodeError::UnexpectedChar(_)),
        ),
        (
            // Invalid escape sequence.
            r#"{"Name": "\q", "AssemblyName": "B"}"#,
            |err| matches!(err, DecodeError::InvalidEscape(_)),
        ),
        (
            // Required field never arrives.
            r#"{"AssemblyName": "B"}"#,
            |err| matches!(err, DecodeError::Build(_)),
        ),
        (
            // Required field explicitly null.
            r#"{"Name": null, "AssemblyName": "B"}"#,
            |err| matches!(err, DecodeError::Build(_)),
        ),
    ];
    for (json, is_expected) in cases {
        let err = decode(json).expect_err(json);
        assert!(is_expected(&err), "{json} -> {err:?}");
    }
}

#[test]
fn failed_decode_yields_no_descriptor() {
    // The error carries no partial data; the caller sees only the error.
    let result = decode(
        r#"{"Name": "A", "AssemblyName": "B", "BoundAttributes": [
            {"Name": "ok", "TypeName": "T"},
            {"Name": "bad", "TypeName": "T", "IsEnum": "not-a-bool"}
        ]}"#,
    );
    assert!(matches!(result, Err(DecodeError::ExpectedBool(_))));
}

#[test]
fn duplicate_metadata_keys_overwrite() {
    let helper = decode(
        r#"{"Name": "A", "AssemblyName": "B",
           "Metadata": {"K": "first", "K": "second", "Other": null}}"#,
    )
    .unwrap();
    assert_eq!(helper.metadata.len(), 2);
    assert_eq!(helper.metadata.get("K").unwrap().as_deref(), Some("second"));
}

#[test]
fn interning_spans_decode_calls_sharing_a_cache() {
    let mut strings = StringCache::new();
    let first = decode_tag_helper(
        br#"{"Name": "A", "AssemblyName": "Asm", "BoundAttributes": [{"Name": "x", "TypeName": "System.String"}]}"#,
        &mut strings,
    )
    .unwrap();
    let second = decode_tag_helper(
        br#"{"Name": "B", "AssemblyName": "Asm", "BoundAttributes": [{"Name": "y", "TypeName": "System.String"}]}"#,
        &mut strings,
    )
    .unwrap();
    assert!(Arc::ptr_eq(
        &first.bound_attributes[0].type_name,
        &second.bound_attributes[0].type_name,
    ));
    assert!(Arc::ptr_eq(&first.assembly_name, &second.assembly_name));
}

#[test]
fn bound_attribute_order_matches_stream() {
    let helper = decode(
        r#"{"Name": "A", "AssemblyName": "B", "BoundAttributes": [
            {"Name": "Foo", "TypeName": "T"},
            {"Name": "Bar", "TypeName": "T"},
            {"Name": "Baz", "TypeName": "T"}
        ]}"#,
    )
    .unwrap();
    let names: Vec<&str> = helper
        .bound_attributes
        .iter()
        .map(|attribute| &*attribute.name)
        .collect();
    assert_eq!(names, ["Foo", "Bar", "Baz"]);
}
