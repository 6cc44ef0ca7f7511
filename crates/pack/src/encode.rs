//! Descriptor stream encoder.
//!
//! Writes the JSON form the decoder reads back: PascalCase property
//! names in declaration order, optional fields omitted when absent. The
//! dictionary flag is derived on decode and therefore never written.

use std::mem::take;

use tagmeta_model::{
    AllowedChildTag, BoundAttributeDescriptor, BoundAttributeParameterDescriptor, Diagnostic,
    MetadataMap, RequiredAttributeDescriptor, SourceSpan, TagHelperDescriptor, TagMatchingRule,
};

/// JSON encoder for descriptors and descriptor sets.
#[derive(Default)]
pub struct Encoder {
    out: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode_tag_helper(&mut self, helper: &TagHelperDescriptor) -> Vec<u8> {
        self.out.clear();
        self.write_tag_helper(helper);
        take(&mut self.out)
    }

    pub fn encode_tag_helper_set(&mut self, helpers: &[TagHelperDescriptor]) -> Vec<u8> {
        self.out.clear();
        self.out.push(b'[');
        for (index, helper) in helpers.iter().enumerate() {
            if index > 0 {
                self.out.push(b',');
            }
            self.write_tag_helper(helper);
        }
        self.out.push(b']');
        take(&mut self.out)
    }

    fn write_tag_helper(&mut self, helper: &TagHelperDescriptor) {
        self.out.push(b'{');
        self.prop("Name");
        self.string(&helper.name);
        self.next_prop("AssemblyName");
        self.string(&helper.assembly_name);
        self.opt_string_prop("Documentation", helper.documentation.as_deref());
        self.opt_string_prop("TagOutputHint", helper.tag_output_hint.as_deref());
        self.next_prop("CaseSensitive");
        self.boolean(helper.case_sensitive);
        self.next_prop("TagMatchingRules");
        self.array(&helper.tag_matching_rules, Self::write_matching_rule);
        self.next_prop("BoundAttributes");
        self.array(&helper.bound_attributes, Self::write_bound_attribute);
        self.next_prop("AllowedChildTags");
        self.array(&helper.allowed_child_tags, Self::write_allowed_child_tag);
        self.next_prop("Diagnostics");
        self.array(&helper.diagnostics, Self::write_diagnostic);
        self.next_prop("Metadata");
        self.metadata(&helper.metadata);
        self.out.push(b'}');
    }

    fn write_bound_attribute(&mut self, attribute: &BoundAttributeDescriptor) {
        self.out.push(b'{');
        self.prop("Name");
        self.string(&attribute.name);
        self.next_prop("TypeName");
        self.string(&attribute.type_name);
        self.opt_string_prop("Documentation", attribute.documentation.as_deref());
        self.opt_string_prop("IndexerNamePrefix", attribute.indexer_name_prefix.as_deref());
        self.opt_string_prop("IndexerTypeName", attribute.indexer_type_name.as_deref());
        self.next_prop("IsEnum");
        self.boolean(attribute.is_enum);
        self.next_prop("IsEditorRequired");
        self.boolean(attribute.is_editor_required);
        self.next_prop("Parameters");
        self.array(&attribute.parameters, Self::write_parameter);
        self.next_prop("Metadata");
        self.metadata(&attribute.metadata);
        self.next_prop("Diagnostics");
        self.array(&attribute.diagnostics, Self::write_diagnostic);
        self.out.push(b'}');
    }

    fn write_parameter(&mut self, parameter: &BoundAttributeParameterDescriptor) {
        self.out.push(b'{');
        self.prop("Name");
        self.string(&parameter.name);
        self.opt_string_prop("TypeName", parameter.type_name.as_deref());
        self.next_prop("IsEnum");
        self.boolean(parameter.is_enum);
        self.opt_string_prop("Documentation", parameter.documentation.as_deref());
        self.next_prop("Metadata");
        self.metadata(&parameter.metadata);
        self.next_prop("Diagnostics");
        self.array(&parameter.diagnostics, Self::write_diagnostic);
        self.out.push(b'}');
    }

    fn write_matching_rule(&mut self, rule: &TagMatchingRule) {
        self.out.push(b'{');
        self.prop("TagName");
        self.string(&rule.tag_name);
        self.opt_string_prop("ParentTag", rule.parent_tag.as_deref());
        self.next_prop("TagStructure");
        self.number(rule.tag_structure.code());
        self.next_prop("CaseSensitive");
        self.boolean(rule.case_sensitive);
        self.next_prop("Attributes");
        self.array(&rule.attributes, Self::write_required_attribute);
        self.next_prop("Diagnostics");
        self.array(&rule.diagnostics, Self::write_diagnostic);
        self.out.push(b'}');
    }

    fn write_required_attribute(&mut self, attribute: &RequiredAttributeDescriptor) {
        self.out.push(b'{');
        self.prop("Name");
        self.string(&attribute.name);
        self.next_prop("NameComparison");
        self.number(attribute.name_comparison.code());
        self.opt_string_prop("Value", attribute.value.as_deref());
        self.next_prop("ValueComparison");
        self.number(attribute.value_comparison.code());
        self.next_prop("CaseSensitive");
        self.boolean(attribute.case_sensitive);
        self.next_prop("Diagnostics");
        self.array(&attribute.diagnostics, Self::write_diagnostic);
        self.out.push(b'}');
    }

    fn write_allowed_child_tag(&mut self, tag: &AllowedChildTag) {
        self.out.push(b'{');
        self.prop("Name");
        self.string(&tag.name);
        self.opt_string_prop("DisplayName", tag.display_name.as_deref());
        self.next_prop("Diagnostics");
        self.array(&tag.diagnostics, Self::write_diagnostic);
        self.out.push(b'}');
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.out.push(b'{');
        self.prop("Id");
        self.string(&diagnostic.id);
        self.next_prop("Severity");
        self.number(diagnostic.severity.code());
        self.next_prop("Message");
        self.string(&diagnostic.message);
        if let Some(span) = &diagnostic.span {
            self.next_prop("Span");
            self.write_span(span);
        }
        self.out.push(b'}');
    }

    fn write_span(&mut self, span: &SourceSpan) {
        self.out.push(b'{');
        let mut first = true;
        if let Some(path) = span.file_path.as_deref() {
            self.prop("FilePath");
            self.string(path);
            first = false;
        }
        if !first {
            self.out.push(b',');
        }
        self.prop("AbsoluteIndex");
        self.number(span.absolute_index);
        self.next_prop("LineIndex");
        self.number(span.line_index);
        self.next_prop("CharacterIndex");
        self.number(span.character_index);
        self.next_prop("Length");
        self.number(span.length);
        self.out.push(b'}');
    }

    // ----------------------------------------------------------- plumbing

    fn array<T>(&mut self, items: &[T], write_item: fn(&mut Self, &T)) {
        self.out.push(b'[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push(b',');
            }
            write_item(self, item);
        }
        self.out.push(b']');
    }

    fn metadata(&mut self, metadata: &MetadataMap) {
        self.out.push(b'{');
        for (index, (key, value)) in metadata.iter().enumerate() {
            if index > 0 {
                self.out.push(b',');
            }
            self.string(key);
            self.out.push(b':');
            match value.as_deref() {
                Some(value) => self.string(value),
                None => self.out.extend_from_slice(b"null"),
            }
        }
        self.out.push(b'}');
    }

    /// Writes `"name":` for the first property of an object.
    fn prop(&mut self, name: &str) {
        self.out.push(b'"');
        self.out.extend_from_slice(name.as_bytes());
        self.out.extend_from_slice(b"\":");
    }

    /// Writes `,"name":` for every subsequent property.
    fn next_prop(&mut self, name: &str) {
        self.out.push(b',');
        self.prop(name);
    }

    fn opt_string_prop(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.next_prop(name);
            self.string(value);
        }
    }

    fn boolean(&mut self, value: bool) {
        self.out
            .extend_from_slice(if value { b"true" } else { b"false" });
    }

    fn number(&mut self, value: u32) {
        self.out.extend_from_slice(value.to_string().as_bytes());
    }

    fn string(&mut self, value: &str) {
        self.out.push(b'"');
        for ch in value.bytes() {
            match ch {
                b'"' => self.out.extend_from_slice(b"\\\""),
                b'\\' => self.out.extend_from_slice(b"\\\\"),
                0x08 => self.out.extend_from_slice(b"\\b"),
                0x0c => self.out.extend_from_slice(b"\\f"),
                b'\n' => self.out.extend_from_slice(b"\\n"),
                b'\r' => self.out.extend_from_slice(b"\\r"),
                b'\t' => self.out.extend_from_slice(b"\\t"),
                0x00..=0x1f => {
                    let hex = b"0123456789abcdef";
                    self.out.extend_from_slice(b"\\u00");
                    self.out.push(hex[usize::from(ch >> 4)]);
                    self.out.push(hex[usize::from(ch & 0x0f)]);
                }
                _ => self.out.push(ch),
            }
        }
        self.out.push(b'"');
    }
}
