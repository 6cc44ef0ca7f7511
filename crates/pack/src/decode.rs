//! Descriptor stream decoder.
//!
//! Reads property-tagged JSON objects into `tagmeta-model` builders, one
//! dispatch table per descriptor kind. Properties may arrive in any
//! order; names missing from a table are skipped wholesale, which keeps
//! caches written by older producers decodable. Any malformed token
//! aborts the entire top-level decode.

use std::sync::Arc;

use tagmeta_model::{
    AllowedChildTagBuilder, BoundAttributeBuilder, BoundAttributeParameterBuilder, Diagnostic,
    DiagnosticBuilder, MetadataMap, NameComparison, RequiredAttributeBuilder, Severity,
    SourceSpanBuilder, TagHelperBuilder, TagHelperDescriptor, TagMatchingRuleBuilder,
    TagStructure, ValueComparison,
};

use crate::error::DecodeError;
use crate::intern::StringCache;
use crate::reader::TokenReader;
use crate::table::PropertyTable;

/// Decodes one tag helper descriptor from a JSON object.
pub fn decode_tag_helper(
    data: &[u8],
    strings: &mut StringCache,
) -> Result<TagHelperDescriptor, DecodeError> {
    let mut decoder = Decoder::new(data, strings);
    let mut builder = TagHelperBuilder::default();
    decoder.read_object_into(&TAG_HELPER_TABLE, &mut builder)?;
    decoder.rd.end()?;
    Ok(builder.build()?)
}

/// Decodes a whole descriptor set: a JSON array of tag helper objects,
/// the unit a project cache persists. Order is preserved.
pub fn decode_tag_helper_set(
    data: &[u8],
    strings: &mut StringCache,
) -> Result<Vec<TagHelperDescriptor>, DecodeError> {
    let mut decoder = Decoder::new(data, strings);
    let mut helpers = Vec::new();
    decoder.rd.array_begin()?;
    while decoder.rd.array_more()? {
        let mut builder = TagHelperBuilder::default();
        decoder.read_object_into(&TAG_HELPER_TABLE, &mut builder)?;
        helpers.push(builder.build()?);
    }
    decoder.rd.end()?;
    Ok(helpers)
}

/// One decode session: a token reader plus the string cache interning
/// every string that ends up in a descriptor.
pub struct Decoder<'a> {
    rd: TokenReader<'a>,
    strings: &'a mut StringCache,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], strings: &'a mut StringCache) -> Self {
        Self {
            rd: TokenReader::new(data),
            strings,
        }
    }

    /// Drives one object through a dispatch table: every known property
    /// is applied to the builder, every unknown one is skipped.
    pub fn read_object_into<B: 'static>(
        &mut self,
        table: &PropertyTable<B>,
        builder: &mut B,
    ) -> Result<(), DecodeError> {
        self.rd.object_begin()?;
        while let Some(key) = self.rd.object_key()? {
            match table.get(&key) {
                Some(read_field) => read_field(self, builder)?,
                None => self.rd.skip_value()?,
            }
        }
        Ok(())
    }

    fn read_interned_opt(&mut self) -> Result<Option<Arc<str>>, DecodeError> {
        let value = self.rd.read_str_opt()?;
        Ok(self.strings.intern_opt(value))
    }

    fn read_enum_code<T>(
        &mut self,
        from_code: fn(u32) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let code = self.rd.read_u32()?;
        from_code(code).ok_or(DecodeError::InvalidEnumCode(code))
    }

    /// Key/value pairs read straight into the mapping; a duplicate key
    /// overwrites the earlier value.
    fn read_metadata(&mut self) -> Result<MetadataMap, DecodeError> {
        let mut metadata = MetadataMap::default();
        self.rd.object_begin()?;
        while let Some(key) = self.rd.object_key()? {
            let value = self.read_interned_opt()?;
            metadata.insert(self.strings.intern(&key), value);
        }
        Ok(metadata)
    }

    fn read_diagnostics(&mut self) -> Result<Vec<Diagnostic>, DecodeError> {
        let mut diagnostics = Vec::new();
        self.rd.array_begin()?;
        while self.rd.array_more()? {
            let mut builder = DiagnosticBuilder::default();
            self.read_object_into(&DIAGNOSTIC_TABLE, &mut builder)?;
            diagnostics.push(builder.build()?);
        }
        Ok(diagnostics)
    }
}

mod tag_helper {
    use super::*;

    pub(super) fn name(d: &mut Decoder<'_>, b: &mut TagHelperBuilder) -> Result<(), DecodeError> {
        b.name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn assembly_name(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.assembly_name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn documentation(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.documentation = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn tag_output_hint(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.tag_output_hint = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn case_sensitive(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.case_sensitive = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn tag_matching_rules(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        d.rd.array_begin()?;
        while d.rd.array_more()? {
            let mut child = TagMatchingRuleBuilder::default();
            d.read_object_into(&TAG_MATCHING_RULE_TABLE, &mut child)?;
            b.tag_matching_rules.push(child.build()?);
        }
        Ok(())
    }

    pub(super) fn bound_attributes(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        d.rd.array_begin()?;
        while d.rd.array_more()? {
            let mut child = BoundAttributeBuilder::default();
            d.read_object_into(&BOUND_ATTRIBUTE_TABLE, &mut child)?;
            b.bound_attributes.push(child.build()?);
        }
        Ok(())
    }

    pub(super) fn allowed_child_tags(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        d.rd.array_begin()?;
        while d.rd.array_more()? {
            let mut child = AllowedChildTagBuilder::default();
            d.read_object_into(&ALLOWED_CHILD_TAG_TABLE, &mut child)?;
            b.allowed_child_tags.push(child.build()?);
        }
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }

    pub(super) fn metadata(
        d: &mut Decoder<'_>,
        b: &mut TagHelperBuilder,
    ) -> Result<(), DecodeError> {
        b.metadata = d.read_metadata()?;
        Ok(())
    }
}

mod bound_attribute {
    use super::*;

    pub(super) fn name(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn type_name(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.type_name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn documentation(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.documentation = d.read_interned_opt()?;
        Ok(())
    }

    /// A non-null prefix makes the attribute dictionary-like; the flag
    /// must track the field.
    pub(super) fn indexer_name_prefix(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        if let Some(prefix) = d.read_interned_opt()? {
            b.indexer_name_prefix = Some(prefix);
            b.is_dictionary = true;
        }
        Ok(())
    }

    pub(super) fn indexer_type_name(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        if let Some(type_name) = d.read_interned_opt()? {
            b.indexer_type_name = Some(type_name);
            b.is_dictionary = true;
        }
        Ok(())
    }

    pub(super) fn is_enum(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.is_enum = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn is_editor_required(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.is_editor_required = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn parameters(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        d.rd.array_begin()?;
        while d.rd.array_more()? {
            let mut child = BoundAttributeParameterBuilder::default();
            d.read_object_into(&PARAMETER_TABLE, &mut child)?;
            b.parameters.push(child.build()?);
        }
        Ok(())
    }

    pub(super) fn metadata(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.metadata = d.read_metadata()?;
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }
}

mod parameter {
    use super::*;

    pub(super) fn name(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn type_name(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.type_name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn is_enum(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.is_enum = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn documentation(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.documentation = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn metadata(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.metadata = d.read_metadata()?;
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut BoundAttributeParameterBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }
}

mod matching_rule {
    use super::*;

    pub(super) fn tag_name(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        b.tag_name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn parent_tag(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        b.parent_tag = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn tag_structure(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        b.tag_structure = d.read_enum_code(TagStructure::from_code)?;
        Ok(())
    }

    pub(super) fn case_sensitive(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        b.case_sensitive = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn attributes(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        d.rd.array_begin()?;
        while d.rd.array_more()? {
            let mut child = RequiredAttributeBuilder::default();
            d.read_object_into(&REQUIRED_ATTRIBUTE_TABLE, &mut child)?;
            b.attributes.push(child.build()?);
        }
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut TagMatchingRuleBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }
}

mod required_attribute {
    use super::*;

    pub(super) fn name(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn name_comparison(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.name_comparison = d.read_enum_code(NameComparison::from_code)?;
        Ok(())
    }

    pub(super) fn value(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.value = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn value_comparison(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.value_comparison = d.read_enum_code(ValueComparison::from_code)?;
        Ok(())
    }

    pub(super) fn case_sensitive(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.case_sensitive = d.rd.read_bool()?;
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut RequiredAttributeBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }
}

mod allowed_child_tag {
    use super::*;

    pub(super) fn name(
        d: &mut Decoder<'_>,
        b: &mut AllowedChildTagBuilder,
    ) -> Result<(), DecodeError> {
        b.name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn display_name(
        d: &mut Decoder<'_>,
        b: &mut AllowedChildTagBuilder,
    ) -> Result<(), DecodeError> {
        b.display_name = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn diagnostics(
        d: &mut Decoder<'_>,
        b: &mut AllowedChildTagBuilder,
    ) -> Result<(), DecodeError> {
        b.diagnostics = d.read_diagnostics()?;
        Ok(())
    }
}

mod diagnostic {
    use super::*;

    pub(super) fn id(d: &mut Decoder<'_>, b: &mut DiagnosticBuilder) -> Result<(), DecodeError> {
        b.id = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn severity(
        d: &mut Decoder<'_>,
        b: &mut DiagnosticBuilder,
    ) -> Result<(), DecodeError> {
        b.severity = d.read_enum_code(Severity::from_code)?;
        Ok(())
    }

    pub(super) fn message(
        d: &mut Decoder<'_>,
        b: &mut DiagnosticBuilder,
    ) -> Result<(), DecodeError> {
        b.message = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn span(d: &mut Decoder<'_>, b: &mut DiagnosticBuilder) -> Result<(), DecodeError> {
        if d.rd.try_null()? {
            return Ok(());
        }
        let mut child = SourceSpanBuilder::default();
        d.read_object_into(&SOURCE_SPAN_TABLE, &mut child)?;
        b.span = Some(child.build());
        Ok(())
    }
}

mod source_span {
    use super::*;

    pub(super) fn file_path(
        d: &mut Decoder<'_>,
        b: &mut SourceSpanBuilder,
    ) -> Result<(), DecodeError> {
        b.file_path = d.read_interned_opt()?;
        Ok(())
    }

    pub(super) fn absolute_index(
        d: &mut Decoder<'_>,
        b: &mut SourceSpanBuilder,
    ) -> Result<(), DecodeError> {
        b.absolute_index = d.rd.read_u32()?;
        Ok(())
    }

    pub(super) fn line_index(
        d: &mut Decoder<'_>,
        b: &mut SourceSpanBuilder,
    ) -> Result<(), DecodeError> {
        b.line_index = d.rd.read_u32()?;
        Ok(())
    }

    pub(super) fn character_index(
        d: &mut Decoder<'_>,
        b: &mut SourceSpanBuilder,
    ) -> Result<(), DecodeError> {
        b.character_index = d.rd.read_u32()?;
        Ok(())
    }

    pub(super) fn length(
        d: &mut Decoder<'_>,
        b: &mut SourceSpanBuilder,
    ) -> Result<(), DecodeError> {
        b.length = d.rd.read_u32()?;
        Ok(())
    }
}

// Tables are sorted by property name; `PropertyTable::get` binary
// searches them.

static TAG_HELPER_TABLE: PropertyTable<TagHelperBuilder> = PropertyTable::new(&[
    ("AllowedChildTags", tag_helper::allowed_child_tags),
    ("AssemblyName", tag_helper::assembly_name),
    ("BoundAttributes", tag_helper::bound_attributes),
    ("CaseSensitive", tag_helper::case_sensitive),
    ("Diagnostics", tag_helper::diagnostics),
    ("Documentation", tag_helper::documentation),
    ("Metadata", tag_helper::metadata),
    ("Name", tag_helper::name),
    ("TagMatchingRules", tag_helper::tag_matching_rules),
    ("TagOutputHint", tag_helper::tag_output_hint),
]);

static BOUND_ATTRIBUTE_TABLE: PropertyTable<BoundAttributeBuilder> = PropertyTable::new(&[
    ("Diagnostics", bound_attribute::diagnostics),
    ("Documentation", bound_attribute::documentation),
    ("IndexerNamePrefix", bound_attribute::indexer_name_prefix),
    ("IndexerTypeName", bound_attribute::indexer_type_name),
    ("IsEditorRequired", bound_attribute::is_editor_required),
    ("IsEnum", bound_attribute::is_enum),
    ("Metadata", bound_attribute::metadata),
    ("Name", bound_attribute::name),
    ("Parameters", bound_attribute::parameters),
    ("TypeName", bound_attribute::type_name),
]);

static PARAMETER_TABLE: PropertyTable<BoundAttributeParameterBuilder> = PropertyTable::new(&[
    ("Diagnostics", parameter::diagnostics),
    ("Documentation", parameter::documentation),
    ("IsEnum", parameter::is_enum),
    ("Metadata", parameter::metadata),
    ("Name", parameter::name),
    ("TypeName", parameter::type_name),
]);

static TAG_MATCHING_RULE_TABLE: PropertyTable<TagMatchingRuleBuilder> = PropertyTable::new(&[
    ("Attributes", matching_rule::attributes),
    ("CaseSensitive", matching_rule::case_sensitive),
    ("Diagnostics", matching_rule::diagnostics),
    ("ParentTag", matching_rule::parent_tag),
    ("TagName", matching_rule::tag_name),
    ("TagStructure", matching_rule::tag_structure),
]);

static REQUIRED_ATTRIBUTE_TABLE: PropertyTable<RequiredAttributeBuilder> = PropertyTable::new(&[
    ("CaseSensitive", required_attribute::case_sensitive),
    ("Diagnostics", required_attribute::diagnostics),
    ("Name", required_attribute::name),
    ("NameComparison", required_attribute::name_comparison),
    ("Value", required_attribute::value),
    ("ValueComparison", required_attribute::value_comparison),
]);

static ALLOWED_CHILD_TAG_TABLE: PropertyTable<AllowedChildTagBuilder> = PropertyTable::new(&[
    ("Diagnostics", allowed_child_tag::diagnostics),
    ("DisplayName", allowed_child_tag::display_name),
    ("Name", allowed_child_tag::name),
]);

static DIAGNOSTIC_TABLE: PropertyTable<DiagnosticBuilder> = PropertyTable::new(&[
    ("Id", diagnostic::id),
    ("Message", diagnostic::message),
    ("Severity", diagnostic::severity),
    ("Span", diagnostic::span),
]);

static SOURCE_SPAN_TABLE: PropertyTable<SourceSpanBuilder> = PropertyTable::new(&[
    ("AbsoluteIndex", source_span::absolute_index),
    ("CharacterIndex", source_span::character_index),
    ("FilePath", source_span::file_path),
    ("Length", source_span::length),
    ("LineIndex", source_span::line_index),
]);
