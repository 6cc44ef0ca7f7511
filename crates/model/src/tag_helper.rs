//! Top-level tag helper descriptor.

use std::sync::Arc;

use crate::bound_attribute::BoundAttributeDescriptor;
use crate::diagnostic::Diagnostic;
use crate::error::{required, BuildError};
use crate::matching_rule::TagMatchingRule;
use crate::metadata::MetadataMap;

/// A child tag name permitted inside a matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedChildTag {
    pub name: Arc<str>,
    pub display_name: Option<Arc<str>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable staging type for [`AllowedChildTag`].
#[derive(Debug, Default)]
pub struct AllowedChildTagBuilder {
    pub name: Option<Arc<str>>,
    pub display_name: Option<Arc<str>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AllowedChildTagBuilder {
    pub fn build(self) -> Result<AllowedChildTag, BuildError> {
        Ok(AllowedChildTag {
            name: required(self.name, "name")?,
            display_name: self.display_name,
            diagnostics: self.diagnostics,
        })
    }
}

/// A custom markup element/attribute recognized by the templated-markup
/// compiler, with everything needed to match and bind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHelperDescriptor {
    pub name: Arc<str>,
    pub assembly_name: Arc<str>,
    pub documentation: Option<Arc<str>>,
    pub tag_output_hint: Option<Arc<str>>,
    pub case_sensitive: bool,
    pub tag_matching_rules: Vec<TagMatchingRule>,
    pub bound_attributes: Vec<BoundAttributeDescriptor>,
    pub allowed_child_tags: Vec<AllowedChildTag>,
    pub diagnostics: Vec<Diagnostic>,
    pub metadata: MetadataMap,
}

/// Mutable staging type for [`TagHelperDescriptor`].
#[derive(Debug, Default)]
pub struct TagHelperBuilder {
    pub name: Option<Arc<str>>,
    pub assembly_name: Option<Arc<str>>,
    pub documentation: Option<Arc<str>>,
    pub tag_output_hint: Option<Arc<str>>,
    pub case_sensitive: bool,
    pub tag_matching_rules: Vec<TagMatchingRule>,
    pub bound_attributes: Vec<BoundAttributeDescriptor>,
    pub allowed_child_tags: Vec<AllowedChildTag>,
    pub diagnostics: Vec<Diagnostic>,
    pub metadata: MetadataMap,
}

impl TagHelperBuilder {
    pub fn build(self) -> Result<TagHelperDescriptor, BuildError> {
        Ok(TagHelperDescriptor {
            name: required(self.name, "name")?,
            assembly_name: required(self.assembly_name, "assembly_name")?,
            documentation: self.documentation,
            tag_output_hint: self.tag_output_hint,
            case_sensitive: self.case_sensitive,
            tag_matching_rules: self.tag_matching_rules,
            bound_attributes: self.bound_attributes,
            allowed_child_tags: self.allowed_child_tags,
            diagnostics: self.diagnostics,
            metadata: self.metadata,
        })
    }
}
