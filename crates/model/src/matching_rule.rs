//! Tag matching rules and required attributes.

use std::sync::Arc;

use crate::diagnostic::Diagnostic;
use crate::error::{required, BuildError};

/// How the start/end tag pair of a matched element is expected to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagStructure {
    #[default]
    Unspecified,
    NormalOrSelfClosing,
    WithoutEndTag,
}

impl TagStructure {
    pub fn code(self) -> u32 {
        match self {
            TagStructure::Unspecified => 0,
            TagStructure::NormalOrSelfClosing => 1,
            TagStructure::WithoutEndTag => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(TagStructure::Unspecified),
            1 => Some(TagStructure::NormalOrSelfClosing),
            2 => Some(TagStructure::WithoutEndTag),
            _ => None,
        }
    }
}

/// Comparison mode for a required attribute's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameComparison {
    #[default]
    FullMatch,
    PrefixMatch,
}

impl NameComparison {
    pub fn code(self) -> u32 {
        match self {
            NameComparison::FullMatch => 0,
            NameComparison::PrefixMatch => 1,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(NameComparison::FullMatch),
            1 => Some(NameComparison::PrefixMatch),
            _ => None,
        }
    }
}

/// Comparison mode for a required attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueComparison {
    #[default]
    None,
    FullMatch,
    PrefixMatch,
    SuffixMatch,
}

impl ValueComparison {
    pub fn code(self) -> u32 {
        match self {
            ValueComparison::None => 0,
            ValueComparison::FullMatch => 1,
            ValueComparison::PrefixMatch => 2,
            ValueComparison::SuffixMatch => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ValueComparison::None),
            1 => Some(ValueComparison::FullMatch),
            2 => Some(ValueComparison::PrefixMatch),
            3 => Some(ValueComparison::SuffixMatch),
            _ => None,
        }
    }
}

/// An attribute that must be present on a tag for a rule to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredAttributeDescriptor {
    pub name: Arc<str>,
    pub name_comparison: NameComparison,
    pub value: Option<Arc<str>>,
    pub value_comparison: ValueComparison,
    pub case_sensitive: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable staging type for [`RequiredAttributeDescriptor`].
#[derive(Debug, Default)]
pub struct RequiredAttributeBuilder {
    pub name: Option<Arc<str>>,
    pub name_comparison: NameComparison,
    pub value: Option<Arc<str>>,
    pub value_comparison: ValueComparison,
    pub case_sensitive: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl RequiredAttributeBuilder {
    pub fn build(self) -> Result<RequiredAttributeDescriptor, BuildError> {
        Ok(RequiredAttributeDescriptor {
            name: required(self.name, "name")?,
            name_comparison: self.name_comparison,
            value: self.value,
            value_comparison: self.value_comparison,
            case_sensitive: self.case_sensitive,
            diagnostics: self.diagnostics,
        })
    }
}

/// One way a tag helper can match a markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatchingRule {
    pub tag_name: Arc<str>,
    pub parent_tag: Option<Arc<str>>,
    pub tag_structure: TagStructure,
    pub case_sensitive: bool,
    pub attributes: Vec<RequiredAttributeDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable staging type for [`TagMatchingRule`].
#[derive(Debug, Default)]
pub struct TagMatchingRuleBuilder {
    pub tag_name: Option<Arc<str>>,
    pub parent_tag: Option<Arc<str>>,
    pub tag_structure: TagStructure,
    pub case_sensitive: bool,
    pub attributes: Vec<RequiredAttributeDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TagMatchingRuleBuilder {
    pub fn build(self) -> Result<TagMatchingRule, BuildError> {
        Ok(TagMatchingRule {
            tag_name: required(self.tag_name, "tag_name")?,
            parent_tag: self.parent_tag,
            tag_structure: self.tag_structure,
            case_sensitive: self.case_sensitive,
            attributes: self.attributes,
            diagnostics: self.diagnostics,
        })
    }
}
