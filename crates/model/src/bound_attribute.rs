//! Bound attributes and their parameters.

use std::sync::Arc;

use crate::diagnostic::Diagnostic;
use crate::error::{required, BuildError};
use crate::metadata::MetadataMap;

/// One attribute a tag helper can bind, with its backing type and
/// optional dictionary (indexer) semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttributeDescriptor {
    pub name: Arc<str>,
    pub type_name: Arc<str>,
    pub documentation: Option<Arc<str>>,
    pub indexer_name_prefix: Option<Arc<str>>,
    pub indexer_type_name: Option<Arc<str>>,
    /// True when the attribute binds dictionary-like through an indexer.
    /// Always equal to "an indexer name prefix or indexer type name is
    /// present"; never set independently.
    pub is_dictionary: bool,
    pub is_enum: bool,
    pub is_editor_required: bool,
    pub parameters: Vec<BoundAttributeParameterDescriptor>,
    pub metadata: MetadataMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable staging type for [`BoundAttributeDescriptor`].
#[derive(Debug, Default)]
pub struct BoundAttributeBuilder {
    pub name: Option<Arc<str>>,
    pub type_name: Option<Arc<str>>,
    pub documentation: Option<Arc<str>>,
    pub indexer_name_prefix: Option<Arc<str>>,
    pub indexer_type_name: Option<Arc<str>>,
    pub is_dictionary: bool,
    pub is_enum: bool,
    pub is_editor_required: bool,
    pub parameters: Vec<BoundAttributeParameterDescriptor>,
    pub metadata: MetadataMap,
    pub diagnostics: Vec<Diagnostic>,
}

impl BoundAttributeBuilder {
    pub fn build(self) -> Result<BoundAttributeDescriptor, BuildError> {
        // The flag is re-derived so it cannot drift from the indexer
        // fields regardless of the order they were populated in.
        let is_dictionary = self.is_dictionary
            || self.indexer_name_prefix.is_some()
            || self.indexer_type_name.is_some();
        Ok(BoundAttributeDescriptor {
            name: required(self.name, "name")?,
            type_name: required(self.type_name, "type_name")?,
            documentation: self.documentation,
            indexer_name_prefix: self.indexer_name_prefix,
            indexer_type_name: self.indexer_type_name,
            is_dictionary,
            is_enum: self.is_enum,
            is_editor_required: self.is_editor_required,
            parameters: self.parameters,
            metadata: self.metadata,
            diagnostics: self.diagnostics,
        })
    }
}

/// A parameter of a bound attribute (e.g. a modifier segment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttributeParameterDescriptor {
    pub name: Arc<str>,
    pub type_name: Option<Arc<str>>,
    pub is_enum: bool,
    pub documentation: Option<Arc<str>>,
    pub metadata: MetadataMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable staging type for [`BoundAttributeParameterDescriptor`].
#[derive(Debug, Default)]
pub struct BoundAttributeParameterBuilder {
    pub name: Option<Arc<str>>,
    pub type_name: Option<Arc<str>>,
    pub is_enum: bool,
    pub documentation: Option<Arc<str>>,
    pub metadata: MetadataMap,
    pub diagnostics: Vec<Diagnostic>,
}

impl BoundAttributeParameterBuilder {
    pub fn build(self) -> Result<BoundAttributeParameterDescriptor, BuildError> {
        Ok(BoundAttributeParameterDescriptor {
            name: required(self.name, "name")?,
            type_name: self.type_name,
            is_enum: self.is_enum,
            documentation: self.documentation,
            metadata: self.metadata,
            diagnostics: self.diagnostics,
        })
    }
}
