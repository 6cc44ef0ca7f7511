//! Tag helper descriptor model.
//!
//! Immutable descriptor values with mutable builder counterparts. Builders
//! are populated field-by-field (typically by a codec) and converted to
//! their immutable form with `build`; they are not reused afterwards.
//! String fields are `Arc<str>` so a decoding session can share one
//! storage instance between equal strings.

mod bound_attribute;
mod diagnostic;
mod error;
mod matching_rule;
mod metadata;
mod tag_helper;

pub use bound_attribute::{
    BoundAttributeBuilder, BoundAttributeDescriptor, BoundAttributeParameterBuilder,
    BoundAttributeParameterDescriptor,
};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Severity, SourceSpan, SourceSpanBuilder};
pub use error::BuildError;
pub use matching_rule::{
    NameComparison, RequiredAttributeBuilder, RequiredAttributeDescriptor, TagMatchingRule,
    TagMatchingRuleBuilder, TagStructure, ValueComparison,
};
pub use metadata::MetadataMap;
pub use tag_helper::{
    AllowedChildTag, AllowedChildTagBuilder, TagHelperBuilder, TagHelperDescriptor,
};
