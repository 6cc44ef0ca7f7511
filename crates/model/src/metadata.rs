//! Descriptor metadata mapping.

use std::sync::Arc;

use indexmap::IndexMap;

/// Key/value metadata attached to descriptors.
///
/// Insertion order is preserved. Inserting a duplicate key overwrites the
/// earlier value and keeps the key's original position; this is the merge
/// policy for metadata produced in several passes.
pub type MetadataMap = IndexMap<Arc<str>, Option<Arc<str>>>;
