//! Property dispatch tables.
//!
//! Each descriptor kind owns one immutable table mapping wire property
//! names to reader functions. Tables are plain `static` slices built at
//! compile time; no runtime type inspection is involved. A name that is
//! not in the table is not an error: the caller skips the value, which
//! is what keeps old persisted caches with stale fields decodable.

use crate::decode::Decoder;
use crate::error::DecodeError;

/// Reader for one property: consumes exactly one value from the stream
/// and applies it to the in-progress builder.
pub type FieldReader<B> = fn(&mut Decoder<'_>, &mut B) -> Result<(), DecodeError>;

/// Immutable name-to-reader mapping for one descriptor kind.
///
/// Entries must be sorted by name; lookup is a binary search, so the
/// stream may present properties in any order.
pub struct PropertyTable<B: 'static> {
    entries: &'static [(&'static str, FieldReader<B>)],
}

impl<B: 'static> PropertyTable<B> {
    pub const fn new(entries: &'static [(&'static str, FieldReader<B>)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<FieldReader<B>> {
        self.entries
            .binary_search_by_key(&name, |&(entry_name, _)| entry_name)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// True when entries are strictly sorted by name. Checked by tests;
    /// `get` relies on it.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].0 < pair[1].0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
