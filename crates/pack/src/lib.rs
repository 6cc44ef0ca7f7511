//! Descriptor cache codec for tag helper metadata.
//!
//! Persisted descriptor caches are property-tagged JSON: objects whose
//! property names select, per descriptor kind, a reader function from an
//! immutable dispatch table. Unknown names are skipped, so caches written
//! by older producers keep decoding; malformed tokens abort the whole
//! decode and the caller falls back to recomputing from source. Strings
//! that recur across descriptors are interned through a caller-owned
//! [`StringCache`].

pub mod decode;
pub mod encode;
pub mod error;
pub mod intern;
pub mod reader;
pub mod table;

pub use decode::{decode_tag_helper, decode_tag_helper_set, Decoder};
pub use encode::Encoder;
pub use error::DecodeError;
pub use intern::StringCache;
pub use reader::TokenReader;
pub use table::{FieldReader, PropertyTable};
