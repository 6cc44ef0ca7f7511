//! Decode error type.

use tagmeta_model::BuildError;
use thiserror::Error;

/// Error raised while decoding a descriptor stream.
///
/// Any variant aborts the whole top-level decode; no partial descriptor
/// is handed back. Unknown property names are not an error and never
/// reach this type. Positions are byte offsets into the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("unexpected character at byte {0}")]
    UnexpectedChar(usize),
    #[error("expected string at byte {0}")]
    ExpectedString(usize),
    #[error("expected boolean at byte {0}")]
    ExpectedBool(usize),
    #[error("expected number at byte {0}")]
    ExpectedNumber(usize),
    #[error("number out of range at byte {0}")]
    NumberOutOfRange(usize),
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("invalid enum code {0}")]
    InvalidEnumCode(u32),
    #[error("trailing bytes at byte {0}")]
    TrailingBytes(usize),
    #[error("incomplete descriptor: {0}")]
    Build(#[from] BuildError),
}
