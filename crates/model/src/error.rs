//! Builder finalization errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Unwraps a required builder field, naming it in the error.
pub(crate) fn required<T>(field: Option<T>, name: &'static str) -> Result<T, BuildError> {
    field.ok_or(BuildError::MissingField(name))
}
