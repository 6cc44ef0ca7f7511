//! Descriptor diagnostics.

use std::sync::Arc;

use crate::error::{required, BuildError};

/// Severity of a descriptor diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

impl Severity {
    /// Integer code used by the persisted cache format.
    pub fn code(self) -> u32 {
        match self {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }
}

/// Source location a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub file_path: Option<Arc<str>>,
    pub absolute_index: u32,
    pub line_index: u32,
    pub character_index: u32,
    pub length: u32,
}

/// Mutable staging type for [`SourceSpan`].
#[derive(Debug, Default)]
pub struct SourceSpanBuilder {
    pub file_path: Option<Arc<str>>,
    pub absolute_index: u32,
    pub line_index: u32,
    pub character_index: u32,
    pub length: u32,
}

impl SourceSpanBuilder {
    pub fn build(self) -> SourceSpan {
        SourceSpan {
            file_path: self.file_path,
            absolute_index: self.absolute_index,
            line_index: self.line_index,
            character_index: self.character_index,
            length: self.length,
        }
    }
}

/// A diagnostic attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: Arc<str>,
    pub severity: Severity,
    pub message: Arc<str>,
    pub span: Option<SourceSpan>,
}

/// Mutable staging type for [`Diagnostic`].
#[derive(Debug, Default)]
pub struct DiagnosticBuilder {
    pub id: Option<Arc<str>>,
    pub severity: Severity,
    pub message: Option<Arc<str>>,
    pub span: Option<SourceSpan>,
}

impl DiagnosticBuilder {
    pub fn build(self) -> Result<Diagnostic, BuildError> {
        Ok(Diagnostic {
            id: required(self.id, "id")?,
            severity: self.severity,
            message: required(self.message, "message")?,
            span: self.span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_codes_roundtrip() {
        for severity in [Severity::Warning, Severity::Error] {
            assert_eq!(Severity::from_code(severity.code()), Some(severity));
        }
        assert_eq!(Severity::from_code(0), None);
        assert_eq!(Severity::from_code(3), None);
    }

    #[test]
    fn diagnostic_requires_id_and_message() {
        let builder = DiagnosticBuilder {
            message: Some(Arc::from("unexpected tag")),
            ..Default::default()
        };
        assert_eq!(builder.build(), Err(BuildError::MissingField("id")));

        let builder = DiagnosticBuilder {
            id: Some(Arc::from("TH001")),
            ..Default::default()
        };
        assert_eq!(builder.build(), Err(BuildError::MissingField("message")));
    }

    #[test]
    fn diagnostic_builds_with_defaults() {
        let builder = DiagnosticBuilder {
            id: Some(Arc::from("TH001")),
            message: Some(Arc::from("unexpected tag")),
            ..Default::default()
        };
        let diagnostic = builder.build().unwrap();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.span.is_none());
    }
}
