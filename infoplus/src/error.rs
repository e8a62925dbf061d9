//! Parse error types.
//!
//! Every failure is reported as a single `ParseError`. Errors raised while
//! reading a field carry the [`FieldPath`] of that field, so a broken feed can
//! be diagnosed without re-parsing it.

use std::fmt;

use crate::document::FieldPath;
use crate::domain::OverlayError;

/// Errors produced while turning a document buffer into a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The buffer is not a well-formed document
    #[error("failed to decode document: {message}")]
    DocumentDecode {
        message: String,
        #[source]
        source: Option<xml::reader::Error>,
    },

    /// The administrative envelope is missing or malformed
    #[error("invalid envelope at {path}: {reason}")]
    EnvelopeInvalid { path: FieldPath, reason: String },

    /// A planned/current sequence breaks the overlay rules
    #[error("malformed overlay at {path}: {source}")]
    MalformedOverlay {
        path: FieldPath,
        #[source]
        source: OverlayError,
    },

    /// A leaf value could not be coerced to its declared type
    #[error("type mismatch at {path}: expected {expected}, found {found:?}")]
    FieldTypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: String,
    },

    /// A required element or attribute is absent
    #[error("missing required field {path}")]
    MissingField { path: FieldPath },

    /// The document does not belong to the declared message family
    #[error("schema mismatch at {path}: expected {expected}, found {found}")]
    SchemaMismatch {
        path: FieldPath,
        expected: String,
        found: String,
    },
}

/// Category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DocumentDecodeFailed,
    EnvelopeInvalid,
    MalformedOverlay,
    FieldTypeMismatch,
    MissingField,
    SchemaMismatch,
}

impl ErrorKind {
    /// Returns the stable identifier of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DocumentDecodeFailed => "DOCUMENT_DECODE_FAILED",
            ErrorKind::EnvelopeInvalid => "ENVELOPE_INVALID",
            ErrorKind::MalformedOverlay => "MALFORMED_OVERLAY",
            ErrorKind::FieldTypeMismatch => "FIELD_TYPE_MISMATCH",
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParseError {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        ParseError::DocumentDecode {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn xml(source: xml::reader::Error) -> Self {
        ParseError::DocumentDecode {
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub(crate) fn missing(path: FieldPath) -> Self {
        ParseError::MissingField { path }
    }

    pub(crate) fn mismatch(path: FieldPath, expected: &'static str, found: &str) -> Self {
        ParseError::FieldTypeMismatch {
            path,
            expected,
            found: found.to_string(),
        }
    }

    pub(crate) fn overlay(path: FieldPath, source: OverlayError) -> Self {
        ParseError::MalformedOverlay { path, source }
    }

    pub(crate) fn schema(
        path: FieldPath,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ParseError::SchemaMismatch {
            path,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Re-files a field-level failure inside the envelope as `EnvelopeInvalid`.
    pub(crate) fn into_envelope(self) -> Self {
        match self {
            ParseError::MissingField { path } => ParseError::EnvelopeInvalid {
                path,
                reason: "required field is missing".to_string(),
            },
            ParseError::FieldTypeMismatch {
                path,
                expected,
                found,
            } => ParseError::EnvelopeInvalid {
                path,
                reason: format!("expected {expected}, found {found:?}"),
            },
            other => other,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::DocumentDecode { .. } => ErrorKind::DocumentDecodeFailed,
            ParseError::EnvelopeInvalid { .. } => ErrorKind::EnvelopeInvalid,
            ParseError::MalformedOverlay { .. } => ErrorKind::MalformedOverlay,
            ParseError::FieldTypeMismatch { .. } => ErrorKind::FieldTypeMismatch,
            ParseError::MissingField { .. } => ErrorKind::MissingField,
            ParseError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
        }
    }

    /// Returns the path of the offending field, if the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ParseError::DocumentDecode { .. } => None,
            ParseError::EnvelopeInvalid { path, .. }
            | ParseError::MalformedOverlay { path, .. }
            | ParseError::FieldTypeMismatch { path, .. }
            | ParseError::MissingField { path }
            | ParseError::SchemaMismatch { path, .. } => Some(path),
        }
    }
}
