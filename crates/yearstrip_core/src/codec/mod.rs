//! Calendar document codec.
//!
//! # Responsibility
//! - Project a live scene into a `CalendarDocument` and back (`projection`).
//! - Encode documents as the current JSON schema and decode every
//!   historical schema version (`json`, `legacy`).
//!
//! # Invariants
//! - Exported documents do not depend on scroll offset or viewport width.
//! - Decoding fails as a whole; a malformed document never half-loads.

use crate::model::document::DocumentValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json;
mod legacy;
mod projection;

pub use json::{decode_document, encode_document, encode_document_pretty};
pub use legacy::V1_SEASON_DAYS;
pub use projection::{
    export_scene, import_document, place_season_entry, place_text_entry, ImportSummary,
};

pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from document encoding and decoding.
#[derive(Debug)]
pub enum CodecError {
    /// Input is not valid JSON or does not match the schema of its version.
    Json(serde_json::Error),
    /// The `version` tag is absent or not an unsigned integer.
    MissingVersion,
    /// The `version` tag names a schema this crate does not know.
    UnsupportedVersion(u64),
    /// A field required by the tagged version is absent.
    MissingField {
        version: u32,
        field: &'static str,
    },
    /// Decoded values failed document validation.
    Invalid(DocumentValidationError),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed calendar document: {err}"),
            Self::MissingVersion => write!(f, "calendar document has no integer `version`"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported calendar document version {version}")
            }
            Self::MissingField { version, field } => {
                write!(f, "version {version} document is missing `{field}`")
            }
            Self::Invalid(err) => write!(f, "invalid calendar document: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::MissingVersion | Self::UnsupportedVersion(_) | Self::MissingField { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DocumentValidationError> for CodecError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Invalid(value)
    }
}
