//! JSON encoding and version dispatch.

use super::legacy::{ElementsDocument, ElementsRevision};
use super::{CodecError, CodecResult};
use crate::model::document::{CalendarDocument, DOCUMENT_VERSION};
use log::{debug, warn};
use serde_json::Value;

/// Encodes a document with the current schema version.
pub fn encode_document(document: &CalendarDocument) -> CodecResult<String> {
    Ok(serde_json::to_string(&current(document))?)
}

/// Same as [`encode_document`] with indentation, for files meant to be read.
pub fn encode_document_pretty(document: &CalendarDocument) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(&current(document))?)
}

/// Decodes any known schema version into the canonical document.
///
/// # Errors
/// - `Json` for malformed JSON or values not matching the tagged schema.
/// - `MissingVersion` / `UnsupportedVersion` for a bad `version` tag.
/// - `Invalid` when decoded values fail validation.
pub fn decode_document(json: &str) -> CodecResult<CalendarDocument> {
    let value: Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(CodecError::MissingVersion)?;

    let mut document = match version {
        1 => serde_json::from_value::<ElementsDocument>(value)?
            .into_canonical(ElementsRevision::FixedBars)?,
        2 => serde_json::from_value::<ElementsDocument>(value)?
            .into_canonical(ElementsRevision::ResizableBars)?,
        3 => serde_json::from_value::<CalendarDocument>(value)?,
        other => {
            warn!(
                "event=document_decode module=codec status=error error_code=unsupported_version version={}",
                other
            );
            return Err(CodecError::UnsupportedVersion(other));
        }
    };
    document.version = DOCUMENT_VERSION;
    document.validate()?;

    debug!(
        "event=document_decode module=codec status=ok source_version={} seasons={} texts={}",
        version,
        document.season_entries.len(),
        document.text_entries.len()
    );
    Ok(document)
}

fn current(document: &CalendarDocument) -> CalendarDocument {
    let mut document = document.clone();
    document.version = DOCUMENT_VERSION;
    document
}

#[cfg(test)]
mod tests {
    use super::{decode_document, encode_document};
    use crate::codec::CodecError;
    use crate::model::document::{CalendarDocument, SeasonEntry};

    #[test]
    fn encode_writes_version_three_field_names() {
        let mut document = CalendarDocument::new("Garden", "cal-1");
        document.version = 1;
        document.season_entries.push(SeasonEntry {
            title: "Sowing".to_string(),
            start_day: 60,
            duration_days: 21,
            row_index: 2,
            color: "#00aa00".to_string(),
        });

        let json: serde_json::Value =
            serde_json::from_str(&encode_document(&document).unwrap()).unwrap();
        assert_eq!(json["version"], 3);
        assert_eq!(json["seasonbars"][0]["startDay"], 60);
        assert_eq!(json["seasonbars"][0]["durationDays"], 21);
        assert_eq!(json["seasonbars"][0]["rowIndex"], 2);
        assert_eq!(json["textboxes"], serde_json::json!([]));
    }

    #[test]
    fn non_integer_version_is_missing() {
        let err = decode_document(r#"{"version":"3","name":"","id":""}"#).unwrap_err();
        assert!(matches!(err, CodecError::MissingVersion));
    }
}
