//! Resolution-independent calendar document.
//!
//! # Responsibility
//! - Define the semantic records a scene is projected into for persistence.
//! - Validate persisted values that cannot be clamped into shape.
//!
//! # Invariants
//! - Records carry day and row units only, never pixels.
//! - Colors are `#rgb`, `#rrggbb` or an alphabetic CSS color name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::form_urlencoded;
use uuid::Uuid;

/// Schema version written by this crate.
pub const DOCUMENT_VERSION: u32 = 3;

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$").expect("valid color regex")
});

/// Labelled time range placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonEntry {
    pub title: String,
    /// Day slot in `[0, 365)`.
    pub start_day: i64,
    /// Length in days, `[0, 365]`.
    pub duration_days: i64,
    pub row_index: i64,
    pub color: String,
}

/// Free text annotation placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEntry {
    pub text: String,
    pub start_day: i64,
    pub width_days: i64,
    pub height_rows: i64,
    pub row_index: i64,
    pub color: String,
}

/// Point-in-time projection of a scene.
///
/// Serialized field names follow the version 3 wire schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDocument {
    pub version: u32,
    pub name: String,
    /// Opaque calendar identifier threaded through from the host page.
    pub id: String,
    #[serde(rename = "seasonbars", default)]
    pub season_entries: Vec<SeasonEntry>,
    #[serde(rename = "textboxes", default)]
    pub text_entries: Vec<TextEntry>,
}

impl CalendarDocument {
    /// Creates an empty document tagged with the current schema version.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            name: name.into(),
            id: id.into(),
            season_entries: Vec::new(),
            text_entries: Vec::new(),
        }
    }

    /// Rejects values that clamping cannot repair.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        for entry in &self.season_entries {
            validate_color(&entry.color)?;
        }
        for entry in &self.text_entries {
            validate_color(&entry.color)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.season_entries.is_empty() && self.text_entries.is_empty()
    }
}

/// Document-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    InvalidColor(String),
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor(color) => write!(f, "invalid color value `{color}`"),
        }
    }
}

impl Error for DocumentValidationError {}

/// Checks one color string against the accepted notations.
pub fn validate_color(color: &str) -> Result<(), DocumentValidationError> {
    if COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(DocumentValidationError::InvalidColor(color.to_string()))
    }
}

/// Extracts the `id` parameter from a page query string.
///
/// Accepts input with or without the leading `?`. Values are form-decoded,
/// so `+` and `%20` both yield a space. Empty values count as missing.
pub fn calendar_id_from_query(query: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Generates an identifier for a calendar opened without one.
pub fn fresh_calendar_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{calendar_id_from_query, validate_color, CalendarDocument, SeasonEntry};

    #[test]
    fn calendar_id_is_read_from_query() {
        assert_eq!(
            calendar_id_from_query("?name=x&id=abc-123"),
            Some("abc-123".to_string())
        );
        assert_eq!(calendar_id_from_query("id=a+b"), Some("a b".to_string()));
        assert_eq!(calendar_id_from_query("?id=a%20b"), Some("a b".to_string()));
        assert_eq!(
            calendar_id_from_query("?id=caf%C3%A9%2F2026"),
            Some("café/2026".to_string())
        );
        assert_eq!(calendar_id_from_query("?id="), None);
        assert_eq!(calendar_id_from_query(""), None);
    }

    #[test]
    fn colors_accept_hex_and_names() {
        assert!(validate_color("#fff").is_ok());
        assert!(validate_color("#3a7bd5").is_ok());
        assert!(validate_color("tomato").is_ok());
        assert!(validate_color("#12345").is_err());
        assert!(validate_color("rgb(1,2,3)").is_err());
    }

    #[test]
    fn validate_reports_first_bad_color() {
        let mut document = CalendarDocument::new("demo", "id-1");
        document.season_entries.push(SeasonEntry {
            title: "Harvest".to_string(),
            start_day: 10,
            duration_days: 5,
            row_index: 0,
            color: "not a color".to_string(),
        });
        let err = document.validate().unwrap_err();
        assert!(err.to_string().contains("not a color"));
    }
}
