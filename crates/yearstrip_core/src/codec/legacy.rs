//! Decoders for the flat `elements` schemas (versions 1 and 2).
//!
//! Both versions store one mixed list tagged by `type`. Version 2 added a
//! `duration` to season bars once bars became resizable; version 1 bars
//! always spanned a fixed length.

use super::{CodecError, CodecResult};
use crate::model::document::{CalendarDocument, SeasonEntry, TextEntry};
use serde::Deserialize;

/// Length of every version 1 season bar.
pub const V1_SEASON_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub(super) struct ElementsDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    id: String,
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Seasonbar {
        text: String,
        start: i64,
        row: i64,
        color: String,
        #[serde(default)]
        duration: Option<i64>,
    },
    Textbox {
        text: String,
        start: i64,
        row: i64,
        color: String,
        width: i64,
        height: i64,
    },
}

/// Which flat-list revision a document was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ElementsRevision {
    FixedBars,
    ResizableBars,
}

impl ElementsRevision {
    fn version(self) -> u32 {
        match self {
            Self::FixedBars => 1,
            Self::ResizableBars => 2,
        }
    }
}

impl ElementsDocument {
    /// Splits the flat list into canonical season and text entries.
    ///
    /// Version 1 ignores any stray `duration`; version 2 requires it.
    pub(super) fn into_canonical(
        self,
        revision: ElementsRevision,
    ) -> CodecResult<CalendarDocument> {
        let mut document = CalendarDocument::new(self.name, self.id);

        for element in self.elements {
            match element {
                Element::Seasonbar {
                    text,
                    start,
                    row,
                    color,
                    duration,
                } => {
                    let duration_days = match revision {
                        ElementsRevision::FixedBars => V1_SEASON_DAYS,
                        ElementsRevision::ResizableBars => {
                            duration.ok_or(CodecError::MissingField {
                                version: revision.version(),
                                field: "duration",
                            })?
                        }
                    };
                    document.season_entries.push(SeasonEntry {
                        title: text,
                        start_day: start,
                        duration_days,
                        row_index: row,
                        color,
                    });
                }
                Element::Textbox {
                    text,
                    start,
                    row,
                    color,
                    width,
                    height,
                } => document.text_entries.push(TextEntry {
                    text,
                    start_day: start,
                    width_days: width,
                    height_rows: height,
                    row_index: row,
                    color,
                }),
            }
        }

        Ok(document)
    }
}
