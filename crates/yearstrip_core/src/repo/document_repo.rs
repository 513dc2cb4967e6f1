//! Calendar document store contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the single write endpoint the editor saves through.
//! - Persist the encoded JSON body keyed by calendar id.
//!
//! # Invariants
//! - Stored bodies are always the current schema version.
//! - Saving the same calendar id again replaces the previous body.

use crate::codec::{decode_document, encode_document, CodecError};
use crate::db::DbError;
use crate::model::document::{CalendarDocument, DOCUMENT_VERSION};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document persistence.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Codec(CodecError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid calendar document: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Write endpoint for serialized calendars.
///
/// One call per save. Implementations do not retry.
pub trait DocumentSink {
    fn save_document(&self, document: &CalendarDocument) -> StoreResult<()>;
}

/// Listing row for stored calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocumentInfo {
    pub calendar_id: String,
    pub name: String,
    /// Unix epoch milliseconds of the latest save.
    pub saved_at: i64,
    pub save_count: i64,
}

/// SQLite-backed document store.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Reads back one calendar by id.
    ///
    /// Stored bodies go through the regular decoder, so a corrupted row
    /// surfaces as `StoreError::Codec`.
    pub fn get_document(&self, calendar_id: &str) -> StoreResult<Option<CalendarDocument>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM calendar_documents WHERE calendar_id = ?1;",
                [calendar_id],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| decode_document(&body).map_err(StoreError::from))
            .transpose()
    }

    /// Lists stored calendars, most recently saved first.
    pub fn list_documents(&self) -> StoreResult<Vec<StoredDocumentInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT calendar_id, name, saved_at, save_count
             FROM calendar_documents
             ORDER BY saved_at DESC, calendar_id ASC;",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredDocumentInfo {
                calendar_id: row.get("calendar_id")?,
                name: row.get("name")?,
                saved_at: row.get("saved_at")?,
                save_count: row.get("save_count")?,
            })
        })?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }
        Ok(documents)
    }
}

impl DocumentSink for SqliteDocumentStore<'_> {
    fn save_document(&self, document: &CalendarDocument) -> StoreResult<()> {
        if document.id.trim().is_empty() {
            return Err(StoreError::InvalidData(
                "calendar id must not be empty".to_string(),
            ));
        }
        document
            .validate()
            .map_err(|err| StoreError::Codec(err.into()))?;
        let body = encode_document(document)?;

        self.conn.execute(
            "INSERT INTO calendar_documents (calendar_id, name, schema_version, body)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(calendar_id) DO UPDATE SET
                name = excluded.name,
                schema_version = excluded.schema_version,
                body = excluded.body,
                saved_at = (strftime('%s', 'now') * 1000),
                save_count = save_count + 1;",
            params![
                document.id.as_str(),
                document.name.as_str(),
                DOCUMENT_VERSION,
                body,
            ],
        )?;
        Ok(())
    }
}
