//! Document repository: reads and writes the `documents` table.

use rusqlite::{params, Row};
use serde::Serialize;

use super::{Database, DatabaseError};
use crate::categorizer::Category;

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub id: i64,
    pub filename: String,
    pub extracted_text: String,
    pub category: String,
}

impl DocumentRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            filename: text_column(row, "filename")?,
            extracted_text: text_column(row, "extracted_text")?,
            category: text_column(row, "category")?,
        })
    }
}

/// Dashboard projection: everything except the text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub id: i64,
    pub filename: String,
    pub category: String,
}

impl DocumentSummary {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            filename: text_column(row, "filename")?,
            category: text_column(row, "category")?,
        })
    }
}

/// Values for a row that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub extracted_text: String,
    pub category: Category,
}

// Columns are nullable in the schema; NULL reads back as empty text.
fn text_column(row: &Row<'_>, name: &str) -> Result<String, rusqlite::Error> {
    Ok(row.get::<_, Option<String>>(name)?.unwrap_or_default())
}

/// Inserts a document and returns its new id.
pub fn insert(db: &Database, doc: &NewDocument) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO documents (filename, extracted_text, category) VALUES (?1, ?2, ?3)",
            params![doc.filename, doc.extracted_text, doc.category.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn find_by_id(db: &Database, id: i64) -> Result<Option<DocumentRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, filename, extracted_text, category FROM documents WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], DocumentRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// All documents in insertion order.
pub fn list_summaries(db: &Database) -> Result<Vec<DocumentSummary>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, filename, category FROM documents ORDER BY id")?;
        let rows = stmt
            .query_map([], DocumentSummary::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

pub fn count(db: &Database) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))?;
        Ok(count)
    })
}
