//! SQLite-backed analysis history.
//!
//! Every completed analysis is recorded with its mode, model, the names of
//! the headers that were redacted (names only — never values), whether a
//! body was truncated, and the model's reply. The [`export`] submodule
//! provides JSON and CSV export.

pub mod export;

use rusqlite::Connection;

use crate::error::Result;

/// A single analysis record stored in the `analyses` table.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    /// Auto-incremented row ID (`None` for new records before insert).
    pub id: Option<i64>,
    /// UUID identifying the analyzed exchange.
    pub exchange_id: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Analysis mode label (e.g., `"Vulnerability Scan"`).
    pub mode: String,
    /// Model label used (e.g., `"claude"`).
    pub model: String,
    /// Comma-separated redacted header names from both messages.
    pub redacted_headers: String,
    /// Whether either body was truncated.
    pub truncated: bool,
    /// The model's reply text.
    pub result: String,
}

/// Initialize the database and create the analyses table if it doesn't exist.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS analyses (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            exchange_id      TEXT NOT NULL,
            timestamp        TEXT NOT NULL,
            mode             TEXT NOT NULL,
            model            TEXT NOT NULL,
            redacted_headers TEXT NOT NULL,
            truncated        INTEGER NOT NULL,
            result           TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_analyses_timestamp ON analyses(timestamp);",
    )?;
    Ok(())
}

/// Insert an analysis record.
pub fn insert_record(conn: &Connection, record: &AnalysisRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO analyses (exchange_id, timestamp, mode, model, redacted_headers, truncated, result)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            record.exchange_id,
            record.timestamp,
            record.mode,
            record.model,
            record.redacted_headers,
            record.truncated as i64,
            record.result,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Query the most recent N records.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<AnalysisRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, exchange_id, timestamp, mode, model, redacted_headers, truncated, result
         FROM analyses ORDER BY id DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(rusqlite::params![limit as i64], |row| {
        Ok(AnalysisRecord {
            id: Some(row.get(0)?),
            exchange_id: row.get(1)?,
            timestamp: row.get(2)?,
            mode: row.get(3)?,
            model: row.get(4)?,
            redacted_headers: row.get(5)?,
            truncated: row.get::<_, i64>(6)? != 0,
            result: row.get(7)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Query all records, newest first.
pub fn query_all(conn: &Connection) -> Result<Vec<AnalysisRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, exchange_id, timestamp, mode, model, redacted_headers, truncated, result
         FROM analyses ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AnalysisRecord {
            id: Some(row.get(0)?),
            exchange_id: row.get(1)?,
            timestamp: row.get(2)?,
            mode: row.get(3)?,
            model: row.get(4)?,
            redacted_headers: row.get(5)?,
            truncated: row.get::<_, i64>(6)? != 0,
            result: row.get(7)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Open or create a database at the given path.
pub fn open_db(path: &std::path::Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_db(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(mode: &str) -> AnalysisRecord {
        AnalysisRecord {
            id: None,
            exchange_id: "f9d2c7de-0000-0000-0000-000000000000".to_string(),
            timestamp: "2026-08-31T10:00:00Z".to_string(),
            mode: mode.to_string(),
            model: "claude".to_string(),
            redacted_headers: "cookie, authorization".to_string(),
            truncated: false,
            result: "No critical findings.".to_string(),
        }
    }

    #[test]
    fn init_and_insert() {
        let conn = open_memory_db().unwrap();
        let id = insert_record(&conn, &sample_record("Vulnerability Scan")).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn query_recent_returns_in_desc_order() {
        let conn = open_memory_db().unwrap();
        insert_record(&conn, &sample_record("Vulnerability Scan")).unwrap();
        insert_record(&conn, &sample_record("Security Headers Check")).unwrap();
        insert_record(&conn, &sample_record("Custom Prompt")).unwrap();

        let records = query_recent(&conn, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mode, "Custom Prompt");
        assert_eq!(records[1].mode, "Security Headers Check");
    }

    #[test]
    fn query_all_returns_everything_newest_first() {
        let conn = open_memory_db().unwrap();
        for mode in ["Vulnerability Scan", "Security Headers Check", "Custom Prompt"] {
            insert_record(&conn, &sample_record(mode)).unwrap();
        }

        let records = query_all(&conn).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].mode, "Custom Prompt");
        assert_eq!(records[2].mode, "Vulnerability Scan");
    }

    #[test]
    fn truncated_flag_round_trips() {
        let conn = open_memory_db().unwrap();
        let mut record = sample_record("Vulnerability Scan");
        record.truncated = true;
        insert_record(&conn, &record).unwrap();

        let records = query_recent(&conn, 1).unwrap();
        assert!(records[0].truncated);
    }

    #[test]
    fn open_db_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("history.db");
        let conn = open_db(&db_path).unwrap();
        insert_record(&conn, &sample_record("Custom Prompt")).unwrap();

        // Re-open and verify
        let conn2 = open_db(&db_path).unwrap();
        let records = query_recent(&conn2, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model, "claude");
    }
}
