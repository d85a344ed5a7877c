use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::record::ReviewRecordSet;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reviews (
            id           INTEGER PRIMARY KEY,
            source       TEXT NOT NULL,
            position     INTEGER NOT NULL,
            title        TEXT NOT NULL,
            body         TEXT NOT NULL,
            verified     TEXT NOT NULL,
            color        TEXT NOT NULL,
            size         TEXT NOT NULL,
            rating       TEXT NOT NULL,
            extracted_at TEXT NOT NULL,
            UNIQUE(source, position)
        );
        CREATE INDEX IF NOT EXISTS idx_reviews_attrs ON reviews(color, size);
        ",
    )?;
    Ok(())
}

/// Replace every stored row for `source` with `records`.
pub fn save_records(conn: &Connection, source: &str, records: &ReviewRecordSet) -> Result<usize> {
    let extracted_at = chrono::Utc::now().to_rfc3339();
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM reviews WHERE source = ?1", rusqlite::params![source])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO reviews
             (source, position, title, body, verified, color, size, rating, extracted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for (i, r) in records.iter().enumerate() {
            stmt.execute(rusqlite::params![
                source, i as i64, r.title, r.body, r.verified, r.color, r.size, r.rating, extracted_at,
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ReviewRecord;

    fn titles(conn: &Connection, source: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT title FROM reviews WHERE source = ?1 ORDER BY position")
            .unwrap();
        stmt.query_map(rusqlite::params![source], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<String>, _>>()
            .unwrap()
    }

    fn record(title: &str) -> ReviewRecord {
        ReviewRecord::new(
            title.into(),
            "body".into(),
            Some("Verified Purchase".into()),
            "Black".into(),
            "128GB".into(),
            "5.0 out of 5 stars".into(),
        )
    }

    #[test]
    fn rerun_replaces_rows_for_source() {
        let dir = tempfile::tempdir().unwrap();
        let conn = connect(&dir.path().join("reviews.sqlite")).unwrap();
        init_schema(&conn).unwrap();

        let first: ReviewRecordSet = vec![record("a"), record("b")].into();
        save_records(&conn, "https://example.test/p", &first).unwrap();
        save_records(&conn, "other", &first).unwrap();

        let second: ReviewRecordSet = vec![record("c")].into();
        save_records(&conn, "https://example.test/p", &second).unwrap();

        assert_eq!(titles(&conn, "https://example.test/p"), vec!["c"]);
        assert_eq!(titles(&conn, "other"), vec!["a", "b"]);
    }
}
