use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use rusqlite::{params, Connection};

use crate::error::{Error, Result};

/// One stored page as read back from the record table.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub url: String,
    pub title: String,
    /// Serialized heading map; NULL when the crawler stored nothing.
    pub tags: Option<String>,
}

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn checked_table(table: &str) -> Result<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
    if re.is_match(table) {
        Ok(table)
    } else {
        Err(Error::InvalidTableName(table.to_string()))
    }
}

pub fn init_table(conn: &Connection, table: &str) -> Result<()> {
    let table = checked_table(table)?;
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS \"{table}\" (
            id      INTEGER PRIMARY KEY,
            url     TEXT,
            title   TEXT,
            tags    JSON,
            created DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "
    ))?;
    Ok(())
}

pub fn insert_record(
    conn: &Connection,
    table: &str,
    url: &str,
    title: Option<&str>,
    tags_json: &str,
) -> Result<()> {
    let table = checked_table(table)?;
    conn.execute(
        &format!("INSERT INTO \"{table}\" (url, title, tags) VALUES (?1, ?2, ?3)"),
        params![url, title, tags_json],
    )?;
    Ok(())
}

/// All rows in insertion order. Ordering by id keeps tie-breaks in the report
/// reproducible between runs over the same table. The `tags` column has numeric
/// affinity, so payloads like `5` come back as text only through the cast.
pub fn fetch_rows(conn: &Connection, table: &str) -> Result<Vec<StoredRow>> {
    let table = checked_table(table)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT url, title, CAST(tags AS TEXT) FROM \"{table}\" ORDER BY id"
    ))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StoredRow {
                url: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                tags: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let table = checked_table(table)?;
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |r| {
        r.get(0)
    })?;
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_table(&conn, "seo_scrape").unwrap();
        conn
    }

    #[test]
    fn rows_come_back_in_insertion_order() {
        let conn = memory();
        insert_record(&conn, "seo_scrape", "https://b.example", Some("B"), "{}").unwrap();
        insert_record(&conn, "seo_scrape", "https://a.example", None, r#"{"h1":[]}"#).unwrap();

        let rows = fetch_rows(&conn, "seo_scrape").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://b.example");
        assert_eq!(rows[0].title, "B");
        assert_eq!(rows[1].url, "https://a.example");
        assert_eq!(rows[1].title, "");
        assert_eq!(rows[1].tags.as_deref(), Some(r#"{"h1":[]}"#));
        assert_eq!(count_rows(&conn, "seo_scrape").unwrap(), 2);
    }

    #[test]
    fn init_is_idempotent() {
        let conn = memory();
        init_table(&conn, "seo_scrape").unwrap();
        assert_eq!(count_rows(&conn, "seo_scrape").unwrap(), 0);
    }

    #[test]
    fn rejects_unsafe_table_names() {
        let conn = memory();
        for name in ["", "1pages", "pages; DROP TABLE x", "a\"b", "seo-scrape"] {
            assert!(matches!(
                fetch_rows(&conn, name),
                Err(Error::InvalidTableName(_))
            ));
        }
    }

    #[test]
    fn numeric_payload_reads_back_as_text() {
        let conn = memory();
        insert_record(&conn, "seo_scrape", "https://n.example", Some("N"), "5").unwrap();
        insert_record(&conn, "seo_scrape", "https://r.example", None, "1.5").unwrap();
        let rows = fetch_rows(&conn, "seo_scrape").unwrap();
        assert_eq!(rows[0].tags.as_deref(), Some("5"));
        assert_eq!(rows[1].tags.as_deref(), Some("1.5"));

        match crate::analysis::build_report(rows) {
            Err(Error::Decode { url, .. }) => assert_eq!(url, "https://n.example"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn null_payload_stays_null() {
        let conn = memory();
        conn.execute(
            "INSERT INTO seo_scrape (url, title, tags) VALUES ('https://x.example', 'X', NULL)",
            [],
        )
        .unwrap();
        let rows = fetch_rows(&conn, "seo_scrape").unwrap();
        assert_eq!(rows[0].tags, None);
    }

    #[test]
    fn missing_table_is_storage_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(fetch_rows(&conn, "nope"), Err(Error::Storage(_))));
    }
}
