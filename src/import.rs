//! Load crawler output (JSON Lines) into the record table.

use std::collections::BTreeMap;
use std::io::BufRead;

use rusqlite::Connection;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::analysis::record::{TagMap, HEADING_KEYS};
use crate::db;
use crate::error::{Error, Result};

/// One page as emitted by the crawler.
#[derive(Debug, Deserialize)]
pub struct CrawledPage {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}

/// Collapse internal whitespace runs and trim, like XPath `normalize-space`.
/// Only space, tab, CR and LF count; other Unicode spaces are kept as text.
fn normalize_space(text: &str) -> String {
    text.split([' ', '\t', '\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shape headings the way the crawler stores them: every known level present,
/// blank headings dropped, unknown levels discarded.
pub fn shape_tags(url: &str, mut raw: BTreeMap<String, Vec<String>>) -> TagMap {
    let mut tags = TagMap::new();
    for key in HEADING_KEYS {
        let headings = raw
            .remove(key)
            .unwrap_or_default()
            .iter()
            .map(|h| normalize_space(h))
            .filter(|h| !h.is_empty())
            .collect();
        tags.insert(key.to_string(), headings);
    }
    if !raw.is_empty() {
        let dropped: Vec<&str> = raw.keys().map(String::as_str).collect();
        warn!(url, ?dropped, "ignoring unsupported heading levels");
    }
    tags
}

/// Insert every page from `reader` in one transaction. Returns the number of
/// pages stored; a malformed line leaves the table untouched.
pub fn import_pages<R: BufRead>(conn: &Connection, table: &str, reader: R) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let page: CrawledPage = serde_json::from_str(&line).map_err(|source| Error::Import {
            line: idx + 1,
            source,
        })?;
        let tags = shape_tags(&page.url, page.tags);
        let payload = serde_json::to_string(&tags).map_err(|source| Error::Import {
            line: idx + 1,
            source,
        })?;
        db::insert_record(&tx, table, &page.url, page.title.as_deref(), &payload)?;
        debug!(url = %page.url, "stored page");
        count += 1;
    }
    tx.commit()?;
    Ok(count)
}
