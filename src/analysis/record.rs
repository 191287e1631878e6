use std::collections::BTreeMap;

use crate::db::StoredRow;
use crate::error::{Error, Result};

/// Heading levels the crawler extracts, in document order.
pub const HEADING_KEYS: [&str; 4] = ["h1", "h2", "h3", "h4"];

pub type TagMap = BTreeMap<String, Vec<String>>;

/// One crawled page with its headings grouped by level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    tags: TagMap,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>, tags: TagMap) -> Self {
        PageRecord {
            url: url.into(),
            title: title.into(),
            tags,
        }
    }

    /// Parse the stored JSON payload. A NULL payload is treated as JSON `null`
    /// and rejected like any other non-mapping value.
    pub fn decode(row: StoredRow) -> Result<Self> {
        let payload = row.tags.as_deref().unwrap_or("null");
        let tags: TagMap = serde_json::from_str(payload).map_err(|source| Error::Decode {
            url: row.url.clone(),
            source,
        })?;
        Ok(PageRecord::new(row.url, row.title, tags))
    }

    /// Raw headings for `key`, or `None` when the page has no such level.
    #[allow(dead_code)]
    pub fn tags(&self, key: &str) -> Option<&[String]> {
        self.tags.get(key).map(Vec::as_slice)
    }

    pub fn levels(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tags: Option<&str>) -> StoredRow {
        StoredRow {
            url: "https://example.com/".to_string(),
            title: "Example".to_string(),
            tags: tags.map(str::to_string),
        }
    }

    #[test]
    fn decodes_heading_map() {
        let rec = PageRecord::decode(row(Some(r#"{"h1": ["SEO Tips"], "h2": []}"#))).unwrap();
        assert_eq!(rec.url, "https://example.com/");
        assert_eq!(rec.title, "Example");
        assert_eq!(rec.tags("h1"), Some(&["SEO Tips".to_string()][..]));
        assert_eq!(rec.tags("h2"), Some(&[][..]));
        assert_eq!(rec.tags("h3"), None);
    }

    #[test]
    fn rejects_malformed_payloads() {
        for bad in [
            "not json",
            r#"["h1", "h2"]"#,
            r#"{"h1": "SEO"}"#,
            r#"{"h1": [1, 2]}"#,
            r#"{"h1": [null]}"#,
        ] {
            let err = PageRecord::decode(row(Some(bad))).unwrap_err();
            assert!(matches!(err, Error::Decode { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn rejects_missing_payload() {
        let err = PageRecord::decode(row(None)).unwrap_err();
        assert!(err.to_string().contains("https://example.com/"));
    }
}
