use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::normalize::normalize_heading;
use super::record::PageRecord;

/// Word counts for one heading level, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl WordCounts {
    pub fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    /// Iterate `(word, count)` in the order each word was first counted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per heading level word counts across a whole run. Levels that never
/// produced a word are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    levels: BTreeMap<String, WordCounts>,
}

impl FrequencyTable {
    /// Levels in ascending key order.
    pub fn levels(&self) -> impl Iterator<Item = (&str, &WordCounts)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
impl WordCounts {
    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
impl FrequencyTable {
    pub fn level(&self, key: &str) -> Option<&WordCounts> {
        self.levels.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Count normalized heading words per level. Records are visited in the
/// given order, so ties later resolve by storage read order.
pub fn count_tags(records: &[PageRecord]) -> FrequencyTable {
    let mut levels: BTreeMap<String, WordCounts> = BTreeMap::new();
    for record in records {
        for (key, headings) in record.levels() {
            let mut words = headings.iter().flat_map(|h| normalize_heading(h)).peekable();
            if words.peek().is_none() {
                continue;
            }
            let counts = levels.entry(key.to_string()).or_default();
            for word in words {
                counts.add(word);
            }
        }
    }
    debug!(
        records = records.len(),
        levels = levels.len(),
        "counted heading words"
    );
    FrequencyTable { levels }
}
