use std::collections::BTreeSet;

use super::aggregate::FrequencyTable;

/// Sub-heading levels still get a block but never feed the summary line.
const SUMMARY_EXCLUDED: [&str; 3] = ["h3", "h4", "h5"];
/// Ranks 0..=5 of an eligible level go into the summary.
const SUMMARY_MAX_RANK: usize = 5;
/// Last rank printed per level.
const BLOCK_MAX_RANK: usize = 10;

/// Render the ranked per-level blocks followed by the `Top tags` line.
pub fn render(table: &FrequencyTable) -> String {
    let mut top_tags: BTreeSet<&str> = BTreeSet::new();
    let mut out = String::new();

    for (key, counts) in table.levels() {
        if counts.is_empty() {
            continue;
        }
        // stable: equal counts keep first-seen order
        let mut ranked: Vec<(&str, usize)> = counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        out.push_str(&format!("\nTop values for '{}' tag:\n", key));
        let eligible = !SUMMARY_EXCLUDED.contains(&key);
        for (rank, (word, count)) in ranked.into_iter().enumerate() {
            out.push_str(&format!("\t'{}' :: {}\n", word, count));
            if eligible && rank <= SUMMARY_MAX_RANK {
                top_tags.insert(word);
            }
            if count <= 1 || rank >= BLOCK_MAX_RANK {
                break;
            }
        }
    }

    let summary: Vec<&str> = top_tags.into_iter().collect();
    out.push_str(&format!("\nTop tags: {}", summary.join(", ")));
    out
}
