pub mod aggregate;
pub mod normalize;
pub mod record;
pub mod report;

use tracing::{debug, info};

use crate::db::StoredRow;
use crate::error::Result;
use record::PageRecord;

/// Decode → count → render. Every row is decoded before counting starts, so a
/// single bad payload fails the run without producing a partial report.
pub fn build_report(rows: Vec<StoredRow>) -> Result<String> {
    let records = rows
        .into_iter()
        .map(PageRecord::decode)
        .collect::<Result<Vec<_>>>()?;
    for r in &records {
        debug!(url = %r.url, title = %r.title, levels = r.levels().count(), "decoded page");
    }
    let table = aggregate::count_tags(&records);
    info!(
        records = records.len(),
        levels = table.levels().count(),
        "built heading frequency table"
    );
    Ok(report::render(&table))
}
