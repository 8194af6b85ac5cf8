//! CSV output
//!
//! One row per record. The header is the fixed record columns followed by
//! the sorted union of every extra field name. `links` is flattened into a
//! single cell joined by [`LINK_DELIMITER`].

use crate::output::WriteResult;
use crate::record::Record;
use chrono::SecondsFormat;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Separator between links inside the `links` cell
pub const LINK_DELIMITER: &str = ";";

const FIXED_COLUMNS: [&str; 6] = [
    "target_name",
    "url",
    "title",
    "links",
    "content",
    "fetched_at",
];

/// Writes records as CSV with a header row to `path`
///
/// With no records the file holds only the header.
pub fn write_csv(records: &[Record], path: &Path) -> WriteResult<()> {
    write_csv_to(records, File::create(path)?)
}

/// Writes records as CSV with a header row to any writer
pub fn write_csv_to<W: Write>(records: &[Record], out: W) -> WriteResult<()> {
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.fields.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(out);

    let header = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(extra_columns.iter().copied());
    writer.write_record(header)?;

    for record in records {
        let mut row = vec![
            record.target_name.clone(),
            record.url.clone(),
            record.title.clone().unwrap_or_default(),
            join_links(&record.links),
            record.content.clone().unwrap_or_default(),
            record
                .fetched_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        ];
        row.extend(
            extra_columns
                .iter()
                .map(|column| record.field(column).unwrap_or_default().to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Joins links into one cell
pub fn join_links(links: &[String]) -> String {
    links.join(LINK_DELIMITER)
}

/// Splits a `links` cell back into its links
pub fn split_links(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(LINK_DELIMITER).map(str::to_string).collect()
}
