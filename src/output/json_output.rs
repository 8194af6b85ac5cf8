//! JSON output
//!
//! Records are written as one pretty-printed top-level array.

use crate::output::WriteResult;
use crate::record::Record;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes records as a JSON array to `path`, keeping `links` as an array
pub fn write_json(records: &[Record], path: &Path) -> WriteResult<()> {
    write_json_to(records, File::create(path)?)
}

/// Writes records as a pretty JSON array to any writer
pub fn write_json_to<W: Write>(records: &[Record], out: W) -> WriteResult<()> {
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads back a file produced by [`write_json`]
pub fn read_json(path: &Path) -> WriteResult<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
