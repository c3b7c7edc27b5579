//! Events CSV generation.

use std::io::Write;

use super::{EventRow, HEADER};
use crate::error::{CalpostError, CalpostResult};

/// Write the header row followed by `rows`.
pub fn write_rows(output: impl Write, rows: &[EventRow]) -> CalpostResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn write_rows_string(rows: &[EventRow]) -> CalpostResult<String> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| CalpostError::Serialization(e.to_string()))
}
