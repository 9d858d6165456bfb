use std::io::Write;
use std::path::Path;

use log::debug;

use super::atomic::write_atomically;
use super::{format_value, OutputError};
use crate::clock::WallClock;
use crate::merge::MergedTable;

/// Check a header against the table before anything is written
fn check_header(header: &[String], table: &MergedTable) -> Result<(), OutputError> {
    match header.first() {
        Some(first) if first == "time" => {}
        Some(first) => {
            return Err(OutputError::Contract(format!(
                "first header entry must be \"time\", got \"{first}\""
            )))
        }
        None => return Err(OutputError::Contract("header is empty".to_string())),
    }

    let expected = crate::merge::FIXED_COLUMNS.len() + table.channels().len();
    if header.len() != expected {
        return Err(OutputError::Contract(format!(
            "header has {} entries but records have {} columns",
            header.len(),
            expected
        )));
    }
    if let Some((i, record)) = table
        .records()
        .iter()
        .enumerate()
        .find(|(_, r)| r.width() != header.len())
    {
        return Err(OutputError::Contract(format!(
            "record {} has {} columns, header has {}",
            i + 1,
            record.width(),
            header.len()
        )));
    }
    Ok(())
}

/// Write the merged table as CSV with a header row.
///
/// Timestamps are rendered through `clock` with a trailing `Z`.
pub fn write_table<W: Write>(
    writer: W,
    header: &[String],
    table: &MergedTable,
    clock: WallClock,
    file_name: &str,
) -> Result<(), OutputError> {
    check_header(header, table)?;

    let csv_error = |source: csv::Error| OutputError::Csv {
        file: file_name.to_string(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header).map_err(csv_error)?;

    let mut row: Vec<String> = Vec::with_capacity(header.len());
    for record in table.records() {
        row.clear();
        row.push(clock.render(record.timestamp));
        row.push(format_value(record.latitude));
        row.push(format_value(record.longitude));
        row.extend(record.values.iter().map(|&v| format_value(v)));
        csv_writer.write_record(&row).map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|source| OutputError::Io {
        file: file_name.to_string(),
        source,
    })?;
    Ok(())
}

/// Write the merged table to `path`, replacing it only on success
pub fn write_table_file<P: AsRef<Path>>(
    path: P,
    header: &[String],
    table: &MergedTable,
    clock: WallClock,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    // Fail before a temporary file is created
    check_header(header, table)?;
    write_atomically(path, |writer| {
        write_table(writer, header, table, clock, &file_name)
    })?;
    debug!("{}: wrote {} rows", file_name, table.len());
    Ok(())
}
