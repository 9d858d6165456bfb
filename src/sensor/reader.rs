use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use log::debug;

use super::{SensorError, SensorLayout};
use crate::clock::WallClock;

/// Format of the timestamp in column 1
pub const SENSOR_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Column holding the timestamp
const TIMESTAMP_COLUMN: usize = 1;

/// Reader for one ARISense log, bound to the layout of its kind
pub struct SensorReader<'a, L: SensorLayout> {
    layout: &'a L,
    clock: WallClock,
}

impl<'a, L: SensorLayout> SensorReader<'a, L> {
    /// Create a reader for logs of `layout`'s kind
    pub fn new(layout: &'a L, clock: WallClock) -> Self {
        Self { layout, clock }
    }

    /// Read a log file
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<L::Record>, SensorError> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let file = File::open(path).map_err(|source| SensorError::Io {
            file: file_name.clone(),
            source,
        })?;
        self.read(file, &file_name)
    }

    /// Read a log from any source; `file_name` labels errors
    pub fn read<R: Read>(&self, reader: R, file_name: &str) -> Result<Vec<L::Record>, SensorError> {
        let highest = self.layout.highest_column();
        if highest >= self.layout.column_count() || self.layout.column_count() <= TIMESTAMP_COLUMN {
            return Err(SensorError::InvalidLayout {
                kind: self.layout.kind(),
                highest,
                column_count: self.layout.column_count(),
            });
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut record = StringRecord::new();
        let mut fallback_line = 0u64;

        loop {
            let more = csv_reader
                .read_record(&mut record)
                .map_err(|source| SensorError::Csv {
                    file: file_name.to_string(),
                    source,
                })?;
            if !more {
                break;
            }
            fallback_line += 1;
            let line = record.position().map_or(fallback_line, |p| p.line());

            if record.iter().all(str::is_empty) {
                continue;
            }
            records.push(self.parse_record(&record, file_name, line)?);
        }

        if records.is_empty() {
            return Err(SensorError::Empty {
                file: file_name.to_string(),
            });
        }

        debug!(
            "{}: read {} {} rows",
            file_name,
            records.len(),
            self.layout.kind()
        );
        Ok(records)
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        file_name: &str,
        line: u64,
    ) -> Result<L::Record, SensorError> {
        let expected = self.layout.column_count();
        if record.len() != expected {
            return Err(SensorError::ColumnCount {
                file: file_name.to_string(),
                line,
                expected,
                found: record.len(),
            });
        }

        let tag = &record[0];
        if tag != self.layout.tag() {
            return Err(SensorError::UnexpectedTag {
                file: file_name.to_string(),
                line,
                expected: self.layout.tag().to_string(),
                found: tag.to_string(),
            });
        }

        let raw_time = &record[TIMESTAMP_COLUMN];
        let invalid_time = || SensorError::InvalidTimestamp {
            file: file_name.to_string(),
            line,
            raw: raw_time.to_string(),
        };
        let naive =
            NaiveDateTime::parse_from_str(raw_time, SENSOR_TIME_FORMAT).map_err(|_| invalid_time())?;
        let timestamp = self.clock.to_epoch(&naive).ok_or_else(invalid_time)?;

        let mut values = vec![f64::NAN; expected];
        for (column, raw) in record.iter().enumerate().skip(TIMESTAMP_COLUMN + 1) {
            values[column] = raw.parse().map_err(|_| SensorError::InvalidNumber {
                file: file_name.to_string(),
                line,
                column,
                raw: raw.to_string(),
            })?;
        }

        Ok(self.layout.build(timestamp, &values))
    }
}
