/// Errors that can occur while reading an ARISense log
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// I/O error opening the log
    #[error("{file}: I/O error: {source}")]
    Io {
        /// Log file name
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The delimited-text reader failed (I/O or invalid UTF-8)
    #[error("{file}: CSV parsing error: {source}")]
    Csv {
        /// Log file name
        file: String,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// A record does not have the fixed column count of its kind
    #[error("{file}:{line}: expected {expected} columns, found {found}")]
    ColumnCount {
        /// Log file name
        file: String,
        /// 1-based line number
        line: u64,
        /// Column count of the layout
        expected: usize,
        /// Column count of the record
        found: usize,
    },

    /// A record's type tag is not the one expected for this log
    #[error("{file}:{line}: line does not start with \"{expected}\" (found \"{found}\")")]
    UnexpectedTag {
        /// Log file name
        file: String,
        /// 1-based line number
        line: u64,
        /// Tag of the layout
        expected: String,
        /// Tag found in column 0
        found: String,
    },

    /// Column 1 is not a `MM/DD/YYYY HH:MM:SS` timestamp
    #[error("{file}:{line}: unable to interpret the date string: {raw}")]
    InvalidTimestamp {
        /// Log file name
        file: String,
        /// 1-based line number
        line: u64,
        /// Raw timestamp text
        raw: String,
    },

    /// A channel column is not a decimal number
    #[error("{file}:{line}: column {column} is not a number: {raw}")]
    InvalidNumber {
        /// Log file name
        file: String,
        /// 1-based line number
        line: u64,
        /// 0-based column index
        column: usize,
        /// Raw field text
        raw: String,
    },

    /// The layout reads a column beyond its own column count
    #[error("{kind} layout reads column {highest} but declares only {column_count} columns")]
    InvalidLayout {
        /// Stream the layout describes
        kind: super::SensorKind,
        /// Highest column the layout reads
        highest: usize,
        /// Declared column count
        column_count: usize,
    },

    /// The log contains no data rows
    #[error("{file}: no data rows")]
    Empty {
        /// Log file name
        file: String,
    },
}
