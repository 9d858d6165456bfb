/// Errors that can occur while writing outputs
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// I/O error creating, writing or persisting an output file
    #[error("{file}: I/O error: {source}")]
    Io {
        /// Output file name
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV writer
    #[error("{file}: CSV writing error: {source}")]
    Csv {
        /// Output file name
        file: String,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// Error encoding the KML document
    #[error("{file}: KML encoding error: {source}")]
    Kml {
        /// Output file name
        file: String,
        /// Underlying encoder error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The caller asked for an output shape the data does not have
    #[error("output contract violated: {0}")]
    Contract(String),
}
