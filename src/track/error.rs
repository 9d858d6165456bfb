/// Errors that can occur while reading a GPX track
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// I/O error opening or reading the track file
    #[error("{file}: I/O error: {source}")]
    Io {
        /// Track file name
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("{file}: XML parsing error: {source}")]
    Xml {
        /// Track file name
        file: String,
        /// Underlying parser error
        #[source]
        source: quick_xml::Error,
    },

    /// A track point lacks a required attribute
    #[error("{file}: track point {point}: missing required attribute '{name}'")]
    MissingAttribute {
        /// Track file name
        file: String,
        /// 1-based track point number
        point: usize,
        /// Attribute name
        name: &'static str,
    },

    /// A track point has no `<time>` child (or it is empty)
    #[error("{file}: track point {point}: missing <time> element")]
    MissingTime {
        /// Track file name
        file: String,
        /// 1-based track point number
        point: usize,
    },

    /// A latitude or longitude attribute is not a decimal number
    #[error("{file}: track point {point}: invalid {name} value '{raw}'")]
    InvalidCoordinate {
        /// Track file name
        file: String,
        /// 1-based track point number
        point: usize,
        /// Attribute name
        name: &'static str,
        /// Raw attribute text
        raw: String,
    },

    /// A `<time>` value is not `YYYY-MM-DDTHH:MM:SSZ`
    #[error("{file}: track point {point}: unable to interpret the time string '{raw}'")]
    InvalidTimestamp {
        /// Track file name
        file: String,
        /// 1-based track point number
        point: usize,
        /// Raw time text
        raw: String,
    },

    /// The document contains no track points
    #[error("{file}: no track points found")]
    Empty {
        /// Track file name
        file: String,
    },
}
