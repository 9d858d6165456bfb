/// Errors raised when the two sensor streams cannot be merged
#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    /// The streams disagree in length after trimming
    #[error("row count mismatch after trimming: {gas} gas rows, {particle} particle rows")]
    RowCountMismatch {
        /// Gas rows
        gas: usize,
        /// Particle rows
        particle: usize,
    },

    /// A row pair is stamped at different times
    #[error("row {row}: gas timestamp {gas} and particle timestamp {particle} differ by {difference} s")]
    TimestampMismatch {
        /// 1-based row index within the trimmed streams
        row: usize,
        /// Gas row timestamp (epoch seconds)
        gas: f64,
        /// Particle row timestamp (epoch seconds)
        particle: f64,
        /// Absolute difference in seconds
        difference: f64,
    },

    /// There is no track to interpolate positions from
    #[error("cannot interpolate positions from an empty track")]
    EmptyTrack,
}
