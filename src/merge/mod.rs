//! # Alignment & Interpolation Engine
//!
//! Merges the trimmed gas and particle streams into one table. The two
//! streams come from the same device and must line up row for row; the GPS
//! track supplies a position for every row by interpolation, not rows of its
//! own, so the output has exactly as many records as the sensor streams.

mod channels;
mod error;
mod interp;

#[cfg(test)]
mod tests;

pub use channels::Channel;
pub use error::AlignmentError;
pub use interp::{interp, TrackInterpolator};

use log::{debug, info};

use crate::sensor::{GasRecord, ParticleRecord, SensorRecord};
use crate::track::Track;

/// Largest tolerated difference between paired row timestamps (seconds)
pub const DEFAULT_TIMESTAMP_TOLERANCE: f64 = 1e-6;

/// Leading columns of every merged record
pub const FIXED_COLUMNS: [&str; 3] = ["time", "lat", "lon"];

/// Settings for [`merge`]
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Output channels, in column order
    pub channels: Vec<Channel>,
    /// Tolerance for paired timestamps (seconds)
    pub tolerance: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            channels: vec![Channel::Co, Channel::SmallConc],
            tolerance: DEFAULT_TIMESTAMP_TOLERANCE,
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    /// Epoch seconds (taken from the gas row)
    pub timestamp: f64,
    /// Interpolated latitude
    pub latitude: f64,
    /// Interpolated longitude
    pub longitude: f64,
    /// Channel values, in the table's channel order
    pub values: Vec<f64>,
}

impl MergedRecord {
    /// Number of columns including time, lat and lon
    pub fn width(&self) -> usize {
        FIXED_COLUMNS.len() + self.values.len()
    }

    /// Value of column `index` (0 = time, 1 = lat, 2 = lon, then channels)
    pub fn column(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.timestamp),
            1 => Some(self.latitude),
            2 => Some(self.longitude),
            i => self.values.get(i - FIXED_COLUMNS.len()).copied(),
        }
    }
}

/// The merged dataset
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    channels: Vec<Channel>,
    records: Vec<MergedRecord>,
}

impl MergedTable {
    /// Assemble a table; every record should carry one value per channel
    pub fn new(channels: Vec<Channel>, records: Vec<MergedRecord>) -> Self {
        Self { channels, records }
    }

    /// Output channels, in column order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Rows in sensor order
    pub fn records(&self) -> &[MergedRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `time, lat, lon, <channel names>`
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.channels.iter().map(|c| c.name().to_string()))
            .collect()
    }

    /// Column index of `channel`, if the table carries it
    pub fn column_of(&self, channel: Channel) -> Option<usize> {
        self.channels
            .iter()
            .position(|&c| c == channel)
            .map(|i| i + FIXED_COLUMNS.len())
    }
}

/// Check that two co-sampled streams line up row for row.
///
/// Row counts must match and every pair must be stamped within `tolerance`
/// seconds. Mismatches are reported, never truncated away.
pub fn check_alignment<A: SensorRecord, B: SensorRecord>(
    gas: &[A],
    particle: &[B],
    tolerance: f64,
) -> Result<(), AlignmentError> {
    if gas.len() != particle.len() {
        return Err(AlignmentError::RowCountMismatch {
            gas: gas.len(),
            particle: particle.len(),
        });
    }
    for (i, (a, b)) in gas.iter().zip(particle).enumerate() {
        let difference = (a.timestamp() - b.timestamp()).abs();
        // Written so that NaN fails the check
        if !(difference < tolerance) {
            return Err(AlignmentError::TimestampMismatch {
                row: i + 1,
                gas: a.timestamp(),
                particle: b.timestamp(),
                difference,
            });
        }
    }
    Ok(())
}

/// Merge trimmed gas and particle rows with positions from `track`.
///
/// `track` is the full, untrimmed track; it does not need to be sorted.
pub fn merge(
    gas: &[GasRecord],
    particle: &[ParticleRecord],
    track: &Track,
    config: &MergeConfig,
) -> Result<MergedTable, AlignmentError> {
    check_alignment(gas, particle, config.tolerance)?;
    let positions = TrackInterpolator::new(track).ok_or(AlignmentError::EmptyTrack)?;

    let records: Vec<MergedRecord> = gas
        .iter()
        .zip(particle)
        .map(|(g, p)| {
            let (latitude, longitude) = positions.position_at(g.timestamp);
            MergedRecord {
                timestamp: g.timestamp,
                latitude,
                longitude,
                values: config.channels.iter().map(|c| c.value(g, p)).collect(),
            }
        })
        .collect();

    debug!(
        "channels: {}",
        config
            .channels
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!(
        "Merged {} rows against {} track points",
        records.len(),
        track.len()
    );
    Ok(MergedTable::new(config.channels.clone(), records))
}
