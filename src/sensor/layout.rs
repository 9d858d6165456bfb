//! Fixed column contracts of the two ARISense log kinds.
//!
//! A layout is consumed once per row, at the parse boundary, to turn a
//! positional vector into a named-field record. Nothing downstream of the
//! reader refers to a column index.

use std::fmt;

use super::records::{ElectrodePair, GasRecord, ParticleRecord, SensorRecord, OPC_BIN_COUNT};

/// The two structurally distinct ARISense streams
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Gas and environmental readings (`D` rows)
    Gas,
    /// Optical particle counter readings (`P` rows)
    Particle,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Gas => write!(f, "gas"),
            SensorKind::Particle => write!(f, "particle"),
        }
    }
}

/// Column contract for one log kind
pub trait SensorLayout {
    /// Record type produced for each row
    type Record: SensorRecord;

    /// Which stream this layout describes
    fn kind(&self) -> SensorKind;

    /// Expected value of column 0
    fn tag(&self) -> &str;

    /// Exact number of columns per row
    fn column_count(&self) -> usize;

    /// Highest column offset the layout reads
    fn highest_column(&self) -> usize;

    /// Build a record from the row timestamp and the row's numeric columns.
    ///
    /// `values` has `column_count()` entries indexed by column; the tag and
    /// timestamp positions hold NaN.
    fn build(&self, timestamp: f64, values: &[f64]) -> Self::Record;
}

/// Column offsets of a work/auxiliary electrode pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairColumns {
    /// Working electrode column
    pub work: usize,
    /// Auxiliary electrode column
    pub aux: usize,
}

impl PairColumns {
    fn read(&self, values: &[f64]) -> ElectrodePair {
        ElectrodePair {
            work: values[self.work],
            aux: values[self.aux],
        }
    }
}

/// Column layout of `D` rows
#[derive(Debug, Clone, PartialEq)]
pub struct GasLayout {
    /// Type tag in column 0
    pub tag: String,
    /// Columns per row
    pub column_count: usize,
    /// Air temperature (°C)
    pub air_temperature: usize,
    /// Relative humidity (%)
    pub relative_humidity: usize,
    /// Barometric pressure
    pub pressure: usize,
    /// CO2 (NDIR)
    pub co2: usize,
    /// NO electrodes
    pub no: PairColumns,
    /// NO2 electrodes
    pub no2: PairColumns,
    /// O3 electrodes
    pub o3: PairColumns,
    /// CO electrodes
    pub co: PairColumns,
    /// Board temperature (°C)
    pub board_temperature: usize,
    /// Battery voltage
    pub battery_voltage: usize,
}

impl Default for GasLayout {
    fn default() -> Self {
        Self {
            tag: "D".to_string(),
            column_count: 16,
            air_temperature: 2,
            relative_humidity: 3,
            pressure: 4,
            co2: 5,
            no: PairColumns { work: 7, aux: 6 },
            no2: PairColumns { work: 9, aux: 8 },
            o3: PairColumns { work: 11, aux: 10 },
            co: PairColumns { work: 13, aux: 12 },
            board_temperature: 14,
            battery_voltage: 15,
        }
    }
}

impl SensorLayout for GasLayout {
    type Record = GasRecord;

    fn kind(&self) -> SensorKind {
        SensorKind::Gas
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn highest_column(&self) -> usize {
        [
            self.air_temperature,
            self.relative_humidity,
            self.pressure,
            self.co2,
            self.no.work,
            self.no.aux,
            self.no2.work,
            self.no2.aux,
            self.o3.work,
            self.o3.aux,
            self.co.work,
            self.co.aux,
            self.board_temperature,
            self.battery_voltage,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    fn build(&self, timestamp: f64, values: &[f64]) -> GasRecord {
        GasRecord {
            timestamp,
            air_temperature: values[self.air_temperature],
            relative_humidity: values[self.relative_humidity],
            pressure: values[self.pressure],
            co2: values[self.co2],
            no: self.no.read(values),
            no2: self.no2.read(values),
            o3: self.o3.read(values),
            co: self.co.read(values),
            board_temperature: values[self.board_temperature],
            battery_voltage: values[self.battery_voltage],
        }
    }
}

/// Column layout of `P` rows
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleLayout {
    /// Type tag in column 0
    pub tag: String,
    /// Columns per row
    pub column_count: usize,
    /// First of the contiguous OPC bin-count columns
    pub first_bin: usize,
    /// Sample flow rate
    pub sample_flow_rate: usize,
    /// Sampling period (s)
    pub sampling_period: usize,
    /// PM1 mass concentration
    pub pm1: usize,
    /// PM2.5 mass concentration
    pub pm2_5: usize,
    /// PM10 mass concentration
    pub pm10: usize,
    /// OPC temperature (°C)
    pub temperature: usize,
    /// OPC relative humidity (%)
    pub relative_humidity: usize,
    /// Small-particle number concentration
    pub small_conc: usize,
    /// Large-particle number concentration
    pub large_conc: usize,
}

impl Default for ParticleLayout {
    fn default() -> Self {
        Self {
            tag: "P".to_string(),
            column_count: 27,
            first_bin: 2,
            sample_flow_rate: 18,
            sampling_period: 19,
            pm1: 20,
            pm2_5: 21,
            pm10: 22,
            temperature: 23,
            relative_humidity: 24,
            small_conc: 25,
            large_conc: 26,
        }
    }
}

impl SensorLayout for ParticleLayout {
    type Record = ParticleRecord;

    fn kind(&self) -> SensorKind {
        SensorKind::Particle
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn highest_column(&self) -> usize {
        [
            self.first_bin + OPC_BIN_COUNT - 1,
            self.sample_flow_rate,
            self.sampling_period,
            self.pm1,
            self.pm2_5,
            self.pm10,
            self.temperature,
            self.relative_humidity,
            self.small_conc,
            self.large_conc,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    fn build(&self, timestamp: f64, values: &[f64]) -> ParticleRecord {
        let mut bins = [0.0; OPC_BIN_COUNT];
        bins.copy_from_slice(&values[self.first_bin..self.first_bin + OPC_BIN_COUNT]);
        ParticleRecord {
            timestamp,
            bins,
            sample_flow_rate: values[self.sample_flow_rate],
            sampling_period: values[self.sampling_period],
            pm1: values[self.pm1],
            pm2_5: values[self.pm2_5],
            pm10: values[self.pm10],
            temperature: values[self.temperature],
            relative_humidity: values[self.relative_humidity],
            small_conc: values[self.small_conc],
            large_conc: values[self.large_conc],
        }
    }
}
