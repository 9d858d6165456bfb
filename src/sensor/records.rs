/// Number of size bins reported by the optical particle counter
pub const OPC_BIN_COUNT: usize = 16;

/// Anything that carries a sample time
pub trait SensorRecord {
    /// Epoch seconds
    fn timestamp(&self) -> f64;
}

/// Working and auxiliary electrode outputs of one electrochemical cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectrodePair {
    /// Working electrode (signal plus drift)
    pub work: f64,
    /// Auxiliary electrode (drift only)
    pub aux: f64,
}

impl ElectrodePair {
    /// Work minus auxiliary; cancels drift common to both electrodes
    pub fn differential(&self) -> f64 {
        self.work - self.aux
    }
}

/// One `D` row
#[derive(Debug, Clone, PartialEq)]
pub struct GasRecord {
    /// Epoch seconds
    pub timestamp: f64,
    /// Air temperature (°C)
    pub air_temperature: f64,
    /// Relative humidity (%)
    pub relative_humidity: f64,
    /// Barometric pressure
    pub pressure: f64,
    /// CO2
    pub co2: f64,
    /// NO cell
    pub no: ElectrodePair,
    /// NO2 cell
    pub no2: ElectrodePair,
    /// O3 cell
    pub o3: ElectrodePair,
    /// CO cell
    pub co: ElectrodePair,
    /// Board temperature (°C)
    pub board_temperature: f64,
    /// Battery voltage
    pub battery_voltage: f64,
}

impl SensorRecord for GasRecord {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// One `P` row
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRecord {
    /// Epoch seconds
    pub timestamp: f64,
    /// Per-bin particle counts
    pub bins: [f64; OPC_BIN_COUNT],
    /// Sample flow rate
    pub sample_flow_rate: f64,
    /// Sampling period (s)
    pub sampling_period: f64,
    /// PM1
    pub pm1: f64,
    /// PM2.5
    pub pm2_5: f64,
    /// PM10
    pub pm10: f64,
    /// OPC temperature (°C)
    pub temperature: f64,
    /// OPC relative humidity (%)
    pub relative_humidity: f64,
    /// Small-particle number concentration
    pub small_conc: f64,
    /// Large-particle number concentration
    pub large_conc: f64,
}

impl SensorRecord for ParticleRecord {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}
