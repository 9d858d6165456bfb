use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::sensor::{GasRecord, ParticleRecord};

/// An output column derived from one gas/particle row pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Channel {
    /// CO work minus aux
    Co,
    /// NO work minus aux
    No,
    /// NO2 work minus aux
    No2,
    /// O3 work minus aux
    O3,
    /// CO2
    Co2,
    /// Air temperature
    Temperature,
    /// Relative humidity
    Humidity,
    /// Barometric pressure
    Pressure,
    /// Small-particle concentration
    SmallConc,
    /// Large-particle concentration
    LargeConc,
    /// PM1
    Pm1,
    /// PM2.5
    Pm2_5,
    /// PM10
    Pm10,
}

impl Channel {
    /// Every channel, in catalogue order
    pub const ALL: [Channel; 13] = [
        Channel::Co,
        Channel::No,
        Channel::No2,
        Channel::O3,
        Channel::Co2,
        Channel::Temperature,
        Channel::Humidity,
        Channel::Pressure,
        Channel::SmallConc,
        Channel::LargeConc,
        Channel::Pm1,
        Channel::Pm2_5,
        Channel::Pm10,
    ];

    /// Column header and config name
    pub fn name(self) -> &'static str {
        match self {
            Channel::Co => "CO",
            Channel::No => "NO",
            Channel::No2 => "NO2",
            Channel::O3 => "O3",
            Channel::Co2 => "CO2",
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
            Channel::Pressure => "pressure",
            Channel::SmallConc => "small_conc",
            Channel::LargeConc => "large_conc",
            Channel::Pm1 => "PM1",
            Channel::Pm2_5 => "PM2.5",
            Channel::Pm10 => "PM10",
        }
    }

    /// Name usable inside a file name
    pub fn file_stem(self) -> String {
        self.name().replace('.', "_")
    }

    /// Derive the channel's value from a co-timed row pair
    pub fn value(self, gas: &GasRecord, particle: &ParticleRecord) -> f64 {
        match self {
            Channel::Co => gas.co.differential(),
            Channel::No => gas.no.differential(),
            Channel::No2 => gas.no2.differential(),
            Channel::O3 => gas.o3.differential(),
            Channel::Co2 => gas.co2,
            Channel::Temperature => gas.air_temperature,
            Channel::Humidity => gas.relative_humidity,
            Channel::Pressure => gas.pressure,
            Channel::SmallConc => particle.small_conc,
            Channel::LargeConc => particle.large_conc,
            Channel::Pm1 => particle.pm1,
            Channel::Pm2_5 => particle.pm2_5,
            Channel::Pm10 => particle.pm10,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Channel::ALL.iter().map(|c| c.name()).collect();
                format!("unknown channel '{}' (known: {})", s, known.join(", "))
            })
    }
}

impl TryFrom<String> for Channel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
