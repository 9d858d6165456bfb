//! Fixture builders shared by unit tests.

use crate::clock::WallClock;
use crate::sensor::{GasLayout, GasRecord, ParticleLayout, ParticleRecord, SensorLayout};
use crate::track::{Track, TrackSample};

/// `01/01/1970 HH:MM:SS` for a number of seconds past the epoch
pub fn sensor_time(seconds: u32) -> String {
    format!(
        "01/01/1970 {:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// A `D` line whose CO cell reads `co_work` / `co_aux`; other channels hold
/// their column index
pub fn gas_line(seconds: u32, co_work: f64, co_aux: f64) -> String {
    let mut fields: Vec<String> = vec!["D".to_string(), sensor_time(seconds)];
    fields.extend((2..16).map(|c| format!("{c}.0")));
    fields[13] = co_work.to_string();
    fields[12] = co_aux.to_string();
    fields.join(",")
}

/// A `P` line whose small-particle concentration is `small_conc`
pub fn particle_line(seconds: u32, small_conc: f64) -> String {
    let mut fields: Vec<String> = vec!["P".to_string(), sensor_time(seconds)];
    fields.extend((2..27).map(|c| format!("{c}.0")));
    fields[25] = small_conc.to_string();
    fields.join(",")
}

/// A gas record built through the default layout
pub fn gas_record(timestamp: f64, co_work: f64, co_aux: f64) -> GasRecord {
    let mut values: Vec<f64> = (0..16).map(f64::from).collect();
    values[13] = co_work;
    values[12] = co_aux;
    GasLayout::default().build(timestamp, &values)
}

/// A particle record built through the default layout
pub fn particle_record(timestamp: f64, small_conc: f64) -> ParticleRecord {
    let mut values: Vec<f64> = (0..27).map(f64::from).collect();
    values[25] = small_conc;
    ParticleLayout::default().build(timestamp, &values)
}

/// A track with samples at the given (time, lat, lon) triples
pub fn track(points: &[(f64, f64, f64)]) -> Track {
    Track::from_samples(
        points
            .iter()
            .map(|&(timestamp, latitude, longitude)| TrackSample {
                timestamp,
                latitude,
                longitude,
            })
            .collect(),
    )
}

/// The clock every unit test runs on
pub const CLOCK: WallClock = WallClock::Utc;
