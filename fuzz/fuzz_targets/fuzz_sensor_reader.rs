#![no_main]

use ari2track::clock::WallClock;
use ari2track::sensor::{GasLayout, ParticleLayout, SensorReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The same bytes are tried as both log kinds; rejection is fine, panics are not
    let gas = GasLayout::default();
    let _ = SensorReader::new(&gas, WallClock::Utc).read(data, "fuzz.csv");

    let particle = ParticleLayout::default();
    let _ = SensorReader::new(&particle, WallClock::Utc).read(data, "fuzz.csv");
});
