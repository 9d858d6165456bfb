#![no_main]

use ari2track::clock::WallClock;
use ari2track::track::Track;
use ari2track::trim::TimeWindow;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Any input must either parse or fail with an error, never panic
    if let Ok(track) = Track::from_reader(Cursor::new(data), "fuzz.gpx", WallClock::Utc) {
        let window = TimeWindow::of_track(&track);
        assert!(window.is_some());
        let _ = track.sorted_by_time();
    }
});
