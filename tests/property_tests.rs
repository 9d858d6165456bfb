//! Property-based tests for trimming and interpolation.

use ari2track::merge::{interp, merge, MergeConfig, TrackInterpolator};
use ari2track::sensor::{
    GasLayout, GasRecord, ParticleLayout, ParticleRecord, SensorLayout, SensorRecord,
};
use ari2track::track::{Track, TrackSample};
use ari2track::trim::{trim_to_track, TimeWindow};

fn gas_at(t: f64) -> GasRecord {
    GasLayout::default().build(t, &[1.0; 16])
}

fn particle_at(t: f64) -> ParticleRecord {
    ParticleLayout::default().build(t, &[1.0; 27])
}

fn track_at(times: &[f64]) -> Track {
    Track::from_samples(
        times
            .iter()
            .enumerate()
            .map(|(i, &timestamp)| TrackSample {
                timestamp,
                latitude: i as f64,
                longitude: -(i as f64),
            })
            .collect(),
    )
}

/// Strictly increasing knots built from positive gaps
fn knots(start: f64, gaps: &[f64]) -> Vec<f64> {
    let mut xs = Vec::with_capacity(gaps.len() + 1);
    let mut x = start;
    xs.push(x);
    for gap in gaps {
        x += gap;
        xs.push(x);
    }
    xs
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Trimming twice keeps exactly what trimming once kept
        #[test]
        fn test_trim_idempotent(
            times in prop::collection::vec(-1_000.0f64..1_000.0, 0..60),
            track_times in prop::collection::vec(-500.0f64..500.0, 1..20),
        ) {
            let rows: Vec<GasRecord> = times.iter().map(|&t| gas_at(t)).collect();
            let track = track_at(&track_times);

            let once = trim_to_track(&rows, &track);
            let twice = trim_to_track(&once, &track);

            let once_times: Vec<f64> = once.iter().map(|r| r.timestamp()).collect();
            let twice_times: Vec<f64> = twice.iter().map(|r| r.timestamp()).collect();
            prop_assert_eq!(once_times, twice_times);
        }

        /// Kept rows lie strictly inside the span and keep their input order
        #[test]
        fn test_trim_keeps_inside_rows_in_order(
            times in prop::collection::vec(-1_000.0f64..1_000.0, 0..60),
            track_times in prop::collection::vec(-500.0f64..500.0, 1..20),
        ) {
            let rows: Vec<ParticleRecord> = times.iter().map(|&t| particle_at(t)).collect();
            let track = track_at(&track_times);
            let window = TimeWindow::of_track(&track).unwrap();

            let kept: Vec<f64> = trim_to_track(&rows, &track)
                .iter()
                .map(|r| r.timestamp())
                .collect();
            let expected: Vec<f64> = times.iter().copied().filter(|&t| window.contains(t)).collect();
            prop_assert_eq!(kept, expected);
        }

        /// The interpolator reproduces the samples exactly at sample times
        #[test]
        fn test_interp_exact_at_knots(
            start in -1.0e9f64..1.6e9,
            gaps in prop::collection::vec(0.5f64..60.0, 1..30),
            seed in prop::collection::vec(-180.0f64..180.0, 31),
        ) {
            let xs = knots(start, &gaps);
            let ys = &seed[..xs.len()];
            for (x, y) in xs.iter().zip(ys) {
                prop_assert_eq!(interp(*x, &xs, ys), *y);
            }
        }

        /// Queries outside the sample range take the nearest end sample
        #[test]
        fn test_interp_clamps(
            gaps in prop::collection::vec(0.5f64..60.0, 1..30),
            seed in prop::collection::vec(-90.0f64..90.0, 31),
            beyond in 0.001f64..1.0e6,
        ) {
            let xs = knots(0.0, &gaps);
            let ys = &seed[..xs.len()];
            let last = xs[xs.len() - 1];

            prop_assert_eq!(interp(-beyond, &xs, ys), ys[0]);
            prop_assert_eq!(interp(last + beyond, &xs, ys), ys[ys.len() - 1]);
        }

        /// Track order does not change interpolated positions
        #[test]
        fn test_interpolator_ignores_track_order(
            gaps in prop::collection::vec(0.5f64..60.0, 1..20),
            rotate in 0usize..20,
            query in 0.0f64..1.0,
        ) {
            let times = knots(0.0, &gaps);
            let sorted = track_at(&times);
            let mut samples = sorted.samples().to_vec();
            let shift = rotate % samples.len();
            samples.rotate_left(shift);
            let shuffled = Track::from_samples(samples);

            let t = query * times[times.len() - 1];
            let a = TrackInterpolator::new(&sorted).unwrap().position_at(t);
            let b = TrackInterpolator::new(&shuffled).unwrap().position_at(t);
            prop_assert_eq!(a, b);
        }

        /// Merging keeps one output row per aligned input row
        #[test]
        fn test_merge_preserves_row_count(
            gaps in prop::collection::vec(0.5f64..60.0, 1..40),
            track_times in prop::collection::vec(0.0f64..2_000.0, 1..20),
        ) {
            let times = knots(0.0, &gaps);
            let gas: Vec<GasRecord> = times.iter().map(|&t| gas_at(t)).collect();
            let particle: Vec<ParticleRecord> = times.iter().map(|&t| particle_at(t)).collect();
            let track = track_at(&track_times);

            let gas = trim_to_track(&gas, &track);
            let particle = trim_to_track(&particle, &track);
            let table = merge(&gas, &particle, &track, &MergeConfig::default()).unwrap();

            prop_assert_eq!(table.len(), gas.len());
            for (record, row) in table.records().iter().zip(&gas) {
                prop_assert_eq!(record.timestamp, row.timestamp());
                prop_assert_eq!(record.values.len(), 2);
            }
        }
    }
}
