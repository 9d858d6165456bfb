use super::*;
use crate::test_support::{gas_record, particle_record, track};
use crate::trim::trim_to_track;

fn linear_track() -> Track {
    track(&[(0.0, 0.0, 10.0), (10.0, 1.0, 11.0), (20.0, 2.0, 12.0)])
}

#[test]
fn test_end_to_end_two_rows() {
    let gas = vec![gas_record(5.0, 10.0, 3.0), gas_record(15.0, 8.0, 1.5)];
    let particle = vec![particle_record(5.0, 100.0), particle_record(15.0, 250.0)];

    let table = merge(&gas, &particle, &linear_track(), &MergeConfig::default()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.header(), vec!["time", "lat", "lon", "CO", "small_conc"]);

    let first = &table.records()[0];
    assert_eq!(first.timestamp, 5.0);
    assert_eq!(first.latitude, 0.5);
    assert_eq!(first.longitude, 10.5);
    assert_eq!(first.values, vec![7.0, 100.0]);

    let second = &table.records()[1];
    assert_eq!(second.timestamp, 15.0);
    assert_eq!(second.latitude, 1.5);
    assert_eq!(second.longitude, 11.5);
    assert_eq!(second.values, vec![6.5, 250.0]);
}

#[test]
fn test_differential_channel() {
    let gas = vec![gas_record(5.0, 10.0, 3.0)];
    let particle = vec![particle_record(5.0, 0.0)];
    let config = MergeConfig {
        channels: vec![Channel::Co],
        ..MergeConfig::default()
    };

    let table = merge(&gas, &particle, &linear_track(), &config).unwrap();
    assert_eq!(table.records()[0].values, vec![7.0]);
}

#[test]
fn test_position_at_track_sample_is_exact() {
    let track = track(&[
        (0.0, 42.360_1, -71.058_9),
        (7.0, 42.361_3, -71.057_7),
        (19.0, 42.362_9, -71.056_2),
        (31.0, 42.364_4, -71.054_8),
    ]);
    let gas = vec![gas_record(7.0, 1.0, 0.0), gas_record(19.0, 1.0, 0.0)];
    let particle = vec![particle_record(7.0, 1.0), particle_record(19.0, 1.0)];

    let table = merge(&gas, &particle, &track, &MergeConfig::default()).unwrap();
    assert_eq!(table.records()[0].latitude, 42.361_3);
    assert_eq!(table.records()[0].longitude, -71.057_7);
    assert_eq!(table.records()[1].latitude, 42.362_9);
    assert_eq!(table.records()[1].longitude, -71.056_2);
}

#[test]
fn test_row_count_mismatch_is_not_truncated() {
    let gas = vec![gas_record(5.0, 1.0, 0.0), gas_record(6.0, 1.0, 0.0)];
    let particle = vec![particle_record(5.0, 1.0)];

    let err = merge(&gas, &particle, &linear_track(), &MergeConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        AlignmentError::RowCountMismatch { gas: 2, particle: 1 }
    ));
}

#[test]
fn test_mismatch_introduced_by_trimming() {
    // The particle log starts one sample earlier, exactly on the track start
    let track = linear_track();
    let gas: Vec<_> = [3.0, 4.0].iter().map(|&t| gas_record(t, 1.0, 0.0)).collect();
    let particle: Vec<_> = [0.0, 3.0, 4.0].iter().map(|&t| particle_record(t, 1.0)).collect();

    let gas = trim_to_track(&gas, &track);
    let particle = trim_to_track(&particle, &track);
    assert_eq!(particle.len(), 2);
    assert!(merge(&gas, &particle, &track, &MergeConfig::default()).is_ok());

    let particle: Vec<_> = [3.0, 4.0, 5.0].iter().map(|&t| particle_record(t, 1.0)).collect();
    let particle = trim_to_track(&particle, &track);
    assert!(matches!(
        merge(&gas, &particle, &track, &MergeConfig::default()),
        Err(AlignmentError::RowCountMismatch { gas: 2, particle: 3 })
    ));
}

#[test]
fn test_timestamp_mismatch_reports_row() {
    let gas: Vec<_> = [5.0, 6.0, 7.0].iter().map(|&t| gas_record(t, 1.0, 0.0)).collect();
    let particle: Vec<_> = [5.0, 6.0, 8.0].iter().map(|&t| particle_record(t, 1.0)).collect();

    match merge(&gas, &particle, &linear_track(), &MergeConfig::default()) {
        Err(AlignmentError::TimestampMismatch { row, gas, particle, difference }) => {
            assert_eq!(row, 3);
            assert_eq!(gas, 7.0);
            assert_eq!(particle, 8.0);
            assert_eq!(difference, 1.0);
        }
        other => panic!("expected TimestampMismatch, got {other:?}"),
    }
}

#[test]
fn test_timestamps_within_tolerance() {
    let gas = vec![gas_record(5.0, 1.0, 0.0)];
    let particle = vec![particle_record(5.0 + 1e-7, 1.0)];
    assert!(check_alignment(&gas, &particle, DEFAULT_TIMESTAMP_TOLERANCE).is_ok());

    let particle = vec![particle_record(5.0 + 1e-5, 1.0)];
    assert!(check_alignment(&gas, &particle, DEFAULT_TIMESTAMP_TOLERANCE).is_err());
}

#[test]
fn test_empty_streams_merge_to_empty_table() {
    let table = merge(&[], &[], &linear_track(), &MergeConfig::default()).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.header().len(), 5);
}

#[test]
fn test_empty_track() {
    let gas = vec![gas_record(5.0, 1.0, 0.0)];
    let particle = vec![particle_record(5.0, 1.0)];
    let err = merge(&gas, &particle, &Track::from_samples(Vec::new()), &MergeConfig::default())
        .unwrap_err();
    assert!(matches!(err, AlignmentError::EmptyTrack));
}

#[test]
fn test_record_columns() {
    let record = MergedRecord {
        timestamp: 1.0,
        latitude: 2.0,
        longitude: 3.0,
        values: vec![4.0, 5.0],
    };
    assert_eq!(record.width(), 5);
    assert_eq!(record.column(0), Some(1.0));
    assert_eq!(record.column(2), Some(3.0));
    assert_eq!(record.column(4), Some(5.0));
    assert_eq!(record.column(5), None);

    let table = MergedTable::new(vec![Channel::No2, Channel::Pm2_5], vec![record]);
    assert_eq!(table.column_of(Channel::Pm2_5), Some(4));
    assert_eq!(table.column_of(Channel::Co), None);
}

#[test]
fn test_channel_names() {
    assert_eq!("co".parse::<Channel>().unwrap(), Channel::Co);
    assert_eq!("PM2.5".parse::<Channel>().unwrap(), Channel::Pm2_5);
    assert_eq!(Channel::Pm2_5.file_stem(), "PM2_5");
    assert!("benzene".parse::<Channel>().unwrap_err().contains("unknown channel"));

    for channel in Channel::ALL {
        assert_eq!(channel.name().parse::<Channel>().unwrap(), channel);
    }
}

#[test]
fn test_channel_values() {
    let gas = gas_record(0.0, 10.0, 3.0);
    let particle = particle_record(0.0, 55.0);

    // Default layout fixtures hold the column index in untouched channels
    assert_eq!(Channel::O3.value(&gas, &particle), 1.0);
    assert_eq!(Channel::Co2.value(&gas, &particle), 5.0);
    assert_eq!(Channel::Pm10.value(&gas, &particle), 22.0);
    assert_eq!(Channel::SmallConc.value(&gas, &particle), 55.0);
}
