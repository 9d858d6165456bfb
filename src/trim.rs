//! Time-window trimming of sensor rows against a track.

use log::debug;

use crate::sensor::SensorRecord;
use crate::track::Track;

/// Open time interval `(start, end)` in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    /// Exclusive lower bound
    pub start: f64,
    /// Exclusive upper bound
    pub end: f64,
}

impl TimeWindow {
    /// Smallest window bounding every time in `times`, in any order.
    /// `None` when there are no times.
    pub fn spanning<I: IntoIterator<Item = f64>>(times: I) -> Option<Self> {
        let mut times = times.into_iter();
        let first = times.next()?;
        let (start, end) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { start, end })
    }

    /// Span of a sensor log, whatever its row order
    pub fn of_records<T: SensorRecord>(rows: &[T]) -> Option<Self> {
        Self::spanning(rows.iter().map(T::timestamp))
    }

    /// Span of a track from its earliest to latest sample, whatever the
    /// sample order. `None` for an empty track.
    pub fn of_track(track: &Track) -> Option<Self> {
        track
            .time_span()
            .map(|(start, end)| Self { start, end })
    }

    /// Whether `t` lies strictly inside the window
    pub fn contains(&self, t: f64) -> bool {
        self.start < t && t < self.end
    }
}

/// Keep rows strictly inside `window`, preserving order.
///
/// Rows stamped exactly at either bound are dropped.
pub fn trim_to_window<T: SensorRecord + Clone>(rows: &[T], window: TimeWindow) -> Vec<T> {
    let kept: Vec<T> = rows
        .iter()
        .filter(|row| window.contains(row.timestamp()))
        .cloned()
        .collect();
    debug!(
        "trimmed {} of {} rows outside ({}, {})",
        rows.len() - kept.len(),
        rows.len(),
        window.start,
        window.end
    );
    kept
}

/// Keep rows strictly inside the track's time span.
///
/// An empty track keeps nothing.
pub fn trim_to_track<T: SensorRecord + Clone>(rows: &[T], track: &Track) -> Vec<T> {
    match TimeWindow::of_track(track) {
        Some(window) => trim_to_window(rows, window),
        None => Vec::new(),
    }
}
