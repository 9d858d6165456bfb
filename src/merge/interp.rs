//! Piecewise-linear interpolation with clamped boundaries.

use crate::track::Track;

/// Evaluate the piecewise-linear function through `(xs[i], ys[i])` at `x`.
///
/// `xs` must be non-decreasing and the same length as `ys`. Outside
/// `[xs[0], xs[n-1]]` the nearest endpoint value is returned. At a knot the
/// knot's own value is returned exactly; among duplicate knots the last one
/// wins. Returns NaN for empty input.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }

    // Index of the first knot strictly greater than x
    let upper = xs[..n].partition_point(|&knot| knot <= x);
    if upper == 0 {
        return ys[0];
    }
    if upper == n {
        return ys[n - 1];
    }

    let lower = upper - 1;
    let (x0, x1) = (xs[lower], xs[upper]);
    let (y0, y1) = (ys[lower], ys[upper]);
    if x == x0 {
        return y0;
    }
    let slope = (y1 - y0) / (x1 - x0);
    slope * (x - x0) + y0
}

/// Latitude and longitude of a track as functions of time
#[derive(Debug, Clone)]
pub struct TrackInterpolator {
    times: Vec<f64>,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl TrackInterpolator {
    /// Build the interpolation domain, sorting samples by time first.
    ///
    /// `None` for an empty track.
    pub fn new(track: &Track) -> Option<Self> {
        if track.is_empty() {
            return None;
        }
        let samples = if track.is_time_sorted() {
            track.samples().to_vec()
        } else {
            track.sorted_by_time()
        };
        Some(Self {
            times: samples.iter().map(|s| s.timestamp).collect(),
            latitudes: samples.iter().map(|s| s.latitude).collect(),
            longitudes: samples.iter().map(|s| s.longitude).collect(),
        })
    }

    /// `(latitude, longitude)` at time `t`
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        (
            interp(t, &self.times, &self.latitudes),
            interp(t, &self.times, &self.longitudes),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::track;

    #[test]
    fn test_midpoint() {
        assert_eq!(interp(5.0, &[0.0, 10.0], &[0.0, 1.0]), 0.5);
        assert_eq!(interp(2.5, &[0.0, 10.0], &[4.0, 0.0]), 3.0);
    }

    #[test]
    fn test_clamps_outside_domain() {
        let xs = [10.0, 20.0, 30.0];
        let ys = [1.0, 2.0, 5.0];
        assert_eq!(interp(-100.0, &xs, &ys), 1.0);
        assert_eq!(interp(31.0, &xs, &ys), 5.0);
    }

    #[test]
    fn test_exact_at_knots() {
        let xs = [0.0, 0.3, 0.7, 1.1];
        let ys = [0.1, 0.2, 0.35, 0.9];
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(interp(*x, &xs, ys.as_slice()), *y);
        }
    }

    #[test]
    fn test_duplicate_knots_take_last() {
        let xs = [0.0, 5.0, 5.0, 10.0];
        let ys = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(interp(5.0, &xs, &ys), 2.0);
        assert_eq!(interp(7.5, &xs, &ys), 2.5);
    }

    #[test]
    fn test_single_knot_is_constant() {
        assert_eq!(interp(-1.0, &[3.0], &[7.0]), 7.0);
        assert_eq!(interp(9.0, &[3.0], &[7.0]), 7.0);
        assert!(interp(0.0, &[], &[]).is_nan());
    }

    #[test]
    fn test_unsorted_track_is_sorted_first() {
        let track = track(&[(20.0, 2.0, 20.0), (0.0, 0.0, 0.0), (10.0, 1.0, 10.0)]);
        let positions = TrackInterpolator::new(&track).unwrap();
        assert_eq!(positions.position_at(15.0), (1.5, 15.0));
        assert_eq!(positions.position_at(20.0), (2.0, 20.0));
    }
}
