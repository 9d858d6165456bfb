//! Wall-clock interpretation of naive timestamps.
//!
//! Neither ARISense logs nor the GPX track are read with a real time zone:
//! both carry wall-clock text that is mapped onto a single epoch axis through
//! one [`WallClock`]. Rendering goes back through the same clock and appends
//! a `Z`, so the output text matches the input wall-clock text whichever
//! clock is chosen.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use serde::Deserialize;

/// Rendering format for output timestamps (ISO-8601 with optional fraction).
const RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// How naive wall-clock timestamps map to epoch seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallClock {
    /// Interpret wall-clock text in the host's local time zone.
    ///
    /// The `Z` suffix on GPX times is ignored and rendered output carries a
    /// `Z` even though it is local time.
    #[default]
    Local,
    /// Interpret wall-clock text as UTC.
    Utc,
}

impl WallClock {
    /// Convert a naive wall-clock time to epoch seconds.
    ///
    /// On the local clock an ambiguous time (DST fall-back) takes the earlier
    /// instant, and a time skipped by a spring-forward transition is read
    /// with the offset in effect before the transition. Returns `None` only
    /// when the local zone cannot be resolved at all.
    pub fn to_epoch(self, naive: &NaiveDateTime) -> Option<f64> {
        let (secs, nanos) = match self {
            WallClock::Local => {
                let dt = match Local.from_local_datetime(naive).earliest() {
                    Some(dt) => dt.fixed_offset(),
                    None => resolve_skipped(&Local, naive)?,
                };
                (dt.timestamp(), dt.timestamp_subsec_nanos())
            }
            WallClock::Utc => {
                let dt = Utc.from_utc_datetime(naive);
                (dt.timestamp(), dt.timestamp_subsec_nanos())
            }
        };
        Some(secs as f64 + f64::from(nanos) * 1e-9)
    }

    /// Render epoch seconds as `YYYY-MM-DDTHH:MM:SS[.fff]Z` on this clock.
    pub fn render(self, epoch: f64) -> String {
        let secs = epoch.floor();
        let nanos = ((epoch - secs) * 1e9).round().min(999_999_999.0) as u32;
        let Some(utc) = DateTime::<Utc>::from_timestamp(secs as i64, nanos) else {
            return format!("{epoch}");
        };
        let naive = match self {
            WallClock::Local => utc.with_timezone(&Local).naive_local(),
            WallClock::Utc => utc.naive_utc(),
        };
        format!("{}Z", naive.format(RENDER_FORMAT))
    }
}

/// Place a wall-clock time that falls in a forward gap of `tz` using the
/// offset from one day earlier.
fn resolve_skipped<Tz: TimeZone>(
    tz: &Tz,
    naive: &NaiveDateTime,
) -> Option<DateTime<FixedOffset>> {
    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
    let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
    offset.from_local_datetime(naive).single()
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallClock::Local => write!(f, "local"),
            WallClock::Utc => write!(f, "utc"),
        }
    }
}

impl FromStr for WallClock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(WallClock::Local),
            "utc" => Ok(WallClock::Utc),
            other => Err(format!("unknown clock '{other}' (expected 'local' or 'utc')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 5, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_utc_epoch() {
        let t = WallClock::Utc.to_epoch(&naive(0, 0, 0)).unwrap();
        assert_eq!(t, 1_557_792_000.0);
    }

    #[test]
    fn test_utc_render_appends_z() {
        assert_eq!(WallClock::Utc.render(1_557_792_000.0), "2019-05-14T00:00:00Z");
        assert_eq!(WallClock::Utc.render(0.5), "1970-01-01T00:00:00.500Z");
    }

    #[test]
    fn test_render_returns_wall_clock_text() {
        for clock in [WallClock::Local, WallClock::Utc] {
            let t = clock.to_epoch(&naive(13, 45, 7)).unwrap();
            assert_eq!(clock.render(t), "2019-05-14T13:45:07Z");
        }
    }

    #[test]
    fn test_skipped_time_uses_earlier_offset() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let gap = NaiveDate::from_ymd_opt(2019, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let dt = resolve_skipped(&est, &gap).unwrap();
        assert_eq!(dt.timestamp(), 1_552_203_000);
    }

    #[test]
    fn test_parse_clock_names() {
        assert_eq!("UTC".parse::<WallClock>().unwrap(), WallClock::Utc);
        assert_eq!("local".parse::<WallClock>().unwrap(), WallClock::Local);
        assert!("gmt".parse::<WallClock>().is_err());
    }
}
