//! # GPX Track Reader
//!
//! Pull-based reader for GPX files. Every `trkpt` element (GPX 1.0 or 1.1,
//! matched by local name) becomes one [`TrackSample`], in document order.
//!
//! ```rust,no_run
//! use ari2track::clock::WallClock;
//! use ari2track::track::Track;
//!
//! let track = Track::from_file("walk.gpx", WallClock::Utc)?;
//! println!("{} samples", track.len());
//! # Ok::<(), ari2track::track::TrackError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::clock::WallClock;
use crate::trim::TimeWindow;

pub use error::TrackError;

mod error;


/// Format of the text inside a GPX `<time>` element
pub const GPX_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One GPS fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    /// Epoch seconds
    pub timestamp: f64,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
}

/// An ordered GPS track
///
/// Samples keep the order in which they appear in the source file; they are
/// usually but not necessarily sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    samples: Vec<TrackSample>,
}

impl Track {
    /// Build a track from samples already in memory
    pub fn from_samples(samples: Vec<TrackSample>) -> Self {
        Self { samples }
    }

    /// Read a GPX file
    pub fn from_file<P: AsRef<Path>>(path: P, clock: WallClock) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let file = File::open(path).map_err(|source| TrackError::Io {
            file: file_name.clone(),
            source,
        })?;
        GpxReader::new(BufReader::new(file), file_name, clock).read_track()
    }

    /// Read GPX from any buffered source; `file_name` labels errors
    pub fn from_reader<R: BufRead>(
        reader: R,
        file_name: impl Into<String>,
        clock: WallClock,
    ) -> Result<Self, TrackError> {
        GpxReader::new(reader, file_name.into(), clock).read_track()
    }

    /// Samples in source order
    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the track has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether timestamps are non-decreasing in source order
    pub fn is_time_sorted(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }

    /// Earliest and latest timestamp, independent of sample order
    pub fn time_span(&self) -> Option<(f64, f64)> {
        TimeWindow::spanning(self.samples.iter().map(|s| s.timestamp))
            .map(|window| (window.start, window.end))
    }

    /// Samples sorted by timestamp (stable, so ties keep source order)
    pub fn sorted_by_time(&self) -> Vec<TrackSample> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        sorted
    }
}

/// A `trkpt` whose children are still being read
struct PendingPoint {
    latitude: f64,
    longitude: f64,
    time: Option<String>,
    depth: usize,
    in_time: bool,
}

/// Streaming GPX reader
pub struct GpxReader<R: BufRead> {
    reader: Reader<R>,
    file_name: String,
    clock: WallClock,
    points_seen: usize,
}

impl<R: BufRead> GpxReader<R> {
    /// Create a reader; `file_name` is used in error messages
    pub fn new(reader: R, file_name: String, clock: WallClock) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);
        Self {
            reader: xml_reader,
            file_name,
            clock,
            points_seen: 0,
        }
    }

    /// Read every track point in the document
    pub fn read_track(mut self) -> Result<Track, TrackError> {
        let mut samples = Vec::new();
        let mut pending: Option<PendingPoint> = None;
        let mut buf = Vec::new();

        loop {
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?;
            match event {
                Event::Start(ref e) => match pending {
                    Some(ref mut point) => {
                        point.depth += 1;
                        if point.depth == 2 && e.local_name().as_ref() == b"time" {
                            point.in_time = true;
                        }
                    }
                    None if e.local_name().as_ref() == b"trkpt" => {
                        pending = Some(self.start_point(e)?);
                    }
                    None => {}
                },
                Event::Empty(ref e) => {
                    if pending.is_none() && e.local_name().as_ref() == b"trkpt" {
                        // A self-closing trkpt cannot carry a <time> child
                        self.start_point(e)?;
                        return Err(TrackError::MissingTime {
                            file: self.file_name.clone(),
                            point: self.points_seen,
                        });
                    }
                }
                Event::Text(ref t) => {
                    if let Some(point) = pending.as_mut().filter(|p| p.in_time) {
                        let text = t.unescape().map_err(|e| self.xml_error(e))?;
                        point.time.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::End(_) => {
                    if let Some(mut point) = pending.take() {
                        if point.depth == 1 {
                            samples.push(self.finish_point(point)?);
                        } else {
                            if point.depth == 2 {
                                point.in_time = false;
                            }
                            point.depth -= 1;
                            pending = Some(point);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if samples.is_empty() {
            return Err(TrackError::Empty {
                file: self.file_name,
            });
        }

        let track = Track::from_samples(samples);
        if !track.is_time_sorted() {
            warn!(
                "{}: track points are not in time order; they will be sorted for interpolation",
                self.file_name
            );
        }
        debug!("{}: read {} track points", self.file_name, track.len());
        Ok(track)
    }

    fn start_point(&mut self, e: &BytesStart) -> Result<PendingPoint, TrackError> {
        self.points_seen += 1;
        let latitude = self.coordinate(e, "lat")?;
        let longitude = self.coordinate(e, "lon")?;
        Ok(PendingPoint {
            latitude,
            longitude,
            time: None,
            depth: 1,
            in_time: false,
        })
    }

    fn finish_point(&self, point: PendingPoint) -> Result<TrackSample, TrackError> {
        let raw = point
            .time
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TrackError::MissingTime {
                file: self.file_name.clone(),
                point: self.points_seen,
            })?;
        let invalid = || TrackError::InvalidTimestamp {
            file: self.file_name.clone(),
            point: self.points_seen,
            raw: raw.clone(),
        };
        let naive = NaiveDateTime::parse_from_str(raw.trim(), GPX_TIME_FORMAT).map_err(|_| invalid())?;
        let timestamp = self.clock.to_epoch(&naive).ok_or_else(invalid)?;
        Ok(TrackSample {
            timestamp,
            latitude: point.latitude,
            longitude: point.longitude,
        })
    }

    fn coordinate(&self, e: &BytesStart, name: &'static str) -> Result<f64, TrackError> {
        let raw = self
            .attribute(e, name)?
            .ok_or_else(|| TrackError::MissingAttribute {
                file: self.file_name.clone(),
                point: self.points_seen,
                name,
            })?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| TrackError::InvalidCoordinate {
                file: self.file_name.clone(),
                point: self.points_seen,
                name,
                raw,
            })
    }

    fn attribute(&self, e: &BytesStart, name: &str) -> Result<Option<String>, TrackError> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.xml_error(quick_xml::Error::from(err)))?;
            if attr.key.local_name().as_ref() == name.as_bytes() {
                return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
            }
        }
        Ok(None)
    }

    fn xml_error(&self, source: quick_xml::Error) -> TrackError {
        TrackError::Xml {
            file: self.file_name.clone(),
            source,
        }
    }
}
