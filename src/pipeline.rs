//! End-to-end conversion: read, trim, merge, write.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::clock::WallClock;
use crate::merge::{merge, AlignmentError, Channel, MergeConfig, MergedTable};
use crate::output::{
    write_kml_file, write_table_file, Colormap, KmlOptions, OutputError, DEFAULT_LINE_WIDTH,
};
use crate::sensor::{
    GasLayout, GasRecord, ParticleLayout, ParticleRecord, SensorError, SensorReader,
};
use crate::track::{Track, TrackError};
use crate::trim::trim_to_track;

/// Errors that abort a conversion
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The track could not be read
    #[error(transparent)]
    Track(#[from] TrackError),

    /// A sensor log could not be read
    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// The sensor streams do not line up
    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    /// An output could not be written
    #[error(transparent)]
    Output(#[from] OutputError),

    /// No sensor row lies strictly inside the track's time span
    #[error("no sensor rows fall within the time span of {track}")]
    NoOverlap {
        /// Track file name
        track: String,
    },

    /// The configuration cannot produce a valid output
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// KML output settings
#[derive(Debug, Clone, PartialEq)]
pub struct KmlConfig {
    /// Colormap for normalised values
    pub colormap: Colormap,
    /// Segment line width
    pub line_width: f64,
}

impl Default for KmlConfig {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Everything that shapes a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Channel selection and timestamp tolerance
    pub merge: MergeConfig,
    /// How wall-clock text maps to epoch seconds
    pub clock: WallClock,
    /// KML settings; `None` skips KML output
    pub kml: Option<KmlConfig>,
    /// Column contract of the gas log
    pub gas_layout: GasLayout,
    /// Column contract of the particle log
    pub particle_layout: ParticleLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merge: MergeConfig::default(),
            clock: WallClock::default(),
            kml: Some(KmlConfig::default()),
            gas_layout: GasLayout::default(),
            particle_layout: ParticleLayout::default(),
        }
    }
}

impl PipelineConfig {
    /// Reject settings that would produce an unusable output
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.merge.channels.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one output channel is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.merge.channels.iter().find(|c| !seen.insert(**c)) {
            return Err(PipelineError::InvalidConfig(format!(
                "channel {dup} is selected more than once"
            )));
        }
        if !(self.merge.tolerance > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "timestamp tolerance must be positive, got {}",
                self.merge.tolerance
            )));
        }
        if let Some(kml) = &self.kml {
            if !(kml.line_width > 0.0) {
                return Err(PipelineError::InvalidConfig(format!(
                    "KML line width must be positive, got {}",
                    kml.line_width
                )));
            }
        }
        Ok(())
    }
}

/// Input and output locations
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    /// GPX track
    pub track: PathBuf,
    /// `D` log
    pub gas: PathBuf,
    /// `P` log
    pub particle: PathBuf,
    /// Output CSV; KML files are named after it
    pub output: PathBuf,
}

/// Summary of a completed conversion
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Track points read
    pub track_points: usize,
    /// Gas rows read
    pub gas_rows: usize,
    /// Particle rows read
    pub particle_rows: usize,
    /// Rows written to the table
    pub merged_rows: usize,
    /// KML files written
    pub kml_files: Vec<PathBuf>,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Merged {} rows ({} gas, {} particle read) against {} track points; {} KML files",
            self.merged_rows,
            self.gas_rows,
            self.particle_rows,
            self.track_points,
            self.kml_files.len()
        )
    }
}

/// KML path for `channel`: `<dir>/<output stem>_<channel>.kml`
pub fn kml_path(output: &Path, channel: Channel) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{}_{}.kml", stem, channel.file_stem()))
}

/// Read both sensor logs
#[cfg(not(feature = "parallel"))]
fn read_sensors(
    paths: &PipelinePaths,
    config: &PipelineConfig,
) -> Result<(Vec<GasRecord>, Vec<ParticleRecord>), PipelineError> {
    let gas = SensorReader::new(&config.gas_layout, config.clock).read_file(&paths.gas)?;
    let particle =
        SensorReader::new(&config.particle_layout, config.clock).read_file(&paths.particle)?;
    Ok((gas, particle))
}

/// Read both sensor logs concurrently
#[cfg(feature = "parallel")]
fn read_sensors(
    paths: &PipelinePaths,
    config: &PipelineConfig,
) -> Result<(Vec<GasRecord>, Vec<ParticleRecord>), PipelineError> {
    let (gas, particle) = rayon::join(
        || SensorReader::new(&config.gas_layout, config.clock).read_file(&paths.gas),
        || SensorReader::new(&config.particle_layout, config.clock).read_file(&paths.particle),
    );
    Ok((gas?, particle?))
}

/// Read, trim and merge without writing anything
pub fn build_table(
    paths: &PipelinePaths,
    config: &PipelineConfig,
) -> Result<(MergedTable, PipelineStats), PipelineError> {
    config.validate()?;

    let track = Track::from_file(&paths.track, config.clock)?;
    info!("Track: {} points from {}", track.len(), paths.track.display());

    let (gas, particle) = read_sensors(paths, config)?;
    info!("Gas log: {} rows from {}", gas.len(), paths.gas.display());
    info!(
        "Particle log: {} rows from {}",
        particle.len(),
        paths.particle.display()
    );

    let gas_trimmed = trim_to_track(&gas, &track);
    let particle_trimmed = trim_to_track(&particle, &track);
    if gas_trimmed.len() < gas.len() || particle_trimmed.len() < particle.len() {
        warn!(
            "Discarded {} gas and {} particle rows outside the track's time span",
            gas.len() - gas_trimmed.len(),
            particle.len() - particle_trimmed.len()
        );
    }

    let table = merge(&gas_trimmed, &particle_trimmed, &track, &config.merge)?;
    if table.is_empty() {
        return Err(PipelineError::NoOverlap {
            track: paths.track.display().to_string(),
        });
    }

    let stats = PipelineStats {
        track_points: track.len(),
        gas_rows: gas.len(),
        particle_rows: particle.len(),
        merged_rows: table.len(),
        kml_files: Vec::new(),
    };
    Ok((table, stats))
}

/// Run a full conversion and write every output
pub fn run(paths: &PipelinePaths, config: &PipelineConfig) -> Result<PipelineStats, PipelineError> {
    let (table, mut stats) = build_table(paths, config)?;

    write_table_file(&paths.output, &table.header(), &table, config.clock)?;
    info!("Table: {}", paths.output.display());

    if let Some(kml) = &config.kml {
        for &channel in table.channels() {
            let column = table.column_of(channel).ok_or_else(|| {
                PipelineError::InvalidConfig(format!("channel {channel} is not in the table"))
            })?;
            let path = kml_path(&paths.output, channel);
            let options = KmlOptions {
                name: channel.name().to_string(),
                column,
                line_width: kml.line_width,
                clock: config.clock,
            };
            write_kml_file(&path, &table, &options, |v| kml.colormap.rgb(v))?;
            info!("KML: {}", path.display());
            stats.kml_files.push(path);
        }
    }

    Ok(stats)
}
