//! # ari2track - geotagged air-quality tracks
//!
//! `ari2track` joins the two co-sampled logs of an ARISense air-quality
//! monitor with a GPS track recorded alongside it, and produces a merged
//! table plus color-coded KML paths for map viewers.
//!
//! ## Pipeline
//!
//! 1. **Track**: GPX 1.1 track points become `(time, lat, lon)` samples.
//! 2. **Sensors**: the `D` (gas) and `P` (particle) logs are checked against
//!    their fixed column layouts and parsed into named-field records.
//! 3. **Trim**: rows outside the open time interval spanned by the track are
//!    dropped.
//! 4. **Merge**: the gas and particle rows must line up row for row; each
//!    row gets a position by linear interpolation along the track, and the
//!    selected channels (e.g. CO work minus aux, small particle count) are
//!    derived from the pair.
//! 5. **Write**: a CSV table and one KML path per channel, each written to a
//!    temporary file and persisted only on success.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use ari2track::pipeline::{run, PipelineConfig, PipelinePaths};
//!
//! let paths = PipelinePaths {
//!     track: PathBuf::from("ride.gpx"),
//!     gas: PathBuf::from("D190514.csv"),
//!     particle: PathBuf::from("P190514.csv"),
//!     output: PathBuf::from("merged.csv"),
//! };
//! let stats = run(&paths, &PipelineConfig::default())?;
//! println!("{stats}");
//! # Ok::<(), ari2track::pipeline::PipelineError>(())
//! ```
//!
//! Each stage is usable on its own; see [`track`], [`sensor`], [`trim`],
//! [`merge`] and [`output`].

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod clock;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod sensor;
pub mod track;
pub mod trim;

#[cfg(test)]
mod test_support;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clock::WallClock;
    pub use crate::merge::{merge, Channel, MergeConfig, MergedRecord, MergedTable};
    pub use crate::output::{Colormap, KmlOptions};
    pub use crate::pipeline::{PipelineConfig, PipelineError, PipelinePaths, PipelineStats};
    pub use crate::sensor::{GasLayout, GasRecord, ParticleLayout, ParticleRecord, SensorReader};
    pub use crate::track::{Track, TrackSample};
    pub use crate::trim::{trim_to_track, TimeWindow};
}
