use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use ari2track::clock::WallClock;
use ari2track::merge::Channel;
use ari2track::output::Colormap;
use ari2track::pipeline::{self, KmlConfig, PipelineConfig, PipelinePaths};

use super::config::Config;

/// Arguments of the `merge` command
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// GPX track recorded alongside the monitor
    #[arg(short = 'g', long = "gpx", value_name = "TRACK")]
    pub track: PathBuf,

    /// Gas log (`D` rows)
    #[arg(short = 'd', long, value_name = "GAS")]
    pub gas: PathBuf,

    /// Particle log (`P` rows)
    #[arg(short = 'p', long, value_name = "PARTICLE")]
    pub particle: PathBuf,

    /// Output CSV; KML files are written next to it
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output channel (repeatable; default: CO and small_conc)
    #[arg(long = "channel", value_name = "NAME")]
    pub channels: Vec<Channel>,

    /// Time zone of the wall-clock timestamps (local, utc)
    #[arg(long)]
    pub clock: Option<WallClock>,

    /// KML colormap (jet, gray)
    #[arg(long)]
    pub colormap: Option<Colormap>,

    /// KML line width
    #[arg(long, value_name = "WIDTH")]
    pub line_width: Option<f64>,

    /// Largest tolerated gap between paired gas/particle timestamps (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub tolerance: Option<f64>,

    /// Skip KML output
    #[arg(long)]
    pub no_kml: bool,
}

impl MergeArgs {
    /// Defaults, then the config file, then command-line flags
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::default();
        if let Some(path) = &self.config {
            Config::from_file(path)?.apply(&mut config);
        }

        if !self.channels.is_empty() {
            config.merge.channels = self.channels.clone();
        }
        if let Some(tolerance) = self.tolerance {
            config.merge.tolerance = tolerance;
        }
        if let Some(clock) = self.clock {
            config.clock = clock;
        }

        if self.no_kml {
            config.kml = None;
        } else if self.colormap.is_some() || self.line_width.is_some() {
            let kml = config.kml.get_or_insert_with(KmlConfig::default);
            if let Some(colormap) = self.colormap {
                kml.colormap = colormap;
            }
            if let Some(line_width) = self.line_width {
                kml.line_width = line_width;
            }
        }
        Ok(config)
    }

    fn paths(&self) -> PipelinePaths {
        PipelinePaths {
            track: self.track.clone(),
            gas: self.gas.clone(),
            particle: self.particle.clone(),
            output: self.output.clone(),
        }
    }
}

/// Merge the sensor logs with the track and write the outputs
pub fn run(args: MergeArgs) -> Result<()> {
    for input in [&args.track, &args.gas, &args.particle] {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
    }

    let config = args.pipeline_config()?;

    info!("ari2track - sensor logs to geotagged track");
    info!("==========================================");
    info!("Track:    {}", args.track.display());
    info!("Gas:      {}", args.gas.display());
    info!("Particle: {}", args.particle.display());
    info!("Output:   {}", args.output.display());
    info!(
        "Channels: {}",
        config
            .merge
            .channels
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("Clock:    {}", config.clock);
    match &config.kml {
        Some(kml) => info!("KML:      {} colormap, width {}", kml.colormap, kml.line_width),
        None => info!("KML:      disabled"),
    }

    let stats = pipeline::run(&args.paths(), &config).context("Merge failed")?;

    info!("Merge complete!");
    info!("  {}", stats);
    info!("  Table: {}", args.output.display());
    for path in &stats.kml_files {
        info!("  KML:   {}", path.display());
    }

    Ok(())
}
