use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ari2track::clock::WallClock;

mod config;
mod info;
mod merge;

use merge::MergeArgs;

/// ari2track - merge ARISense sensor logs with a GPS track
#[derive(Parser)]
#[command(name = "ari2track")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge gas and particle logs with a GPX track into a CSV table and KML paths
    Merge(MergeArgs),

    /// Display sample counts and time spans of input files
    Info {
        /// GPX track
        #[arg(short = 'g', long = "gpx", value_name = "TRACK")]
        track: Option<PathBuf>,

        /// Gas log (`D` rows)
        #[arg(short = 'd', long, value_name = "GAS")]
        gas: Option<PathBuf>,

        /// Particle log (`P` rows)
        #[arg(short = 'p', long, value_name = "PARTICLE")]
        particle: Option<PathBuf>,

        /// Time zone of the wall-clock timestamps (local, utc)
        #[arg(long, default_value_t = WallClock::Local)]
        clock: WallClock,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => merge::run(args),
        Commands::Info {
            track,
            gas,
            particle,
            clock,
        } => info::run(track, gas, particle, clock),
    }
}
