//! # ari2track
//!
//! Command-line front end: merges ARISense gas and particle logs with a GPX
//! track into a CSV table and color-coded KML paths.
//!
//! ## Usage
//!
//! ```bash
//! # Merge with the default channels (CO, small_conc)
//! ari2track -v merge -g ride.gpx -d D190514.csv -p P190514.csv -o merged.csv
//!
//! # Pick channels, timestamps recorded in UTC
//! ari2track merge -g ride.gpx -d D.csv -p P.csv -o merged.csv \
//!     --channel NO2 --channel PM2.5 --clock utc
//!
//! # Inspect inputs
//! ari2track info -g ride.gpx -d D190514.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
