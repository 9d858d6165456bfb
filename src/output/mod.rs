//! # Output Writers
//!
//! Two independent consumers of a [`MergedTable`](crate::merge::MergedTable):
//!
//! - **CSV table**: one header row (`time, lat, lon, <channels>`) and one
//!   row per merged record, timestamps rendered as ISO-8601 with a `Z`.
//! - **KML path**: one document per visualised channel, made of two-point
//!   line segments colored by the channel's normalised value.
//!
//! Files are written through a temporary file in the destination directory
//! and moved into place only when complete.

mod atomic;
mod colormap;
mod error;
mod kml;
mod table;


pub use colormap::{Colormap, Rgb};
pub use error::OutputError;
pub use kml::{normalize, write_kml, write_kml_file, KmlOptions, DEFAULT_LINE_WIDTH, KML_NAMESPACE};
pub use table::{write_table, write_table_file};

/// Decimal rendering shared by both writers (`7.0`, `0.125`, `42.3601`)
pub(crate) fn format_value(value: f64) -> String {
    format!("{value:?}")
}
