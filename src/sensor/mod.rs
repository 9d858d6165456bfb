//! # ARISense Log Reader
//!
//! ARISense units write two comma-separated logs per deployment: `D` rows
//! (gas and environmental channels) and `P` rows (optical particle counter).
//! Both share the same leading columns:
//!
//! | column | content                            |
//! |--------|------------------------------------|
//! | 0      | type tag (`D` or `P`)              |
//! | 1      | timestamp `MM/DD/YYYY HH:MM:SS`    |
//! | 2..    | fixed-offset numeric channels      |
//!
//! Each row is checked against the fixed column count and tag of its kind
//! and converted into a [`GasRecord`] or [`ParticleRecord`].
//!
//! ```rust,no_run
//! use ari2track::clock::WallClock;
//! use ari2track::sensor::{GasLayout, SensorReader};
//!
//! let layout = GasLayout::default();
//! let rows = SensorReader::new(&layout, WallClock::Local).read_file("unit42_D.csv")?;
//! println!("CO at first row: {}", rows[0].co.differential());
//! # Ok::<(), ari2track::sensor::SensorError>(())
//! ```

mod error;
mod layout;
mod reader;
mod records;


pub use error::SensorError;
pub use layout::{GasLayout, PairColumns, ParticleLayout, SensorKind, SensorLayout};
pub use reader::{SensorReader, SENSOR_TIME_FORMAT};
pub use records::{ElectrodePair, GasRecord, ParticleRecord, SensorRecord, OPC_BIN_COUNT};
