//! Colormaps from normalised values to RGB.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::merge::interp;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// KML `aabbggrr` notation, fully opaque
    pub fn kml_color(&self) -> String {
        format!("ff{:02x}{:02x}{:02x}", self.b, self.g, self.r)
    }
}

/// Segment data of one color channel: knot positions and values
struct Segments {
    x: &'static [f64],
    y: &'static [f64],
}

const JET_RED: Segments = Segments {
    x: &[0.0, 0.35, 0.66, 0.89, 1.0],
    y: &[0.0, 0.0, 1.0, 1.0, 0.5],
};
const JET_GREEN: Segments = Segments {
    x: &[0.0, 0.125, 0.375, 0.64, 0.91, 1.0],
    y: &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
};
const JET_BLUE: Segments = Segments {
    x: &[0.0, 0.11, 0.34, 0.65, 1.0],
    y: &[0.5, 1.0, 1.0, 0.0, 0.0],
};

/// Supported colormaps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Blue through cyan, yellow and red
    #[default]
    Jet,
    /// Black to white
    Gray,
}

impl Colormap {
    /// Color for a value in `[0, 1]`; values outside are clamped
    pub fn rgb(self, value: f64) -> Rgb {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        match self {
            Colormap::Jet => Rgb {
                r: to_byte(channel(&JET_RED, v)),
                g: to_byte(channel(&JET_GREEN, v)),
                b: to_byte(channel(&JET_BLUE, v)),
            },
            Colormap::Gray => {
                let level = to_byte(v);
                Rgb {
                    r: level,
                    g: level,
                    b: level,
                }
            }
        }
    }
}

fn channel(segments: &Segments, v: f64) -> f64 {
    interp(v, segments.x, segments.y)
}

fn to_byte(intensity: f64) -> u8 {
    (intensity * 255.0) as u8
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colormap::Jet => write!(f, "jet"),
            Colormap::Gray => write!(f, "gray"),
        }
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jet" => Ok(Colormap::Jet),
            "gray" | "grey" => Ok(Colormap::Gray),
            other => Err(format!("unknown colormap '{other}' (expected 'jet' or 'gray')")),
        }
    }
}
