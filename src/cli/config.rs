//! TOML configuration file support.
//!
//! Settings that rarely change between runs can live in a config file
//! instead of on the command line:
//!
//! ```toml
//! # ari2track.toml
//! [merge]
//! channels = ["CO", "NO2", "PM2.5"]
//! tolerance = 1e-6
//! clock = "utc"
//!
//! [kml]
//! enabled = true
//! colormap = "gray"
//! line_width = 3
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use ari2track::clock::WallClock;
use ari2track::merge::Channel;
use ari2track::output::Colormap;
use ari2track::pipeline::PipelineConfig;

/// Root configuration structure for ari2track.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Merge settings.
    #[serde(default)]
    pub merge: MergeSection,

    /// KML output settings.
    #[serde(default)]
    pub kml: KmlSection,
}

/// The `[merge]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeSection {
    /// Output channels, in column order.
    pub channels: Option<Vec<Channel>>,

    /// Largest tolerated gap between paired gas/particle timestamps (seconds).
    pub tolerance: Option<f64>,

    /// Clock used to read and render wall-clock timestamps.
    pub clock: Option<WallClock>,
}

/// The `[kml]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KmlSection {
    /// Write one KML file per channel.
    pub enabled: Option<bool>,

    /// Colormap for normalised values.
    pub colormap: Option<Colormap>,

    /// Segment line width.
    pub line_width: Option<f64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Overlay the values present in the file onto `config`.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(channels) = &self.merge.channels {
            config.merge.channels = channels.clone();
        }
        if let Some(tolerance) = self.merge.tolerance {
            config.merge.tolerance = tolerance;
        }
        if let Some(clock) = self.merge.clock {
            config.clock = clock;
        }

        if self.kml.enabled == Some(false) {
            config.kml = None;
            return;
        }
        let mut kml = config.kml.take().unwrap_or_default();
        if let Some(colormap) = self.kml.colormap {
            kml.colormap = colormap;
        }
        if let Some(line_width) = self.kml.line_width {
            kml.line_width = line_width;
        }
        config.kml = Some(kml);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ari2track::pipeline::KmlConfig;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [merge]
            channels = ["CO", "no2", "PM2.5"]
            tolerance = 0.5
            clock = "utc"

            [kml]
            enabled = true
            colormap = "gray"
            line_width = 3
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.merge.channels,
            Some(vec![Channel::Co, Channel::No2, Channel::Pm2_5])
        );
        assert_eq!(config.merge.tolerance, Some(0.5));
        assert_eq!(config.merge.clock, Some(WallClock::Utc));
        assert_eq!(config.kml.enabled, Some(true));
        assert_eq!(config.kml.colormap, Some(Colormap::Gray));
        assert_eq!(config.kml.line_width, Some(3.0));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [kml]
            colormap = "gray"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.merge.channels, None);

        let mut pipeline = PipelineConfig::default();
        config.apply(&mut pipeline);
        assert_eq!(pipeline.merge, PipelineConfig::default().merge);
        let kml = pipeline.kml.unwrap();
        assert_eq!(kml.colormap, Colormap::Gray);
        assert_eq!(kml.line_width, KmlConfig::default().line_width);
    }

    #[test]
    fn test_disable_kml() {
        let config = Config::from_str("[kml]\nenabled = false\n").unwrap();
        let mut pipeline = PipelineConfig::default();
        config.apply(&mut pipeline);
        assert!(pipeline.kml.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        let mut pipeline = PipelineConfig::default();
        config.apply(&mut pipeline);
        assert_eq!(pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let toml = r#"
            [merge]
            channels = ["benzene"]
        "#;
        let err = Config::from_str(toml).unwrap_err();
        assert!(format!("{err:#}").contains("unknown channel"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[merge]\nchanels = [\"CO\"]\n").is_err());
    }
}
