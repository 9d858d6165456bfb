use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use ari2track::clock::WallClock;
use ari2track::sensor::{GasLayout, ParticleLayout, SensorReader};
use ari2track::track::Track;
use ari2track::trim::TimeWindow;

/// Sample count and time span of one input
struct Summary {
    label: &'static str,
    file: PathBuf,
    count: usize,
    span: Option<TimeWindow>,
}

impl Summary {
    fn render(&self, clock: WallClock) -> String {
        let span = match self.span {
            Some(window) => format!(
                "{} .. {} ({:.0} s)",
                clock.render(window.start),
                clock.render(window.end),
                window.end - window.start
            ),
            None => "-".to_string(),
        };

        format!(
            "{}: {}\n  samples: {}\n  span:    {}",
            styled_label(self.label),
            self.file.display(),
            styled_count(self.count),
            span
        )
    }
}

#[cfg(feature = "colorized_output")]
fn styled_label(label: &str) -> String {
    console::style(label).bold().cyan().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn styled_label(label: &str) -> String {
    label.to_string()
}

#[cfg(feature = "colorized_output")]
fn styled_count(count: usize) -> String {
    console::style(count).green().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn styled_count(count: usize) -> String {
    count.to_string()
}

fn track_summary(path: &Path, clock: WallClock) -> Result<Summary> {
    let track = Track::from_file(path, clock)
        .with_context(|| format!("Failed to read track: {}", path.display()))?;
    Ok(Summary {
        label: "Track",
        file: path.to_path_buf(),
        count: track.len(),
        span: TimeWindow::of_track(&track),
    })
}

fn gas_summary(path: &Path, clock: WallClock) -> Result<Summary> {
    let records = SensorReader::new(&GasLayout::default(), clock)
        .read_file(path)
        .with_context(|| format!("Failed to read gas log: {}", path.display()))?;
    Ok(Summary {
        label: "Gas",
        file: path.to_path_buf(),
        count: records.len(),
        span: TimeWindow::of_records(&records),
    })
}

fn particle_summary(path: &Path, clock: WallClock) -> Result<Summary> {
    let records = SensorReader::new(&ParticleLayout::default(), clock)
        .read_file(path)
        .with_context(|| format!("Failed to read particle log: {}", path.display()))?;
    Ok(Summary {
        label: "Particle",
        file: path.to_path_buf(),
        count: records.len(),
        span: TimeWindow::of_records(&records),
    })
}

/// Print sample counts and time spans of the given inputs
pub fn run(
    track: Option<PathBuf>,
    gas: Option<PathBuf>,
    particle: Option<PathBuf>,
    clock: WallClock,
) -> Result<()> {
    if track.is_none() && gas.is_none() && particle.is_none() {
        anyhow::bail!("Nothing to inspect: pass at least one of -g, -d, -p");
    }

    let mut summaries = Vec::new();
    if let Some(path) = &track {
        summaries.push(track_summary(path, clock)?);
    }
    if let Some(path) = &gas {
        summaries.push(gas_summary(path, clock)?);
    }
    if let Some(path) = &particle {
        summaries.push(particle_summary(path, clock)?);
    }

    println!("ari2track Input Information");
    println!("===========================");
    for summary in &summaries {
        println!("{}", summary.render(clock));
    }
    Ok(())
}
