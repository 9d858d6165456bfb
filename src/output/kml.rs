use std::error::Error;
use std::io::Write;
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::atomic::write_atomically;
use super::colormap::Rgb;
use super::{format_value, OutputError};
use crate::clock::WallClock;
use crate::merge::MergedTable;

/// KML 2.2 namespace
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Default KML line width
pub const DEFAULT_LINE_WIDTH: f64 = 4.0;

type EncodeResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Settings for one KML path
#[derive(Debug, Clone)]
pub struct KmlOptions {
    /// Document name (usually the channel name)
    pub name: String,
    /// Column of the merged record to visualise
    pub column: usize,
    /// Line width of every segment
    pub line_width: f64,
    /// Clock used to render the time in each description
    pub clock: WallClock,
}

/// Normalise `values` to their own `[min, max]`.
///
/// A constant (or empty) column maps every value to 0.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if range > 0.0 {
                (v - min) / range
            } else {
                0.0
            }
        })
        .collect()
}

/// Write one color-coded path for a column of the merged table.
///
/// Each pair of consecutive records becomes a `Placemark` with a two-point
/// `LineString`, colored by the first record's normalised value and labelled
/// with its raw value and time.
pub fn write_kml<W, C>(
    writer: W,
    table: &MergedTable,
    options: &KmlOptions,
    colormap: C,
    file_name: &str,
) -> Result<(), OutputError>
where
    W: Write,
    C: Fn(f64) -> Rgb,
{
    let values = column_values(table, options.column)?;
    encode(writer, table, &values, options, colormap).map_err(|source| OutputError::Kml {
        file: file_name.to_string(),
        source,
    })
}

/// Write a KML file, replacing it only on success
pub fn write_kml_file<P, C>(
    path: P,
    table: &MergedTable,
    options: &KmlOptions,
    colormap: C,
) -> Result<(), OutputError>
where
    P: AsRef<Path>,
    C: Fn(f64) -> Rgb,
{
    let path = path.as_ref();
    let file_name = path.display().to_string();
    column_values(table, options.column)?;
    write_atomically(path, |writer| {
        write_kml(writer, table, options, colormap, &file_name)
    })?;
    debug!(
        "{}: wrote {} segments for {}",
        file_name,
        table.len().saturating_sub(1),
        options.name
    );
    Ok(())
}

fn column_values(table: &MergedTable, column: usize) -> Result<Vec<f64>, OutputError> {
    let width = crate::merge::FIXED_COLUMNS.len() + table.channels().len();
    if column >= width {
        return Err(OutputError::Contract(format!(
            "column {column} is out of range for records with {width} columns"
        )));
    }
    table
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            r.column(column).ok_or_else(|| {
                OutputError::Contract(format!("record {} has no column {}", i + 1, column))
            })
        })
        .collect()
}

fn encode<W, C>(
    writer: W,
    table: &MergedTable,
    values: &[f64],
    options: &KmlOptions,
    colormap: C,
) -> EncodeResult<()>
where
    W: Write,
    C: Fn(f64) -> Rgb,
{
    let mut xml = Writer::new(writer);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    xml.write_event(Event::Text(BytesText::new("\n")))?;
    xml.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
    ))?;
    xml.write_event(Event::Start(BytesStart::new("Document")))?;
    text_element(&mut xml, "name", &options.name)?;
    xml.write_event(Event::Text(BytesText::new("\n")))?;

    let normalized = normalize(values);
    let records = table.records();
    let width = options.line_width.to_string();
    for (i, pair) in records.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let color = colormap(normalized[i]).kml_color();

        xml.write_event(Event::Start(BytesStart::new("Placemark")))?;
        text_element(
            &mut xml,
            "name",
            &format!("{} = {}", options.name, format_value(values[i])),
        )?;
        text_element(
            &mut xml,
            "description",
            &format!("time = {}", options.clock.render(from.timestamp)),
        )?;
        xml.write_event(Event::Start(BytesStart::new("LineString")))?;
        text_element(
            &mut xml,
            "coordinates",
            &format!(
                "{:.6},{:.6} {:.6},{:.6}",
                from.longitude, from.latitude, to.longitude, to.latitude
            ),
        )?;
        xml.write_event(Event::End(BytesEnd::new("LineString")))?;
        xml.write_event(Event::Start(BytesStart::new("Style")))?;
        xml.write_event(Event::Start(BytesStart::new("LineStyle")))?;
        text_element(&mut xml, "color", &color)?;
        text_element(&mut xml, "width", &width)?;
        xml.write_event(Event::End(BytesEnd::new("LineStyle")))?;
        xml.write_event(Event::End(BytesEnd::new("Style")))?;
        xml.write_event(Event::End(BytesEnd::new("Placemark")))?;
        xml.write_event(Event::Text(BytesText::new("\n")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("Document")))?;
    xml.write_event(Event::End(BytesEnd::new("kml")))?;
    xml.into_inner().flush()?;
    Ok(())
}

fn text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> EncodeResult<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
