//! Site and collection-unit text summaries.

use crate::document::Element;
use crate::error::Result;
use crate::flatten::Flattener;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for text report lines.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> Result<()>;
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Line sink writing `\n`-terminated lines.
pub struct TextSink<W: Write> {
    writer: W,
}

impl TextSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> LineSink for TextSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

fn coordinates(lat: f64, long: f64) -> String {
    format!("{lat:.6}N, {long:.6}E")
}

fn elevation(altitude: f64) -> String {
    format!("{}m relative to sea level.", altitude.trunc() as i64)
}

/// Lines of `site.txt`.
pub fn site_lines<S: LineSink + ?Sized>(root: Element<'_, '_>, sink: &mut S) -> Result<()> {
    let site = root.child("Site")?;

    sink.write_line(&coordinates(
        site.child_number("LatNorth")?,
        site.child_number("LongEast")?,
    ))?;
    sink.write_line(&elevation(site.child_number("Altitude")?))?;
    sink.write_line(&format!(
        "{}, {}.",
        site.child_text("Country")?,
        site.child_text("State")?
    ))?;
    sink.write_line(site.child_text("SiteDescription")?)
}

const COLLECTION_UNIT_LABELS: &[(&str, &str)] = &[
    ("Handle:    ", "Handle"),
    ("Name:      ", "CollectionName"),
    ("Type:      ", "CollectionType"),
    ("Device:    ", "CollectionDevice"),
    ("Substrate: ", "Substrate"),
    ("Depositional Environment: ", "DepositionalEnvironment"),
];

/// Lines of `collection_unit.txt`, collectors resolved through the contacts index.
pub fn collection_unit_lines<S: LineSink + ?Sized>(
    root: Element<'_, '_>,
    flattener: &Flattener<'_, '_, '_>,
    sink: &mut S,
) -> Result<()> {
    let unit = root.child("CollectionUnit")?;

    sink.write_line(&coordinates(
        unit.child_number("GPSLat")?,
        unit.child_number("GPSLong")?,
    ))?;
    sink.write_line(&elevation(unit.child_number("GPSAltitude")?))?;

    for (label, field) in COLLECTION_UNIT_LABELS {
        sink.write_line(&format!("{label}{}", unit.child_text(field)?))?;
    }

    for collector in flattener.collectors(unit.child("Collectors")?)? {
        sink.write_line(&format!("Collector: {collector}"))?;
    }

    Ok(())
}
