//! Writers for the individual report artifacts.

use crate::config::ConvertConfig;
use crate::document::{read_sparse_sheet, Element};
use crate::error::Result;
use crate::flatten::{
    check_analysis_unit, header, Field, Flattener, GEOCHRONOLOGY_FIELDS, LITHOLOGY_FIELDS,
    PUBLICATION_FIELDS,
};
use crate::index::EntityIndex;
use crate::metadata::{collection_unit_lines, site_lines, TextSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tilia_sheet::{CsvSink, GridLayout, GridReconstructor};

pub const SITE_FILE: &str = "site.txt";
pub const COLLECTION_UNIT_FILE: &str = "collection_unit.txt";
pub const GEOCHRONOLOGY_FILE: &str = "geochronology.csv";
pub const LITHOLOGY_FILE: &str = "lithology.csv";
pub const PUBLICATIONS_FILE: &str = "publications.csv";

/// Reconstruct the dense grid of `root` into a CSV file.
///
/// Returns the number of rows written.
pub fn write_grid_csv(root: Element<'_, '_>, layout: &GridLayout, path: &Path) -> Result<usize> {
    let sheet = read_sparse_sheet(root)?;
    let mut sink = CsvSink::create(path)?;
    let rows = GridReconstructor::new(layout).reconstruct(&sheet, &mut sink)?;
    sink.finish()?.flush()?;
    Ok(rows)
}

fn write_table<'a, 'input: 'a>(
    path: &Path,
    fields: &[Field],
    records: impl Iterator<Item = Element<'a, 'input>>,
    flattener: &Flattener<'_, '_, '_>,
) -> Result<usize> {
    let mut sink = CsvSink::create(path)?;
    sink.write_strings(&header(fields))?;

    let mut written = 0;
    for record in records {
        sink.write_strings(&flattener.flatten(record, fields)?)?;
        written += 1;
    }

    sink.finish()?.flush()?;
    Ok(written)
}

/// One row per sample of `GeochronDataset/Geochronology`.
pub fn write_geochronology_csv(
    root: Element<'_, '_>,
    flattener: &Flattener<'_, '_, '_>,
    expected_analysis_unit: &str,
    path: &Path,
) -> Result<usize> {
    let geochronology = root.child("GeochronDataset")?.child("Geochronology")?;
    check_analysis_unit(geochronology, expected_analysis_unit);
    write_table(path, GEOCHRONOLOGY_FIELDS, geochronology.children(), flattener)
}

/// One row per unit of `Lithology`.
pub fn write_lithology_csv(
    root: Element<'_, '_>,
    flattener: &Flattener<'_, '_, '_>,
    path: &Path,
) -> Result<usize> {
    let lithology = root.child("Lithology")?;
    write_table(path, LITHOLOGY_FIELDS, lithology.children(), flattener)
}

/// One row per indexed publication, in index order.
pub fn write_publications_csv(
    publications: &EntityIndex<Element<'_, '_>>,
    flattener: &Flattener<'_, '_, '_>,
    path: &Path,
) -> Result<usize> {
    write_table(path, PUBLICATION_FIELDS, publications.values().copied(), flattener)
}

fn write_text(
    path: &Path,
    write: impl FnOnce(&mut TextSink<BufWriter<File>>) -> Result<()>,
) -> Result<()> {
    let mut sink = TextSink::create(path)?;
    write(&mut sink)?;
    sink.finish()?;
    Ok(())
}

/// Write every report artifact of one document into `folder`.
///
/// The grid file is named `<stem>.csv`. Any error leaves `folder` partially
/// written; callers stage it and discard it on failure.
pub fn write_report(
    root: Element<'_, '_>,
    folder: &Path,
    stem: &str,
    config: &ConvertConfig,
) -> Result<()> {
    let rows = write_grid_csv(root, &config.grid, &folder.join(format!("{stem}.csv")))?;
    tracing::debug!("{stem}: {rows} grid rows");

    let contacts =
        EntityIndex::from_collection("contact", root.child("Contacts")?, config.duplicate_ids)?;
    let publications = EntityIndex::from_collection(
        "publication",
        root.child("Publications")?,
        config.duplicate_ids,
    )?;
    let flattener = Flattener::new(&contacts, &publications);

    write_text(&folder.join(SITE_FILE), |sink| site_lines(root, sink))?;
    write_text(&folder.join(COLLECTION_UNIT_FILE), |sink| {
        collection_unit_lines(root, &flattener, sink)
    })?;

    let samples = write_geochronology_csv(
        root,
        &flattener,
        &config.expected_analysis_unit,
        &folder.join(GEOCHRONOLOGY_FILE),
    )?;
    let units = write_lithology_csv(root, &flattener, &folder.join(LITHOLOGY_FILE))?;
    let cited =
        write_publications_csv(&publications, &flattener, &folder.join(PUBLICATIONS_FILE))?;

    tracing::debug!(
        "{stem}: {samples} geochronology samples, {units} lithology units, {cited} publications"
    );
    Ok(())
}
