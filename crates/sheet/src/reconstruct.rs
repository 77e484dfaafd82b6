//! Sparse to dense grid reconstruction.

use crate::cell::CellValue;
use crate::error::Result;
use crate::layout::GridLayout;
use crate::sink::RowSink;
use crate::sparse::{SparseCell, SparseColumn, SparseSheet};

/// Rebuilds dense rows from a [`SparseSheet`] according to a [`GridLayout`].
///
/// The first visited column fixes the canonical width for the whole sheet;
/// later columns are padded or truncated to it. Every emitted row therefore
/// has `layout.kept_width(width)` values.
#[derive(Debug, Clone, Copy)]
pub struct GridReconstructor<'a> {
    layout: &'a GridLayout,
}

impl<'a> GridReconstructor<'a> {
    #[must_use]
    pub fn new(layout: &'a GridLayout) -> Self {
        Self { layout }
    }

    /// Stream one dense row per kept column into `sink`.
    ///
    /// Returns the number of rows written.
    pub fn reconstruct<S: RowSink + ?Sized>(
        &self,
        sheet: &SparseSheet,
        sink: &mut S,
    ) -> Result<usize> {
        let columns = sheet.ordered_columns();
        let Some(first) = columns.first() else {
            return Ok(0);
        };
        let width = first.max_row();

        let mut previous: u32 = 0;
        let mut written = 0;
        for column in columns {
            if column.position > previous.saturating_add(1) {
                tracing::debug!(
                    "Column positions {}..{} absent from sheet",
                    previous + 1,
                    column.position
                );
            }
            // Skipped columns still advance the counter so they never read as a gap.
            previous = column.position;

            if self.layout.skips_column(column.position) {
                continue;
            }

            let row = self.dense_row(column, width);
            sink.write_row(&row)?;
            written += 1;
        }

        Ok(written)
    }

    /// Collect the reconstructed grid in memory.
    pub fn rows(&self, sheet: &SparseSheet) -> Result<Vec<Vec<CellValue>>> {
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        self.reconstruct(sheet, &mut rows)?;
        Ok(rows)
    }

    /// Build the dense row for one column at the given canonical width.
    #[must_use]
    pub fn dense_row(&self, column: &SparseColumn, width: u32) -> Vec<CellValue> {
        let mut cells: Vec<&SparseCell> = column.cells.iter().collect();
        cells.sort_by_key(|cell| cell.row);

        let mut row = Vec::with_capacity(self.layout.kept_width(width));
        let mut previous: u32 = 0;
        for cell in cells {
            if cell.row == 0 {
                tracing::warn!("Column {}: ignoring cell at row position 0", column.position);
                continue;
            }
            if cell.row > width {
                tracing::debug!(
                    "Column {}: truncating cells past row position {width}",
                    column.position
                );
                break;
            }
            if cell.row <= previous {
                tracing::warn!(
                    "Column {}: duplicate cell at row position {}",
                    column.position,
                    cell.row
                );
                continue;
            }

            self.fill(column.position, previous + 1..cell.row, &mut row);
            previous = cell.row;

            if !self.layout.skips_row(cell.row) {
                row.push(CellValue::resolve(&cell.payload));
            }
        }
        self.fill(column.position, previous + 1..=width, &mut row);

        row
    }

    /// Fill value for a missing position.
    #[must_use]
    pub fn fill_value(&self, column: u32, row: u32) -> CellValue {
        if self.layout.data_origin.contains(column, row) {
            CellValue::Int(0)
        } else {
            CellValue::blank()
        }
    }

    fn fill(&self, column: u32, rows: impl Iterator<Item = u32>, out: &mut Vec<CellValue>) {
        for row in rows {
            if !self.layout.skips_row(row) {
                out.push(self.fill_value(column, row));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(row: u32, s: &str) -> SparseCell {
        SparseCell::text(row, s)
    }

    fn num(row: u32, raw: &str) -> SparseCell {
        SparseCell::number(row, raw)
    }

    #[test]
    fn test_gap_fill_regions() {
        let layout = GridLayout::passthrough().with_data_origin(2, 3);
        let reconstructor = GridReconstructor::new(&layout);

        let header = SparseColumn::with_cells(1, vec![text(1, "a"), text(5, "e")]);
        let data = SparseColumn::with_cells(2, vec![num(1, "1.0")]);
        let sheet: SparseSheet = vec![header, data].into_iter().collect();

        let rows = reconstructor.rows(&sheet).unwrap();
        assert_eq!(
            rows[0],
            vec![
                CellValue::from("a"),
                CellValue::blank(),
                CellValue::blank(),
                CellValue::blank(),
                CellValue::from("e"),
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                CellValue::Int(1),
                CellValue::blank(),
                CellValue::Int(0),
                CellValue::Int(0),
                CellValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_skipped_row_positions_emit_nothing() {
        let layout = GridLayout::passthrough().with_skip_rows([2, 4]);
        let reconstructor = GridReconstructor::new(&layout);

        let column = SparseColumn::with_cells(1, vec![text(1, "a"), text(2, "b"), text(5, "e")]);
        let row = reconstructor.dense_row(&column, 6);
        assert_eq!(
            row,
            vec![
                CellValue::from("a"),
                CellValue::blank(),
                CellValue::from("e"),
                CellValue::blank(),
            ]
        );
    }

    #[test]
    fn test_truncates_to_first_column_width() {
        let layout = GridLayout::passthrough();
        let reconstructor = GridReconstructor::new(&layout);

        let first = SparseColumn::with_cells(1, vec![text(2, "x")]);
        let longer = SparseColumn::with_cells(2, vec![text(1, "a"), text(3, "too far")]);
        let sheet: SparseSheet = vec![longer, first].into_iter().collect();

        let rows = reconstructor.rows(&sheet).unwrap();
        assert_eq!(rows[0], vec![CellValue::blank(), CellValue::from("x")]);
        assert_eq!(rows[1], vec![CellValue::from("a"), CellValue::blank()]);
    }

    #[test]
    fn test_unsorted_and_duplicate_cells() {
        let layout = GridLayout::passthrough();
        let reconstructor = GridReconstructor::new(&layout);

        let column = SparseColumn::with_cells(
            1,
            vec![text(3, "c"), text(1, "a"), text(3, "dup"), text(0, "zero")],
        );
        let row = reconstructor.dense_row(&column, 3);
        assert_eq!(
            row,
            vec![CellValue::from("a"), CellValue::blank(), CellValue::from("c")]
        );
    }

    #[test]
    fn test_malformed_cell_keeps_position() {
        let layout = GridLayout::passthrough();
        let reconstructor = GridReconstructor::new(&layout);

        let column = SparseColumn::with_cells(
            1,
            vec![SparseCell::missing(1), num(2, "oops"), num(3, "2.5")],
        );
        let row = reconstructor.dense_row(&column, 3);
        assert_eq!(row, vec![CellValue::Null, CellValue::Null, CellValue::Float(2.5)]);
    }

    #[test]
    fn test_empty_sheet() {
        let layout = GridLayout::default();
        let reconstructor = GridReconstructor::new(&layout);
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        assert_eq!(reconstructor.reconstruct(&SparseSheet::new(), &mut rows).unwrap(), 0);
        assert!(rows.is_empty());
    }
}
