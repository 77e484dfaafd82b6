//! Sparse sheet model.
//!
//! Tilia stores its spreadsheet transposed relative to the CSV we produce:
//! every [`SparseColumn`] becomes one output row, and a cell's `row`
//! position is its offset inside that output row. Positions are 1-based and
//! only non-empty cells are present.

/// Content of one sparse cell as found in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPayload {
    /// A `<text>` payload, kept verbatim.
    Text(String),
    /// A `<value>` payload, still unparsed.
    Number(String),
    /// Neither payload present.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseCell {
    pub row: u32,
    pub payload: CellPayload,
}

impl SparseCell {
    pub fn text(row: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            payload: CellPayload::Text(text.into()),
        }
    }

    pub fn number(row: u32, raw: impl Into<String>) -> Self {
        Self {
            row,
            payload: CellPayload::Number(raw.into()),
        }
    }

    pub fn missing(row: u32) -> Self {
        Self {
            row,
            payload: CellPayload::Missing,
        }
    }
}

/// All cells sharing one declared column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseColumn {
    pub position: u32,
    pub cells: Vec<SparseCell>,
}

impl SparseColumn {
    #[must_use]
    pub fn new(position: u32) -> Self {
        Self {
            position,
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cells(position: u32, cells: Vec<SparseCell>) -> Self {
        Self { position, cells }
    }

    pub fn push(&mut self, cell: SparseCell) {
        self.cells.push(cell);
    }

    /// Highest row position present, or 0 for an empty column.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.cells.iter().map(|c| c.row).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseSheet {
    pub columns: Vec<SparseColumn>,
}

impl SparseSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: SparseColumn) {
        self.columns.push(column);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in ascending declared position; ties keep document order.
    #[must_use]
    pub fn ordered_columns(&self) -> Vec<&SparseColumn> {
        let mut columns: Vec<&SparseColumn> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.position);
        columns
    }
}

impl FromIterator<SparseColumn> for SparseSheet {
    fn from_iter<I: IntoIterator<Item = SparseColumn>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
