use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// First (column, row) position of the numeric data region.
///
/// Gaps at or past both thresholds are filled with `0`; every other gap is
/// left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOrigin {
    pub column: u32,
    pub row: u32,
}

impl Default for DataOrigin {
    fn default() -> Self {
        // Spreadsheet cell H3.
        DataOrigin { column: 8, row: 3 }
    }
}

impl DataOrigin {
    #[must_use]
    pub fn contains(&self, column: u32, row: u32) -> bool {
        column >= self.column && row >= self.row
    }
}

/// Skip sets and fill policy for grid reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Column positions that produce no output row at all.
    pub skip_columns: BTreeSet<u32>,
    /// Row positions dropped from every output row.
    pub skip_rows: BTreeSet<u32>,
    pub data_origin: DataOrigin,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            skip_columns: [1, 3, 4, 5, 6].into_iter().collect(),
            skip_rows: [2].into_iter().collect(),
            data_origin: DataOrigin::default(),
        }
    }
}

impl GridLayout {
    /// A layout that keeps everything and blank-fills every gap.
    #[must_use]
    pub fn passthrough() -> Self {
        GridLayout {
            skip_columns: BTreeSet::new(),
            skip_rows: BTreeSet::new(),
            data_origin: DataOrigin {
                column: u32::MAX,
                row: u32::MAX,
            },
        }
    }

    #[must_use]
    pub fn with_skip_columns(mut self, columns: impl IntoIterator<Item = u32>) -> Self {
        self.skip_columns = columns.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, rows: impl IntoIterator<Item = u32>) -> Self {
        self.skip_rows = rows.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_data_origin(mut self, column: u32, row: u32) -> Self {
        self.data_origin = DataOrigin { column, row };
        self
    }

    #[must_use]
    pub fn skips_column(&self, column: u32) -> bool {
        self.skip_columns.contains(&column)
    }

    #[must_use]
    pub fn skips_row(&self, row: u32) -> bool {
        self.skip_rows.contains(&row)
    }

    /// Number of kept row positions in `1..=width`.
    #[must_use]
    pub fn kept_width(&self, width: u32) -> usize {
        (1..=width).filter(|row| !self.skips_row(*row)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = GridLayout::default();
        for column in [1, 3, 4, 5, 6] {
            assert!(layout.skips_column(column));
        }
        assert!(!layout.skips_column(2));
        assert!(layout.skips_row(2));
        assert_eq!(layout.data_origin, DataOrigin { column: 8, row: 3 });
    }

    #[test]
    fn test_data_origin_boundary() {
        let origin = DataOrigin::default();
        assert!(origin.contains(8, 3));
        assert!(origin.contains(20, 40));
        assert!(!origin.contains(7, 3));
        assert!(!origin.contains(8, 2));
    }

    #[test]
    fn test_kept_width() {
        let layout = GridLayout::default();
        assert_eq!(layout.kept_width(0), 0);
        assert_eq!(layout.kept_width(1), 1);
        assert_eq!(layout.kept_width(5), 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let layout: GridLayout = serde_json::from_str(r#"{"skip_rows": [1, 4]}"#).unwrap();
        assert!(layout.skips_row(4));
        assert!(!layout.skips_row(2));
        assert!(layout.skips_column(3));
        assert_eq!(layout.data_origin, DataOrigin::default());
    }
}
