//! Sparse sheet model and dense grid reconstruction for Tilia exports.
//!
//! A Tilia spreadsheet only stores non-empty cells, each addressed by an
//! explicit column and row position. This crate rebuilds the rectangular
//! grid from that representation and streams it to a row sink such as a CSV
//! writer.
//!
//! # Examples
//!
//! ```
//! use tilia_sheet::{CellValue, GridLayout, GridReconstructor, SparseCell, SparseColumn, SparseSheet};
//!
//! let mut sheet = SparseSheet::new();
//! sheet.push(SparseColumn::with_cells(
//!     1,
//!     vec![SparseCell::text(1, "Depth"), SparseCell::number(3, "12.0")],
//! ));
//!
//! let layout = GridLayout::passthrough();
//! let rows = GridReconstructor::new(&layout).rows(&sheet)?;
//!
//! assert_eq!(
//!     rows[0],
//!     vec![CellValue::from("Depth"), CellValue::blank(), CellValue::Int(12)]
//! );
//! # Ok::<(), tilia_sheet::SheetError>(())
//! ```
//!
//! Gaps inside the data region (at or past [`DataOrigin`]) are zero-filled,
//! everything else is blank-filled:
//!
//! ```
//! use tilia_sheet::{CellValue, GridLayout, GridReconstructor, SparseCell, SparseColumn};
//!
//! let layout = GridLayout::passthrough().with_data_origin(1, 2);
//! let column = SparseColumn::with_cells(4, vec![SparseCell::number(1, "7")]);
//! let row = GridReconstructor::new(&layout).dense_row(&column, 3);
//!
//! assert_eq!(row, vec![CellValue::Int(7), CellValue::Int(0), CellValue::Int(0)]);
//! ```

mod cell;
mod error;
mod layout;
mod reconstruct;
mod sink;
mod sparse;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export row sinks and CSV options.
pub use sink::{rows_to_csv_string, CsvOptions, CsvSink, RowSink};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export layout configuration.
pub use layout::{DataOrigin, GridLayout};
/// Re-export the reconstructor.
pub use reconstruct::GridReconstructor;
/// Re-export the sparse model.
pub use sparse::{CellPayload, SparseCell, SparseColumn, SparseSheet};
