//! # tilia-report
//!
//! Converts Tilia `.tlx` exports into spreadsheet-ready files.
//!
//! This crate provides:
//! - A tree view over TLX documents
//! - Id-indexed lookup tables for contacts and publications
//! - Flattening of cross-referenced records into CSV rows and text lines
//! - Crunch mode (dense grid only) and report mode (grid plus metadata)
//! - Batch conversion of a folder with per-document failure isolation
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use tilia_report::{ConvertConfig, Converter, Mode};
//!
//! let converter = Converter::new(ConvertConfig::default().with_mode(Mode::Crunch));
//! let summary = converter
//!     .convert_dir(Path::new("input"), Path::new("output"))
//!     .unwrap();
//! assert!(summary.is_success());
//! ```

/// Conversion settings.
pub mod config;
/// Per-document conversion and batch processing.
pub mod convert;
/// TLX tree access.
pub mod document;
/// Error types and result aliases.
pub mod error;
/// Record flattening.
pub mod flatten;
/// Entity lookup tables.
pub mod index;
/// Site and collection-unit summaries.
pub mod metadata;
/// Report artifact writers.
pub mod report;

pub use config::{ConvertConfig, Mode};
pub use convert::{BatchSummary, Converter, DocumentFailure};
pub use document::{Element, TlxDocument};
pub use error::{ReportError, Result};
pub use flatten::{Contact, Field, Flattener};
pub use index::{DuplicateIdPolicy, EntityIndex};
pub use metadata::{LineSink, TextSink};
