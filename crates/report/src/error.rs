//! Error types for TLX conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort the conversion of one document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required child element is absent.
    #[error("Missing element <{element}> in <{parent}>")]
    MissingElement { parent: String, element: String },

    /// A required attribute is absent.
    #[error("Missing attribute {attribute} on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute could not be parsed as the expected number.
    #[error("Invalid attribute {attribute}={value:?} on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// Element text could not be parsed as a number.
    #[error("Invalid number in <{element}>: {value:?}")]
    InvalidNumber { element: String, value: String },

    /// A foreign-key id has no matching record.
    #[error("Unresolved {kind} reference: ID {id}")]
    UnresolvedReference { kind: &'static str, id: i64 },

    /// Two records share an id under the `reject` policy.
    #[error("Duplicate {kind} ID {id}")]
    DuplicateId { kind: &'static str, id: i64 },

    /// Configuration file could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Writing the dense grid failed.
    #[error("Sheet error: {0}")]
    Sheet(#[from] tilia_sheet::SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Create a missing-element error.
    pub fn missing_element(parent: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingElement {
            parent: parent.into(),
            element: element.into(),
        }
    }
}
