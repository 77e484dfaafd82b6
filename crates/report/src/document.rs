//! Read-only tree view of a TLX document.

use crate::error::{ReportError, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::str::FromStr;
use tilia_sheet::{CellPayload, SparseCell, SparseColumn, SparseSheet};

/// A parsed TLX document.
pub struct TlxDocument<'input> {
    doc: Document<'input>,
}

impl<'input> TlxDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;
        Ok(Self { doc })
    }

    #[must_use]
    pub fn root(&self) -> Element<'_, 'input> {
        Element {
            node: self.doc.root_element(),
        }
    }
}

/// An element node with lookups by local tag name.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Element<'a, 'input> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node
            .children()
            .filter(Node::is_element)
            .map(|node| Element { node })
    }

    /// First child element with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Element<'a, 'input>> {
        self.children().find(|child| child.name() == name)
    }

    /// First child element with the given name, or a missing-element error.
    pub fn child(&self, name: &str) -> Result<Element<'a, 'input>> {
        self.find(name)
            .ok_or_else(|| ReportError::missing_element(self.name(), name))
    }

    /// Leading text content; empty elements yield `""`.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.node.text().unwrap_or_default()
    }

    pub fn child_text(&self, name: &str) -> Result<&'a str> {
        Ok(self.child(name)?.text())
    }

    /// Text of an optional child; absent and empty both map to `None`.
    #[must_use]
    pub fn optional_text(&self, name: &str) -> Option<&'a str> {
        self.find(name)
            .map(|child| child.text())
            .filter(|text| !text.is_empty())
    }

    pub fn child_number(&self, name: &str) -> Result<f64> {
        let raw = self.child_text(name)?;
        raw.trim()
            .parse()
            .map_err(|_| ReportError::InvalidNumber {
                element: name.to_string(),
                value: raw.to_string(),
            })
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Parse a required attribute.
    pub fn parse_attribute<T: FromStr>(&self, name: &str) -> Result<T> {
        let raw = self
            .attribute(name)
            .ok_or_else(|| ReportError::MissingAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
            })?;
        raw.trim().parse().map_err(|_| ReportError::InvalidAttribute {
            element: self.name().to_string(),
            attribute: name.to_string(),
            value: raw.to_string(),
        })
    }

    /// The record's `ID` attribute.
    pub fn id(&self) -> Result<i64> {
        self.parse_attribute("ID")
    }
}

/// Extract the sparse spreadsheet under `SpreadSheetBook/SpreadSheet`.
pub fn read_sparse_sheet(root: Element<'_, '_>) -> Result<SparseSheet> {
    let data = root.child("SpreadSheetBook")?.child("SpreadSheet")?;

    let mut sheet = SparseSheet::new();
    for tilia_column in data.children() {
        let mut column = SparseColumn::new(tilia_column.parse_attribute("ID")?);
        for tilia_cell in tilia_column.children() {
            let row = tilia_cell.parse_attribute("row")?;
            let payload = if let Some(text) = tilia_cell.find("text") {
                CellPayload::Text(text.text().to_string())
            } else if let Some(value) = tilia_cell.find("value") {
                CellPayload::Number(value.text().to_string())
            } else {
                CellPayload::Missing
            };
            column.push(SparseCell { row, payload });
        }
        sheet.push(column);
    }

    tracing::debug!("Read {} sparse columns", sheet.columns.len());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"<TiliaFile>
  <SpreadSheetBook>
    <SpreadSheet>
      <Col ID="1">
        <cell row="1"><text>Code</text></cell>
        <cell row="3"><value>12.0</value></cell>
      </Col>
      <Col ID="4">
        <cell row="2"/>
        <cell row="5"><text/></cell>
      </Col>
    </SpreadSheet>
  </SpreadSheetBook>
</TiliaFile>"#;

    #[test]
    fn test_read_sparse_sheet() {
        let doc = TlxDocument::parse(SHEET).unwrap();
        let sheet = read_sparse_sheet(doc.root()).unwrap();

        assert_eq!(sheet.columns.len(), 2);
        assert_eq!(sheet.columns[0].position, 1);
        assert_eq!(sheet.columns[0].cells[0], SparseCell::text(1, "Code"));
        assert_eq!(sheet.columns[0].cells[1], SparseCell::number(3, "12.0"));
        assert_eq!(sheet.columns[1].position, 4);
        assert_eq!(sheet.columns[1].cells[0], SparseCell::missing(2));
        assert_eq!(sheet.columns[1].cells[1], SparseCell::text(5, ""));
    }

    #[test]
    fn test_missing_spreadsheet() {
        let doc = TlxDocument::parse("<TiliaFile/>").unwrap();
        let err = read_sparse_sheet(doc.root()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingElement { ref element, .. } if element == "SpreadSheetBook"
        ));
    }

    #[test]
    fn test_invalid_row_attribute() {
        let xml = r#"<T><SpreadSheetBook><SpreadSheet><Col ID="1"><cell row="x"/></Col></SpreadSheet></SpreadSheetBook></T>"#;
        let doc = TlxDocument::parse(xml).unwrap();
        let err = read_sparse_sheet(doc.root()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidAttribute { ref attribute, .. } if attribute == "row"));
    }

    #[test]
    fn test_element_accessors() {
        let xml = r#"<Contact ID=" 7 "><ShortContactName>J. Doe</ShortContactName><Email></Email><Altitude>12.9</Altitude></Contact>"#;
        let doc = TlxDocument::parse(xml).unwrap();
        let contact = doc.root();

        assert_eq!(contact.id().unwrap(), 7);
        assert_eq!(contact.child_text("ShortContactName").unwrap(), "J. Doe");
        assert_eq!(contact.optional_text("Email"), None);
        assert_eq!(contact.optional_text("Phone"), None);
        assert!((contact.child_number("Altitude").unwrap() - 12.9).abs() < f64::EPSILON);
        assert!(contact.child_text("Phone").is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            TlxDocument::parse("<TiliaFile>"),
            Err(ReportError::Xml(_))
        ));
    }
}
