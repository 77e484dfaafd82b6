//! Flattening of cross-referenced records into rows and lines.

use crate::document::Element;
use crate::error::Result;
use crate::index::EntityIndex;
use std::fmt;

/// How one output column is read from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Text of the named child element.
    Scalar(&'static str),
    /// `Name: Value` pairs of the named list, joined with `", "`.
    Parameters(&'static str),
    /// `NeotomaID`s of the publications referenced by the named list.
    Publications(&'static str),
    /// Contacts referenced through `<Contact ID=".."/>` items of the named list.
    Authors(&'static str),
}

impl Field {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Field::Scalar(name)
            | Field::Parameters(name)
            | Field::Publications(name)
            | Field::Authors(name) => name,
        }
    }
}

pub const GEOCHRONOLOGY_FIELDS: &[Field] = &[
    Field::Scalar("Method"),
    Field::Scalar("AgeUnits"),
    Field::Scalar("Depth"),
    Field::Scalar("Thickness"),
    Field::Scalar("LabNumber"),
    Field::Scalar("Age"),
    Field::Scalar("ErrorOlder"),
    Field::Scalar("ErrorYounger"),
    Field::Scalar("Sigma"),
    Field::Scalar("StdDev"),
    Field::Scalar("GreaterThan"),
    Field::Parameters("Parameters"),
    Field::Scalar("MaterialDated"),
    Field::Scalar("PublicationsText"),
    Field::Publications("Publications"),
];

pub const LITHOLOGY_FIELDS: &[Field] = &[
    Field::Scalar("DepthTop"),
    Field::Scalar("DepthBottom"),
    Field::Scalar("Description"),
];

pub const PUBLICATION_FIELDS: &[Field] = &[
    Field::Scalar("PublicationType"),
    Field::Scalar("NeotomaID"),
    Field::Scalar("PublicationYear"),
    Field::Scalar("Citation"),
    Field::Authors("Authors"),
    Field::Scalar("Title"),
    Field::Scalar("SeriesNumber"),
    Field::Scalar("Publisher"),
    Field::Scalar("City"),
    Field::Scalar("Country"),
];

/// Header row for a field table.
#[must_use]
pub fn header(fields: &[Field]) -> Vec<&'static str> {
    fields.iter().map(Field::name).collect()
}

/// Display form of a contact: `Name (email) (Neotoma: id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact<'a> {
    pub short_name: &'a str,
    pub email: Option<&'a str>,
    pub neotoma_id: &'a str,
}

impl<'a> Contact<'a> {
    pub fn from_element(contact: Element<'a, '_>) -> Result<Self> {
        Ok(Self {
            short_name: contact.child_text("ShortContactName")?,
            email: contact.optional_text("Email"),
            neotoma_id: contact.child_text("NeotomaContactID")?,
        })
    }
}

impl fmt::Display for Contact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.email {
            Some(email) => write!(
                f,
                "{} ({email}) (Neotoma: {})",
                self.short_name, self.neotoma_id
            ),
            None => write!(f, "{} (Neotoma: {})", self.short_name, self.neotoma_id),
        }
    }
}

/// Resolves foreign keys of one document against its entity indexes.
#[derive(Debug, Clone, Copy)]
pub struct Flattener<'i, 'a, 'input> {
    contacts: &'i EntityIndex<Element<'a, 'input>>,
    publications: &'i EntityIndex<Element<'a, 'input>>,
}

impl<'i, 'a, 'input> Flattener<'i, 'a, 'input> {
    #[must_use]
    pub fn new(
        contacts: &'i EntityIndex<Element<'a, 'input>>,
        publications: &'i EntityIndex<Element<'a, 'input>>,
    ) -> Self {
        Self {
            contacts,
            publications,
        }
    }

    /// One output row for `record`, in field-table order.
    pub fn flatten(&self, record: Element<'_, '_>, fields: &[Field]) -> Result<Vec<String>> {
        fields
            .iter()
            .map(|field| -> Result<String> {
                match *field {
                    Field::Scalar(name) => Ok(record.child_text(name)?.to_string()),
                    Field::Parameters(name) => parameters(record.child(name)?),
                    Field::Publications(name) => self.publication_refs(record.child(name)?),
                    Field::Authors(name) => self.authors(record.child(name)?),
                }
            })
            .collect()
    }

    /// Display string of the contact with the given id.
    pub fn contact(&self, id: i64) -> Result<String> {
        let contact = self.contacts.resolve(id)?;
        Ok(Contact::from_element(*contact)?.to_string())
    }

    /// `NeotomaID`s of every `<Publication ID=".."/>` item, joined.
    pub fn publication_refs(&self, list: Element<'_, '_>) -> Result<String> {
        let ids = list
            .children()
            .map(|item| -> Result<String> {
                let publication = self.publications.resolve(item.id()?)?;
                Ok(publication.child_text("NeotomaID")?.to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ids.join(", "))
    }

    /// Contacts referenced by `<Author><Contact ID=".."/></Author>` items, joined.
    pub fn authors(&self, list: Element<'_, '_>) -> Result<String> {
        let authors = list
            .children()
            .map(|author| self.contact(author.child("Contact")?.id()?))
            .collect::<Result<Vec<_>>>()?;
        Ok(authors.join(", "))
    }

    /// Contacts referenced directly by `<Collector ID=".."/>` items.
    pub fn collectors(&self, list: Element<'_, '_>) -> Result<Vec<String>> {
        list.children()
            .map(|collector| self.contact(collector.id()?))
            .collect()
    }
}

/// `Name: Value` pairs in document order, joined with `", "`.
pub fn parameters(list: Element<'_, '_>) -> Result<String> {
    let pairs = list
        .children()
        .map(|parameter| -> Result<String> {
            Ok(format!(
                "{}: {}",
                parameter.child_text("Name")?,
                parameter.child_text("Value")?
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(pairs.join(", "))
}

/// Warn when the geochronology analysis unit is not the supported one.
///
/// Returns whether the unit matched.
pub fn check_analysis_unit(geochronology: Element<'_, '_>, expected: &str) -> bool {
    let unit = geochronology.attribute("AnalysisUnitID");
    if unit == Some(expected) {
        true
    } else {
        tracing::warn!(
            "Potentially unsupported analysis unit: {}",
            unit.unwrap_or("<none>")
        );
        false
    }
}
