//! Id-indexed lookup tables for referenceable records.

use crate::document::Element;
use crate::error::{ReportError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What to do when two records in one collection share an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// The later record replaces the earlier one but keeps its position.
    #[default]
    LastWins,
    /// The earlier record is kept and the later one ignored.
    FirstWins,
    /// The document is rejected.
    Reject,
}

/// Mapping from an external integer id to a record of one kind.
///
/// Iteration follows first-insertion order, which is document order for
/// indexes built from a collection element.
#[derive(Debug, Clone)]
pub struct EntityIndex<T> {
    kind: &'static str,
    entries: IndexMap<i64, T>,
}

impl<T> EntityIndex<T> {
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    pub fn build<I>(kind: &'static str, records: I, policy: DuplicateIdPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, T)>,
    {
        let mut index = Self::new(kind);
        for (id, record) in records {
            index.insert(id, record, policy)?;
        }
        Ok(index)
    }

    pub fn insert(&mut self, id: i64, record: T, policy: DuplicateIdPolicy) -> Result<()> {
        if !self.entries.contains_key(&id) {
            self.entries.insert(id, record);
            return Ok(());
        }

        match policy {
            DuplicateIdPolicy::LastWins => {
                tracing::warn!("Duplicate {} ID {id}: keeping the later record", self.kind);
                self.entries.insert(id, record);
                Ok(())
            }
            DuplicateIdPolicy::FirstWins => {
                tracing::warn!("Duplicate {} ID {id}: keeping the earlier record", self.kind);
                Ok(())
            }
            DuplicateIdPolicy::Reject => Err(ReportError::DuplicateId {
                kind: self.kind,
                id,
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Look up a referenced id; a dangling reference is an error.
    pub fn resolve(&self, id: i64) -> Result<&T> {
        self.get(id).ok_or(ReportError::UnresolvedReference {
            kind: self.kind,
            id,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        self.entries.iter().map(|(id, record)| (*id, record))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<'a, 'input> EntityIndex<Element<'a, 'input>> {
    /// Index every child of a collection element by its `ID` attribute.
    pub fn from_collection(
        kind: &'static str,
        collection: Element<'a, 'input>,
        policy: DuplicateIdPolicy,
    ) -> Result<Self> {
        let records = collection
            .children()
            .map(|record| record.id().map(|id| (id, record)))
            .collect::<Result<Vec<_>>>()?;
        Self::build(kind, records, policy)
    }
}
