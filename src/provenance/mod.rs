//! Provenance records: one package URL plus digest per installed package.
//!
//! The document serializes as the in-toto material list, a bare JSON array
//! of `{"uri": ..., "digest": {algorithm: value}}` objects.

pub mod purl;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ir::PackageDescriptor;

/// A single installed package identified by URL and digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub uri: String,
    /// Exactly one algorithm-to-checksum pair.
    pub digest: BTreeMap<String, String>,
}

/// Entries in the order the package source enumerated them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenanceDocument {
    entries: Vec<ProvenanceEntry>,
}

impl ProvenanceDocument {
    pub fn entries(&self) -> &[ProvenanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProvenanceEntry> {
        self.entries.iter()
    }
}

impl From<Vec<ProvenanceEntry>> for ProvenanceDocument {
    fn from(entries: Vec<ProvenanceEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a ProvenanceDocument {
    type Item = &'a ProvenanceEntry;
    type IntoIter = std::slice::Iter<'a, ProvenanceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build the provenance entry for one package.
pub fn build_entry(desc: &PackageDescriptor) -> ProvenanceEntry {
    let mut digest = BTreeMap::new();
    digest.insert(desc.checksum.algorithm.to_string(), desc.checksum.to_text());
    ProvenanceEntry {
        uri: purl::package_url(desc),
        digest,
    }
}

/// One entry per descriptor, in input order. Duplicates are kept.
pub fn build_document(descriptors: &[PackageDescriptor]) -> ProvenanceDocument {
    descriptors.iter().map(build_entry).collect::<Vec<_>>().into()
}
