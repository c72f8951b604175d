use std::path::Path;
use std::time::Instant;

use dmp_model::AttributeDefinition;
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::dictionary::TypeDictionaries;
use crate::document::Document;
use crate::error::DocumentError;
use crate::index::AttributeIndex;
use crate::loader::{ATTRIBUTES_SHEET, parse_attributes, parse_dictionaries};

/// The loaded taxonomy: attribute table, id index, and code dictionaries.
///
/// Immutable once built. Decoders share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    index: AttributeIndex,
    dictionaries: TypeDictionaries,
    fingerprint: Option<String>,
}

/// Counts for display and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomySummary {
    pub fingerprint: Option<String>,
    pub attribute_rows: usize,
    pub attribute_count: usize,
    pub duplicate_ids: Vec<String>,
    pub dictionary_count: usize,
    pub empty_dictionaries: usize,
    pub dictionary_entries: usize,
}

impl Taxonomy {
    pub fn new(attributes: Vec<AttributeDefinition>, dictionaries: TypeDictionaries) -> Self {
        Self {
            index: AttributeIndex::new(attributes),
            dictionaries,
            fingerprint: None,
        }
    }

    /// Read and parse a taxonomy document from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let span = info_span!("load_taxonomy", path = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let document = Document::open(path)?;
        let taxonomy = Self::from_document(&document)?;

        info!(
            attribute_count = taxonomy.index.len(),
            dictionary_count = taxonomy.dictionaries.len(),
            fingerprint = taxonomy.fingerprint.as_deref().unwrap_or("-"),
            duration_ms = start.elapsed().as_millis(),
            "taxonomy loaded"
        );
        Ok(taxonomy)
    }

    /// Build a taxonomy from an in-memory document.
    pub fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let sheet = document
            .sheet(ATTRIBUTES_SHEET)
            .ok_or_else(|| DocumentError::MissingAttributesSheet {
                sheet: ATTRIBUTES_SHEET.to_string(),
            })?;

        let attributes = parse_attributes(sheet);
        let dictionaries = parse_dictionaries(document);
        let mut taxonomy = Self::new(attributes, dictionaries);
        taxonomy.fingerprint = document.fingerprint().map(String::from);

        let duplicates = taxonomy.index.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(
                duplicate_count = duplicates.len(),
                duplicate_ids = ?duplicates,
                "duplicate attribute ids; the first definition is used"
            );
        }
        Ok(taxonomy)
    }

    pub fn attribute(&self, id: &str) -> Option<&AttributeDefinition> {
        self.index.lookup(id)
    }

    /// Attribute table rows in document order.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        self.index.attributes()
    }

    pub fn index(&self) -> &AttributeIndex {
        &self.index
    }

    pub fn dictionaries(&self) -> &TypeDictionaries {
        &self.dictionaries
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn summary(&self) -> TaxonomySummary {
        TaxonomySummary {
            fingerprint: self.fingerprint.clone(),
            attribute_rows: self.index.attributes().len(),
            attribute_count: self.index.len(),
            duplicate_ids: self.index.duplicate_ids().to_vec(),
            dictionary_count: self.dictionaries.len(),
            empty_dictionaries: self
                .dictionaries
                .iter()
                .filter(|(_, dictionary)| dictionary.is_empty())
                .count(),
            dictionary_entries: self
                .dictionaries
                .iter()
                .map(|(_, dictionary)| dictionary.len())
                .sum(),
        }
    }
}
