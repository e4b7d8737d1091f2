// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schema metadata: display-name lookup over externally supplied field
//! descriptions.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document was not valid JSON of the expected shape.
    #[error("invalid schema document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reference metadata for one known dimension or measure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMeta {
    /// Physical field name.
    pub name: String,
    /// Human-readable label.
    pub display_name: String,
    /// Free-form description.
    pub description: String,
    /// Declared data type (`"string"`, `"number"`, `"date"`, ...).
    pub data_type: String,
    /// The data source the field belongs to.
    pub data_source: String,
}

/// A read-only catalog of field metadata.
///
/// Absence degrades gracefully: an empty catalog answers every lookup with
/// the raw field name.
#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
    fields: HashMap<String, FieldMeta>,
}

#[derive(Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    dimensions: Vec<FieldMeta>,
    #[serde(default)]
    measures: Vec<FieldMeta>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema JSON document (`{"dimensions": [...], "measures": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument = serde_json::from_str(json)?;
        let mut fields = HashMap::new();
        for meta in doc.dimensions.into_iter().chain(doc.measures) {
            fields.insert(meta.name.clone(), meta);
        }
        Ok(Self { fields })
    }

    /// Looks up metadata for a field.
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.get(name)
    }

    /// Returns the display name for a field, falling back to the raw name.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        match self.fields.get(name) {
            Some(meta) if !meta.display_name.is_empty() => &meta.display_name,
            _ => name,
        }
    }

    /// Number of cataloged fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
