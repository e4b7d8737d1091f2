// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records and datasets.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::{Coordinate, Value};

/// A single row: a mapping from field name to a tagged value.
///
/// Records are immutable inputs to the shaping layer; nothing mutates them in
/// place. Accessors return `Option`s so callers can skip missing fields and
/// type mismatches explicitly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the raw value for a field.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a numeric field value.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.value(field).and_then(Value::as_number)
    }

    /// Returns a field value rendered as a grouping/display key.
    pub fn key(&self, field: &str) -> Option<String> {
        self.value(field).map(Value::display_key)
    }

    /// Returns a coordinate field value.
    pub fn coord(&self, field: &str) -> Option<Coordinate> {
        self.value(field).and_then(Value::as_coord)
    }

    /// Returns whether the record carries the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names, in no particular order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

/// An ordered collection of records, as delivered by the query backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a record list.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Returns whether any record carries the given field.
    ///
    /// Used by renderers to distinguish "dimension absent from the result"
    /// from "dimension present but sparse".
    pub fn has_field(&self, field: &str) -> bool {
        self.records.iter().any(|r| r.has_field(field))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accessors_distinguish_kinds() {
        let r: Record = [
            ("borough", Value::from("Brooklyn")),
            ("num_of_requests", Value::from(120.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(r.key("borough").as_deref(), Some("Brooklyn"));
        assert_eq!(r.number("num_of_requests"), Some(120.0));
        assert_eq!(r.number("borough"), None);
        assert!(r.value("missing").is_none());
    }

    #[test]
    fn dataset_deserializes_from_record_array() {
        let json = r#"[
            {"borough": "Queens", "num_of_requests": 10},
            {"borough": "Bronx", "num_of_requests": 4}
        ]"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_field("borough"));
        assert!(!ds.has_field("location"));
    }

    #[test]
    fn empty_dataset_reports_empty() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert!(!ds.has_field("borough"));
    }
}
