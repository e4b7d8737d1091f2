// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The query-result input contract.

use serde::{Deserialize, Serialize};

use crate::definition::AggregationDefinition;
use crate::record::Dataset;

/// A JSON-shaped query result from the backend.
///
/// This layer only reads the result; beyond null/empty checks it does not
/// validate schema conformance. `chart_type` and `available_chart_types` are
/// kept as raw keys so an unrecognized type degrades to a "not supported"
/// message instead of a deserialization failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    /// Result rows.
    pub dataset: Dataset,
    /// Dimension/measure role declarations for the rows.
    pub aggregation_definition: AggregationDefinition,
    /// The backend's recommended chart key.
    pub chart_type: String,
    /// All chart keys the backend considers applicable.
    pub available_chart_types: Vec<String>,
    /// Optional prose response accompanying (or replacing) the data.
    pub text_response: Option<String>,
}

impl QueryResult {
    /// Returns whether the result carries any rows.
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }
}
