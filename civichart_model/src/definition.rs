// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative aggregation definition.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A measure: a physical field name plus the display alias the backend
/// aggregates it under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureDef {
    /// Physical field name (e.g. `"unique_key"`).
    #[serde(default)]
    pub field: String,
    /// Aggregated display alias (e.g. `"num_of_requests"`).
    #[serde(default)]
    pub alias: String,
}

impl MeasureDef {
    /// Creates a measure definition.
    pub fn new(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// The field name measure values are read from in result records.
    ///
    /// Result rows carry the alias; the physical field is only meaningful to
    /// the query backend.
    pub fn result_field(&self) -> &str {
        if self.alias.is_empty() {
            &self.field
        } else {
            &self.alias
        }
    }
}

/// Role lists are almost always zero, one, or two entries long.
type Roles = SmallVec<[String; 2]>;

/// Declares which fields play which dimension/measure roles for the current
/// visualization.
///
/// At most one time dimension and one geo dimension are consulted by any
/// single chart; plain dimensions may carry a primary and a secondary entry
/// for grouped/stacked/nested/treemap charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregationDefinition {
    /// All grouping fields, in priority order.
    pub dimensions: Roles,
    /// Aggregated measures.
    pub measures: Vec<MeasureDef>,
    /// Dimensions classified as time-typed.
    pub time_dimension: Roles,
    /// Dimensions classified as geographic.
    pub geo_dimension: Roles,
    /// Dimensions classified as plain categorical.
    pub categorical_dimension: Roles,
}

impl AggregationDefinition {
    /// The first plain dimension, used as the primary grouping key.
    ///
    /// Falls back to the first dimension of any type so single-dimension
    /// charts keep working when classification lists are absent.
    pub fn primary_dimension(&self) -> Option<&str> {
        self.categorical_dimension
            .first()
            .or_else(|| self.dimensions.first())
            .map(String::as_str)
    }

    /// The second plain dimension, used as the subgroup key by two-key
    /// charts.
    pub fn secondary_dimension(&self) -> Option<&str> {
        if let Some(d) = self.categorical_dimension.get(1) {
            return Some(d);
        }
        let primary = self.primary_dimension()?;
        self.dimensions
            .iter()
            .find(|d| d.as_str() != primary)
            .map(String::as_str)
    }

    /// The time dimension consulted by time-axis charts, if declared.
    pub fn time_dimension(&self) -> Option<&str> {
        self.time_dimension.first().map(String::as_str)
    }

    /// The geographic dimension consulted by map charts, if declared.
    pub fn geo_dimension(&self) -> Option<&str> {
        self.geo_dimension.first().map(String::as_str)
    }

    /// The categorical dimension paired with a time axis by stacked area
    /// charts: the first plain dimension that is not the time dimension.
    pub fn breakdown_dimension(&self) -> Option<&str> {
        let time = self.time_dimension();
        self.categorical_dimension
            .iter()
            .chain(self.dimensions.iter())
            .map(String::as_str)
            .find(|d| Some(*d) != time)
    }

    /// The first declared measure.
    pub fn primary_measure(&self) -> Option<&MeasureDef> {
        self.measures.first()
    }

    /// Returns a copy with the primary and secondary plain dimensions
    /// exchanged.
    ///
    /// This backs the dimension-swap toggle: the same grouping logic re-runs
    /// with keys flipped, so a stacked chart pivots its rows and segments.
    pub fn swapped(&self) -> Self {
        let mut out = self.clone();
        if out.categorical_dimension.len() >= 2 {
            out.categorical_dimension.swap(0, 1);
        }
        if out.dimensions.len() >= 2 {
            out.dimensions.swap(0, 1);
        }
        out
    }
}
