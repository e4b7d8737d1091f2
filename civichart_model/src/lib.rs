// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed data model for civichart.
//!
//! This crate holds the vocabulary shared by the shaping engine and the chart
//! renderers:
//! - **Values and records**: a tagged scalar type (`Text`/`Number`/`Coord`)
//!   and field-name → value rows, so renderers fail fast on type mismatches
//!   instead of silently producing `NaN` labels.
//! - **Aggregation definitions**: which fields play which dimension/measure
//!   roles for the current visualization.
//! - **Query results**: the JSON-shaped input contract from the backend.
//! - **Chart kinds**: the closed set of renderable chart types.
//! - **Schema metadata**: display-name lookup for raw field names.

mod chart_kind;
mod definition;
mod query;
mod record;
mod schema;
mod value;

pub use chart_kind::ChartKind;
pub use definition::{AggregationDefinition, MeasureDef};
pub use query::QueryResult;
pub use record::{Dataset, Record};
pub use schema::{FieldMeta, SchemaCatalog, SchemaError};
pub use value::{Coordinate, Value};
