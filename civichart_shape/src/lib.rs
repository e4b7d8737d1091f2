// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data shaping for civichart.
//!
//! This crate turns flat record datasets into the sorted, optionally nested,
//! optionally normalized aggregates the chart renderers consume:
//! - [`group_totals`]: one grouping key, one summed measure, deterministic
//!   ordering (total descending, key ascending on ties).
//! - [`stack_by`]: primary × secondary grouping into a [`StackedTable`] whose
//!   subgroup order is a single global ranking, so a subgroup keeps one
//!   color/position across every row.
//! - [`StackCell`]: each stacked cell carries its raw sum and its share of
//!   the row total, so the 100% variants need no second pass.
//! - [`series_totals`]: chronological grouping for time axes.
//!
//! Empty or missing inputs always produce empty-but-well-formed outputs;
//! "no data" presentation is the renderers' responsibility.

mod group;
mod series;
mod stack;

pub use group::{group_totals, GroupEntry};
pub use series::series_totals;
pub use stack::{stack_by, StackCell, StackedRow, StackedTable};
