// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart construction for civichart.
//!
//! This crate turns an aggregated dataset plus its aggregation definition
//! into a finished SVG chart. The pieces layer bottom-up:
//!
//! - [`format`] and [`time`]: value formatting and time-grain handling.
//! - [`scale`]: linear, band, and time scales with the padding rules every
//!   renderer shares.
//! - [`layout`] and [`svg`]: the chart frame and the SVG output container.
//! - [`palette`], [`legend`], [`tooltip`], [`axis`]: shared visual furniture.
//! - [`geo`]: boundary polygons for the map charts.
//! - One renderer module per chart kind, dispatched through [`registry`].
//! - [`view`]: application state tying a query result to a rendered chart.

pub mod axis;
pub mod format;
pub mod geo;
pub mod layout;
pub mod legend;
pub mod palette;
pub mod registry;
pub mod scale;
pub mod svg;
pub mod time;
pub mod tooltip;
pub mod view;

pub mod area_chart;
pub mod bar_chart;
pub mod choropleth;
pub mod grouped_bar_chart;
pub mod heatmap;
pub mod line_chart;
pub mod nested_bar_chart;
pub mod stacked_bar_chart;
pub mod table_chart;
pub mod treemap;

#[cfg(test)]
mod shaping_tests;

pub use layout::{Frame, Margins, Size};
pub use registry::{render_chart, render_chart_key, ChartContext};
pub use svg::SvgDocument;
pub use view::AppState;
