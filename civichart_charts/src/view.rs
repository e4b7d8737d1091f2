// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application state: one query result, the chart chosen for it, and the
//! dimension-swap toggle.

use civichart_model::{AggregationDefinition, ChartKind, QueryResult, SchemaCatalog};

use crate::geo::GeoBoundaries;
use crate::layout::Size;
use crate::registry::{render_chart, ChartContext};
use crate::svg::SvgDocument;

/// The state behind one rendered view.
///
/// State is explicit rather than scattered: the current result, the active
/// chart kind, and whether the primary/secondary dimensions are swapped.
/// Re-rendering after any change is a pure function of this struct.
#[derive(Clone, Debug)]
pub struct AppState {
    result: QueryResult,
    schema: SchemaCatalog,
    boundaries: Option<GeoBoundaries>,
    chart: ChartKind,
    swap_dimensions: bool,
}

impl AppState {
    /// Creates state for a fresh result, selecting the backend's suggested
    /// chart (or the table fallback when the suggestion is unknown).
    pub fn new(result: QueryResult, schema: SchemaCatalog) -> Self {
        let chart = ChartKind::from_key(&result.chart_type).unwrap_or_else(|| {
            if !result.chart_type.is_empty() {
                tracing::warn!(key = %result.chart_type, "unknown suggested chart, falling back to table");
            }
            ChartKind::Table
        });
        Self {
            result,
            schema,
            boundaries: None,
            chart,
            swap_dimensions: false,
        }
    }

    /// Attaches boundary polygons for the map charts.
    pub fn with_boundaries(mut self, boundaries: Option<GeoBoundaries>) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// The currently selected chart kind.
    pub fn chart(&self) -> ChartKind {
        self.chart
    }

    /// The kinds the backend offered for this result, unknown keys skipped.
    pub fn available_charts(&self) -> Vec<ChartKind> {
        self.result
            .available_chart_types
            .iter()
            .filter_map(|key| {
                let kind = ChartKind::from_key(key);
                if kind.is_none() {
                    tracing::warn!(key = %key, "skipping unknown chart key");
                }
                kind
            })
            .collect()
    }

    /// Switches the active chart kind.
    pub fn set_chart(&mut self, kind: ChartKind) {
        self.chart = kind;
    }

    /// Flips the primary/secondary dimension swap and returns the new
    /// state.
    pub fn toggle_swap(&mut self) -> bool {
        self.swap_dimensions = !self.swap_dimensions;
        self.swap_dimensions
    }

    /// Whether dimensions are currently swapped.
    pub fn swapped(&self) -> bool {
        self.swap_dimensions
    }

    /// The free-text answer accompanying the result, if any.
    pub fn text_response(&self) -> Option<&str> {
        self.result.text_response.as_deref()
    }

    /// The definition the next render will use, with the swap applied.
    pub fn effective_definition(&self) -> AggregationDefinition {
        if self.swap_dimensions {
            self.result.aggregation_definition.swapped()
        } else {
            self.result.aggregation_definition.clone()
        }
    }

    /// Renders the current state.
    pub fn render(&self, size: Size) -> SvgDocument {
        let definition = self.effective_definition();
        let ctx = ChartContext::new(&self.result.dataset, &definition, &self.schema)
            .with_boundaries(self.boundaries.as_ref());
        render_chart(self.chart, &ctx, size)
    }
}
